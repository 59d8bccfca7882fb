use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::NnResult;
use crate::loss::mae::MaeLoss;
use crate::network::network::Network;
use crate::train::progress::{LogSink, ProgressSink, StepStats, TrainEvent};
use crate::train::source::ExampleSource;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainState {
    /// A single example's error fell below `min_error`.
    Converged,
    /// The example source signalled exhaustion.
    Exhausted,
    /// `total_steps` updates were applied.
    StepLimitReached,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub state: TrainState,
    /// Number of updates applied to the network.
    pub steps: usize,
    /// Statistics of the last update, if any ran.
    pub last: Option<StepStats>,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` online, one example per step, until the step limit, the
/// end of `source`, or convergence.
///
/// Each step takes the learning rate from the cosine schedule, applies one
/// backpropagation update and measures the MAE of the output computed
/// *before* that update. Progress goes to `sink` every `config.log_every`
/// steps starting at step 0.
///
/// # Errors
/// - `InvalidConfig` if `config` does not validate (nothing is trained)
/// - `ShapeMismatch` if an example does not fit the network
/// - any error the source returns
///
/// The network keeps every update applied before the failing step.
pub fn train_loop<S, P>(
    network: &mut Network,
    source: &mut S,
    config: &TrainConfig,
    sink: &mut P,
) -> NnResult<TrainReport>
where
    S: ExampleSource + ?Sized,
    P: ProgressSink + ?Sized,
{
    config.validate()?;
    let schedule = config.schedule()?;

    let mut step = 0;
    let mut last = None;

    let state = loop {
        if matches!(config.total_steps, Some(limit) if step >= limit) {
            break TrainState::StepLimitReached;
        }

        let Some(example) = source.next_example()? else {
            break TrainState::Exhausted;
        };
        network.check_shapes(&example.input, &example.target)?;

        let lr = schedule.lr_at(step);
        let output = network.train_step(&example.input, &example.target, lr);
        let error = MaeLoss::loss(&output, &example.target);
        let stats = StepStats { step, error, learning_rate: lr };

        if step % config.log_every == 0 {
            sink.observe(&TrainEvent::Progress(stats.clone()));
        }

        step += 1;
        if error < config.min_error {
            sink.observe(&TrainEvent::Converged(stats.clone()));
            last = Some(stats);
            break TrainState::Converged;
        }
        last = Some(stats);
    };

    debug!("training stopped: {:?} after {} steps", state, step);
    Ok(TrainReport { state, steps: step, last })
}

/// [`train_loop`] with progress written to the log.
pub fn train<S>(network: &mut Network, source: &mut S, config: &TrainConfig) -> NnResult<TrainReport>
where
    S: ExampleSource + ?Sized,
{
    train_loop(network, source, config, &mut LogSink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NnError;
    use crate::layers::Layer;
    use crate::train::example::Example;
    use crate::train::source::IterSource;

    fn single_output() -> Network {
        Network::from_layers(vec![
            Layer::input(1),
            Layer::from_parts(1, vec![vec![0.0]], vec![0.0]),
        ])
        .unwrap()
    }

    fn repeat(example: Example, n: usize) -> IterSource<std::iter::Take<std::iter::Repeat<Example>>> {
        IterSource::new(std::iter::repeat(example).take(n))
    }

    #[test]
    fn stops_at_step_limit() {
        let mut net = single_output();
        let mut source = repeat(Example::new(vec![1.0], vec![1.0]), 1000);
        let config = TrainConfig::new().with_total_steps(250);
        let mut events: Vec<TrainEvent> = Vec::new();
        let report = train_loop(&mut net, &mut source, &config, &mut events).unwrap();

        assert_eq!(report.state, TrainState::StepLimitReached);
        assert_eq!(report.steps, 250);
        let steps: Vec<usize> = events
            .iter()
            .map(|e| match e {
                TrainEvent::Progress(s) => s.step,
                TrainEvent::Converged(s) => panic!("unexpected convergence at {}", s.step),
            })
            .collect();
        assert_eq!(steps, vec![0, 100, 200]);
    }

    #[test]
    fn zero_step_limit_pulls_nothing() {
        let mut net = single_output();
        let before = net.clone();
        let mut source = repeat(Example::new(vec![1.0], vec![1.0]), 10);
        let report = train(&mut net, &mut source, &TrainConfig::new().with_total_steps(0)).unwrap();
        assert_eq!(report.state, TrainState::StepLimitReached);
        assert_eq!(report.steps, 0);
        assert!(report.last.is_none());
        assert_eq!(net, before);
        assert!(source.next_example().unwrap().is_some());
    }

    #[test]
    fn reported_error_is_pre_update() {
        let mut net = single_output();
        let mut source = repeat(Example::new(vec![1.0], vec![1.0]), 1);
        let report = train(&mut net, &mut source, &TrainConfig::new()).unwrap();
        // zero weights give sigmoid(0) = 0.5 before the first update
        assert_eq!(report.last.unwrap().error, 0.5);
        assert_eq!(report.state, TrainState::Exhausted);
    }

    #[test]
    fn first_step_uses_max_lr() {
        let mut net = single_output();
        let mut source = repeat(Example::new(vec![1.0], vec![1.0]), 1);
        let config = TrainConfig::new().with_lr_bounds(0.02, 0.3);
        let report = train(&mut net, &mut source, &config).unwrap();
        assert!((report.last.unwrap().learning_rate - 0.3).abs() < 1e-12);
    }

    #[test]
    fn invalid_config_trains_nothing() {
        let mut net = single_output();
        let before = net.clone();
        let mut source = repeat(Example::new(vec![1.0], vec![1.0]), 5);
        let result = train(&mut net, &mut source, &TrainConfig::new().with_lr_period(0));
        assert!(matches!(result, Err(NnError::InvalidConfig(_))));
        assert_eq!(net, before);
    }

    #[test]
    fn mismatched_example_aborts() {
        let mut net = single_output();
        let mut source = repeat(Example::new(vec![1.0, 2.0], vec![1.0]), 5);
        let result = train(&mut net, &mut source, &TrainConfig::new());
        assert!(matches!(result, Err(NnError::ShapeMismatch { expected: 1, got: 2, .. })));
    }
}
