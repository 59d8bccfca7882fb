use std::sync::mpsc;

use log::info;
use serde::{Deserialize, Serialize};

/// Snapshot of a single training step, emitted by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    /// 0-based step number.
    pub step: usize,
    /// Mean absolute error of the example, measured before its update.
    pub error: f64,
    /// Learning rate used for the update.
    pub learning_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrainEvent {
    /// Periodic progress, every `log_every` steps starting at step 0.
    Progress(StepStats),
    /// The error fell below `min_error`; the loop stops after this event.
    Converged(StepStats),
}

/// Receiver of training observations. Must not block indefinitely.
pub trait ProgressSink {
    fn observe(&mut self, event: &TrainEvent);
}

/// Writes observations to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn observe(&mut self, event: &TrainEvent) {
        match event {
            TrainEvent::Progress(s) => {
                info!("Step {}, MAE: {:.6}, LR: {:.5}", s.step, s.error, s.learning_rate)
            }
            TrainEvent::Converged(s) => {
                info!("Converged at step {} with MAE {:.6}", s.step, s.error)
            }
        }
    }
}

/// Forwards events over a channel. A dropped receiver is ignored; training goes on.
impl ProgressSink for mpsc::Sender<TrainEvent> {
    fn observe(&mut self, event: &TrainEvent) {
        let _ = self.send(event.clone());
    }
}

impl ProgressSink for Vec<TrainEvent> {
    fn observe(&mut self, event: &TrainEvent) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StepStats {
        StepStats { step: 3, error: 0.25, learning_rate: 0.1 }
    }

    #[test]
    fn channel_sink_forwards_and_survives_dropped_receiver() {
        let (mut tx, rx) = mpsc::channel::<TrainEvent>();
        tx.observe(&TrainEvent::Progress(stats()));
        assert_eq!(rx.recv().unwrap(), TrainEvent::Progress(stats()));
        drop(rx);
        tx.observe(&TrainEvent::Converged(stats()));
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut events: Vec<TrainEvent> = Vec::new();
        events.observe(&TrainEvent::Progress(stats()));
        events.observe(&TrainEvent::Converged(stats()));
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], TrainEvent::Converged(_)));
    }
}
