use crate::loss::mae::MaeLoss;
use crate::network::network::Network;
use crate::train::example::Example;

/// Mean of the per-example MAE over `examples`; 0 for an empty set.
pub fn mean_error(network: &Network, examples: &[Example]) -> f64 {
    if examples.is_empty() {
        return 0.0;
    }
    let total: f64 = examples
        .iter()
        .map(|ex| MaeLoss::loss(&network.predict(&ex.input), &ex.target))
        .sum();
    total / examples.len() as f64
}

/// Fraction of examples whose strongest output matches the strongest target.
pub fn accuracy(network: &Network, examples: &[Example]) -> f64 {
    if examples.is_empty() {
        return 0.0;
    }
    let correct = examples
        .iter()
        .filter(|ex| argmax(&network.predict(&ex.input)) == argmax(&ex.target))
        .count();
    correct as f64 / examples.len() as f64
}

/// Index of the maximum element in a slice; the first one wins ties.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
