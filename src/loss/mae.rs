pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE: mean(|predicted - expected|), 0 for empty slices.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if expected.is_empty() {
            return 0.0;
        }
        let n = expected.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| (y - p).abs())
            .sum::<f64>() / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_absolute_differences() {
        let loss = MaeLoss::loss(&[0.2, 0.9], &[0.0, 1.0]);
        assert!((loss - 0.15).abs() < 1e-12);
    }

    #[test]
    fn zero_for_exact_match_and_empty() {
        assert_eq!(MaeLoss::loss(&[0.3, 0.7], &[0.3, 0.7]), 0.0);
        assert_eq!(MaeLoss::loss(&[], &[]), 0.0);
    }
}
