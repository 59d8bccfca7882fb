use rand::Rng;

/// Draws `size` independent values uniformly from `[-1, 1)`.
pub fn biases<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<f64> {
    (0..size).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect()
}

/// Draws a `rows × cols` weight matrix, one independent `biases(cols)` row at a time.
///
/// Row `j` holds the weights from every input unit into output unit `j`.
pub fn weights<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..rows).map(|_| biases(cols, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn biases_have_requested_length_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = biases(5, &mut rng);
        assert_eq!(b.len(), 5);
        assert!(b.iter().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn weights_have_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let w = weights(3, 4, &mut rng);
        assert_eq!(w.len(), 3);
        assert!(w.iter().all(|row| row.len() == 4));
        assert!(w.iter().flatten().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn zero_sizes_yield_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(biases(0, &mut rng).is_empty());
        assert!(weights(0, 4, &mut rng).is_empty());
        assert!(weights(2, 0, &mut rng).iter().all(|row| row.is_empty()));
    }

    #[test]
    fn same_seed_same_draws() {
        let a = weights(2, 3, &mut StdRng::seed_from_u64(42));
        let b = weights(2, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
