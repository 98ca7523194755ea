//! Gene-vector operators: initialization, crossover, and mutation.
//!
//! These functions implement the raw genetic operators used by
//! [`genetic::GeneticEngine`](crate::genetic::GeneticEngine). They all work
//! on plain slices and take an explicit RNG.
//!
//! Crossover and mutation modify their arguments in place; the engine only
//! ever passes them *copies* of parent genes, never a live parent's vector,
//! so a parent selected twice in one pairing still contributes two
//! independent gene copies.

use rand::Rng;
use rand_distr::Normal;

/// Standard deviation of the Gaussian mutation perturbation.
const MUTATION_SIGMA: f32 = 0.2;

/// Generates a random gene vector, i.i.d. uniform in `[-1, 1]` per
/// component.
pub fn random<R>(rng: &mut R, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    (0..len).map(|_| rng.random_range(-1.0..=1.0)).collect()
}

/// Single-point crossover between two gene vectors.
///
/// Draws `point` uniformly from `[0, len)` and swaps the inclusive prefixes
/// `g1[0..=point]` and `g2[0..=point]`. `point = 0` exchanges only the first
/// gene; `point = len - 1` exchanges the whole vectors.
///
/// # Panics
///
/// Panics if the vectors differ in length or are empty.
pub fn crossover<R>(g1: &mut [f32], g2: &mut [f32], rng: &mut R)
where
    R: Rng + ?Sized,
{
    assert_eq!(g1.len(), g2.len());
    let point = rng.random_range(0..g1.len());
    swap_prefix(g1, g2, point);
}

/// Swaps the inclusive prefixes `g1[0..=point]` and `g2[0..=point]`.
pub fn swap_prefix(g1: &mut [f32], g2: &mut [f32], point: usize) {
    for i in 0..=point {
        std::mem::swap(&mut g1[i], &mut g2[i]);
    }
}

/// Gaussian mutation: each gene is perturbed by a draw from `N(0, 0.2²)`
/// with probability `rate`; the rest are left unchanged.
pub fn mutate<R>(genes: &mut [f32], rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, MUTATION_SIGMA).unwrap();
    for g in genes {
        if rng.random_bool(rate) {
            *g += rng.sample(normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_random_stays_in_range() {
        let genes = random(&mut rng(), 1000);
        assert_eq!(genes.len(), 1000);
        assert!(genes.iter().all(|g| (-1.0..=1.0).contains(g)));
    }

    #[test]
    fn test_swap_prefix_table() {
        let tests = [
            (0, [[5.0, 2.0, 3.0, 4.0], [1.0, 6.0, 7.0, 8.0]]),
            (1, [[5.0, 6.0, 3.0, 4.0], [1.0, 2.0, 7.0, 8.0]]),
            (2, [[5.0, 6.0, 7.0, 4.0], [1.0, 2.0, 3.0, 8.0]]),
            (3, [[5.0, 6.0, 7.0, 8.0], [1.0, 2.0, 3.0, 4.0]]),
        ];

        for (point, [g1_expect, g2_expect]) in tests {
            let mut g1 = [1.0, 2.0, 3.0, 4.0];
            let mut g2 = [5.0, 6.0, 7.0, 8.0];
            swap_prefix(&mut g1, &mut g2, point);
            assert_eq!(g1, g1_expect);
            assert_eq!(g2, g2_expect);
        }
    }

    #[test]
    fn test_crossover_is_self_inverse() {
        let mut rng = rng();
        let original1 = random(&mut rng, 16);
        let original2 = random(&mut rng, 16);
        for point in 0..16 {
            let mut g1 = original1.clone();
            let mut g2 = original2.clone();
            swap_prefix(&mut g1, &mut g2, point);
            swap_prefix(&mut g1, &mut g2, point);
            assert_eq!(g1, original1);
            assert_eq!(g2, original2);
        }
    }

    #[test]
    fn test_crossover_preserves_suffix() {
        let mut g1 = [1.0, 2.0, 3.0, 4.0];
        let mut g2 = [5.0, 6.0, 7.0, 8.0];
        swap_prefix(&mut g1, &mut g2, 1);
        assert_eq!(&g1[2..], &[3.0, 4.0]);
        assert_eq!(&g2[2..], &[7.0, 8.0]);
    }

    #[test]
    fn test_mutate_rate_zero_is_noop() {
        let mut rng = rng();
        let original = random(&mut rng, 64);
        let mut genes = original.clone();
        mutate(&mut genes, 0.0, &mut rng);
        assert_eq!(genes, original);
    }

    #[test]
    fn test_mutate_rate_one_touches_every_gene() {
        let mut rng = rng();
        let original = random(&mut rng, 64);
        let mut genes = original.clone();
        mutate(&mut genes, 1.0, &mut rng);
        // A Gaussian draw of exactly 0.0 has zero probability.
        for (g, o) in genes.iter().zip(&original) {
            assert_ne!(g, o);
        }
    }
}
