use diffusion_core::{Dimension, Preset};
use rand::Rng;
use rand::seq::SliceRandom;

/// Uniform pick among the presets defined for `dim`.
pub fn sample_preset<R: Rng>(rng: &mut R, dim: Dimension) -> Preset {
    let presets = Preset::available(dim.as_usize());
    // every supported dimension has at least one preset
    *presets.choose(rng).unwrap_or(&Preset::Half)
}

pub fn sample_alpha<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen_range(min..max)
}

/// Deterministic per-run seed (stable under split-by-range regeneration).
pub fn run_seed(base: u64, run_idx: usize) -> u64 {
    base ^ (run_idx as u64).wrapping_mul(0x9E3779B97F4A7C15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn samples_only_presets_valid_for_dimension() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for dim in [Dimension::One, Dimension::Two, Dimension::Three] {
            for _ in 0..64 {
                assert!(sample_preset(&mut rng, dim).supports(dim.as_usize()));
            }
        }
    }

    #[test]
    fn seeds_are_reproducible_and_distinct() {
        assert_eq!(run_seed(123, 4), run_seed(123, 4));
        assert_ne!(run_seed(123, 4), run_seed(123, 5));
        assert_eq!(run_seed(123, 0), 123);

        let mut a = ChaCha8Rng::seed_from_u64(run_seed(9, 2));
        let mut b = ChaCha8Rng::seed_from_u64(run_seed(9, 2));
        assert_eq!(sample_alpha(&mut a, 0.05, 0.5), sample_alpha(&mut b, 0.05, 0.5));
    }

    #[test]
    fn alpha_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let a = sample_alpha(&mut rng, 0.05, 0.5);
            assert!((0.05..0.5).contains(&a));
        }
    }
}
