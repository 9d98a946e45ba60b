use rand::Rng;

/// Source of the stochastic scoring component. The production generator is
/// uniform over `[0, ceiling)`; tests inject a fixed value to pin scores.
pub trait NoiseSource: Send + Sync {
    fn sample(&self, ceiling: f64) -> f64;
}

/// Uniform noise over `[0, ceiling)`.
pub struct UniformNoise;

impl NoiseSource for UniformNoise {
    fn sample(&self, ceiling: f64) -> f64 {
        if ceiling <= 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(0.0..ceiling)
    }
}

/// Deterministic noise for tests.
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample(&self, _ceiling: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_noise_stays_in_range() {
        let noise = UniformNoise;
        for _ in 0..1000 {
            let sample = noise.sample(15.0);
            assert!((0.0..15.0).contains(&sample));
        }
    }

    #[test]
    fn test_zero_ceiling_yields_zero() {
        assert_eq!(UniformNoise.sample(0.0), 0.0);
    }

    #[test]
    fn test_fixed_noise_ignores_ceiling() {
        assert_eq!(FixedNoise(7.5).sample(20.0), 7.5);
    }
}
