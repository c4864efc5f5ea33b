//! Randomly perturbed colors around a base, used for every tinted stroke.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pixel::{Paint, to_channel};

/// A base color and the full width of the random band around it.
///
/// Each channel of a sample lands in `base ± amount / 2`, clamped to `[0, 255]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    pub base: [f32; 3],
    pub amount: f32,
}

impl NoiseParameters {
    pub const fn new(base: [f32; 3], amount: f32) -> Self {
        Self { base, amount }
    }

    /// A gray level with no variation.
    pub const fn flat_gray(level: f32) -> Self {
        Self::new([level, level, level], 0.0)
    }

    /// The base color shifted by `delta` on every channel.
    pub fn offset(base: [u8; 3], delta: f32, amount: f32) -> Self {
        Self::new(base.map(|c| c as f32 + delta), amount)
    }

    /// Draw one perturbed color. Channels are drawn independently, red first.
    ///
    /// A zero `amount` returns the clamped base without consuming randomness.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [u8; 3] {
        if self.amount == 0.0 {
            return self.base.map(to_channel);
        }
        self.base
            .map(|c| to_channel(c + (rng.random::<f32>() - 0.5) * self.amount))
    }

    /// [`Self::sample`] as an opaque [`Paint`].
    pub fn paint<R: Rng + ?Sized>(&self, rng: &mut R) -> Paint {
        Paint::opaque(self.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_samples_stay_within_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let params = NoiseParameters::new([100.0, 116.0, 145.0], 40.0);
        for _ in 0..500 {
            let [r, g, b] = params.sample(&mut rng);
            assert!((80..=120).contains(&r), "red {r}");
            assert!((96..=136).contains(&g), "green {g}");
            assert!((125..=165).contains(&b), "blue {b}");
        }
    }

    #[test]
    fn test_samples_clamp_at_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let params = NoiseParameters::new([-50.0, 250.0, 400.0], 60.0);
        for _ in 0..200 {
            let [r, _, b] = params.sample(&mut rng);
            assert_eq!(r, 0);
            assert_eq!(b, 255);
        }
    }

    #[test]
    fn test_zero_amount_is_exact_and_draws_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut reference = rng.clone();
        assert_eq!(NoiseParameters::flat_gray(42.0).sample(&mut rng), [42, 42, 42]);
        assert_eq!(rng.random::<u64>(), reference.random::<u64>());
    }

    #[test]
    fn test_offset_shifts_every_channel() {
        let params = NoiseParameters::offset([110, 116, 145], -30.0, 30.0);
        assert_eq!(params.base, [80.0, 86.0, 115.0]);
        assert_eq!(params.amount, 30.0);
    }
}
