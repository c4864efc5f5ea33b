//! Procedural spiral galaxy: a multi-armed point distribution with warm,
//! star-like colors, generated once into a flat sample list for a point cloud.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// A single star of the galaxy point cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSample {
    /// Position in scene units. The galactic plane is XZ, Y is up.
    pub position: Vec3,
    /// Linear RGBA. R and G in [0.6, 1.0], B and A in [0.5, 1.0].
    pub color: [f32; 4],
    /// Point size in [0.2, 1.0].
    pub size: f32,
}

/// Shape of the spiral distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralParams {
    /// Number of samples to generate.
    pub count: usize,
    /// Outer radius of the disc.
    pub radius: f32,
    /// Number of arms. Zero is treated as a single arm.
    pub arm_count: u32,
    /// Extra winding angle per unit of radius.
    pub arm_tightness: f32,
    /// Maximum vertical dispersion, reached at the core.
    pub height_scale: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            count: 20_000,
            radius: 50.0,
            arm_count: 4,
            arm_tightness: 0.3,
            height_scale: 5.0,
        }
    }
}

/// Sample `params.count` stars along a spiral.
///
/// Each star picks a base angle, a radius, and an arm uniformly at random; the
/// arm offset plus `r * arm_tightness` winds it into the spiral. A distortion
/// factor in [0.5, 1.0] pulls stars inward so arms thicken toward the centre.
/// Vertical spread falls off linearly with radius, flattening the rim.
///
/// Colors and sizes are drawn independently of position.
pub fn sample_spiral<R: Rng + ?Sized>(rng: &mut R, params: &SpiralParams) -> Vec<StarSample> {
    let arm_count = params.arm_count.max(1);
    let arm_spacing = TAU / arm_count as f32;
    let radius = params.radius.max(0.0);

    let mut stars = Vec::with_capacity(params.count);

    for _ in 0..params.count {
        let angle = rng.random::<f32>() * TAU;
        let r = rng.random::<f32>() * radius;
        let arm = rng.random_range(0..arm_count);
        let spiral_angle = angle + r * params.arm_tightness + arm as f32 * arm_spacing;

        let distortion = rng.random::<f32>() * 0.5 + 0.5;
        let x = spiral_angle.cos() * r * distortion;
        let z = spiral_angle.sin() * r * distortion;

        let falloff = if radius > 0.0 { 1.0 - r / radius } else { 1.0 };
        let y = (rng.random::<f32>() - 0.5) * params.height_scale * falloff * 2.0;

        let color = star_color(rng);
        let size = rng.random::<f32>() * 0.8 + 0.2;

        stars.push(StarSample {
            position: Vec3::new(x, y, z),
            color,
            size,
        });
    }

    log::debug!(
        "sampled {} galaxy stars over {} arms (radius {})",
        stars.len(),
        arm_count,
        radius
    );

    stars
}

/// Warm, bright star tint: red and green biased high, blue slightly wider.
fn star_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let r = rng.random::<f32>() * 0.4 + 0.6;
    let g = rng.random::<f32>() * 0.4 + 0.6;
    let b = rng.random::<f32>() * 0.5 + 0.5;
    let a = rng.random::<f32>() * 0.5 + 0.5;
    [r, g, b, a]
}

/// Interleave positions as `[x0, y0, z0, x1, ...]` for a position attribute.
pub fn flatten_positions(stars: &[StarSample]) -> Vec<f32> {
    stars
        .iter()
        .flat_map(|s| s.position.to_array())
        .collect()
}

/// Interleave colors as `[r0, g0, b0, a0, r1, ...]` for a color attribute.
pub fn flatten_colors(stars: &[StarSample]) -> Vec<f32> {
    stars.iter().flat_map(|s| s.color).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn scenario() -> Vec<StarSample> {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        sample_spiral(
            &mut rng,
            &SpiralParams {
                count: 1000,
                radius: 50.0,
                arm_count: 4,
                arm_tightness: 0.3,
                height_scale: 5.0,
            },
        )
    }

    #[test]
    fn test_sample_count_matches_request() {
        assert_eq!(scenario().len(), 1000);
    }

    #[test]
    fn test_accepts_trait_object_rng() {
        let params = SpiralParams {
            count: 50,
            ..SpiralParams::default()
        };
        let mut seeded = ChaCha8Rng::seed_from_u64(5);
        let dynamic: &mut dyn RngCore = &mut seeded;
        let from_dyn = sample_spiral(dynamic, &params);
        let direct = sample_spiral(&mut ChaCha8Rng::seed_from_u64(5), &params);
        assert_eq!(flatten_positions(&from_dyn), flatten_positions(&direct));
    }

    #[test]
    fn test_zero_count_yields_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let params = SpiralParams {
            count: 0,
            ..SpiralParams::default()
        };
        assert!(sample_spiral(&mut rng, &params).is_empty());
    }

    #[test]
    fn test_positions_within_bounding_sphere() {
        for (i, star) in scenario().iter().enumerate() {
            let len = star.position.length();
            assert!(len <= 50.0 + 1e-3, "star {i} at distance {len}");
            assert!(star.position.is_finite(), "star {i} is not finite");
        }
    }

    #[test]
    fn test_colors_within_documented_ranges() {
        for (i, star) in scenario().iter().enumerate() {
            let [r, g, b, a] = star.color;
            assert!((0.6..=1.0).contains(&r), "star {i} red {r}");
            assert!((0.6..=1.0).contains(&g), "star {i} green {g}");
            assert!((0.5..=1.0).contains(&b), "star {i} blue {b}");
            assert!((0.5..=1.0).contains(&a), "star {i} alpha {a}");
            assert!((0.2..=1.0).contains(&star.size), "star {i} size {}", star.size);
        }
    }

    #[test]
    fn test_height_flattens_toward_rim() {
        // The in-plane distance never exceeds the sampled radius, so its
        // falloff bounds the sampled one from above.
        for (i, star) in scenario().iter().enumerate() {
            let planar = Vec3::new(star.position.x, 0.0, star.position.z).length();
            let bound = 5.0 * (1.0 - planar / 50.0) + 1e-4;
            assert!(
                star.position.y.abs() <= bound,
                "star {i} y={} exceeds bound {bound} at planar distance {planar}",
                star.position.y
            );
        }
    }

    #[test]
    fn test_same_seed_same_galaxy() {
        assert_eq!(scenario(), scenario());
    }

    #[test]
    fn test_zero_arms_and_radius_are_finite() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let params = SpiralParams {
            count: 50,
            radius: 0.0,
            arm_count: 0,
            arm_tightness: 0.3,
            height_scale: 2.0,
        };
        let stars = sample_spiral(&mut rng, &params);
        assert_eq!(stars.len(), 50);
        for star in &stars {
            assert_eq!(star.position.x, 0.0);
            assert_eq!(star.position.z, 0.0);
            assert!(star.position.y.abs() <= 2.0);
        }
    }

    #[test]
    fn test_flattened_attributes_interleave() {
        let stars = scenario();
        let positions = flatten_positions(&stars);
        let colors = flatten_colors(&stars);
        assert_eq!(positions.len(), stars.len() * 3);
        assert_eq!(colors.len(), stars.len() * 4);
        assert_eq!(positions[3..6], stars[1].position.to_array());
        assert_eq!(colors[4..8], stars[1].color);
    }
}
