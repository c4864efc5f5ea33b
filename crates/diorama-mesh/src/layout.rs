//! Platform layout: concentric rings of stone blocks laid around the origin.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

/// Narrowest block allowed along the circumference.
pub const MIN_BLOCK_LENGTH: f32 = 0.8;

/// One ring of blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingConfig {
    /// Distance from the platform centre to each block's centre.
    pub radius: f32,
    /// Radial depth of each block.
    pub width: f32,
    /// Number of blocks in the ring.
    pub count: u32,
}

/// Where and how large a single block is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockPlacement {
    pub center: Vec3,
    /// (circumferential length, height, radial depth) before rotation.
    pub size: Vec3,
    /// Rotation about +Y in radians, turning the block's length tangent to its ring.
    pub yaw: f32,
}

/// Outer, middle, and inner rings of the stock platform.
pub const fn default_rings() -> [RingConfig; 3] {
    [
        RingConfig {
            radius: 10.8,
            width: 2.2,
            count: 24,
        },
        RingConfig {
            radius: 7.5,
            width: 1.8,
            count: 20,
        },
        RingConfig {
            radius: 4.0,
            width: 1.2,
            count: 12,
        },
    ]
}

/// Lay out every ring's blocks, ring by ring, block `i` at angle `i · 2π / count`.
///
/// Each block spans 95% of its arc so neighbouring blocks leave a visible joint.
pub fn ring_blocks(rings: &[RingConfig], thickness: f32) -> Vec<BlockPlacement> {
    let mut blocks = Vec::with_capacity(rings.iter().map(|r| r.count as usize).sum());

    for ring in rings {
        if ring.count == 0 {
            continue;
        }
        let arc = TAU / ring.count as f32;
        let length = (arc * ring.radius * 0.95).max(MIN_BLOCK_LENGTH);

        for i in 0..ring.count {
            let angle = i as f32 * arc;
            let (sin, cos) = angle.sin_cos();
            blocks.push(BlockPlacement {
                center: Vec3::new(cos * ring.radius, 0.0, sin * ring.radius),
                size: Vec3::new(length, thickness, ring.width),
                yaw: -angle + FRAC_PI_2,
            });
        }
    }
    blocks
}
