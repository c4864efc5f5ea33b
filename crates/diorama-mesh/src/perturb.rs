//! Per-vertex perturbation of flat `[x0, y0, z0, x1, ...]` buffers.
//!
//! Both operations borrow their input and return freshly allocated buffers;
//! the caller's mesh data is never modified.

use std::f32::consts::FRAC_PI_2;

use rand::Rng;
use thiserror::Error;

/// Per-axis jitter amplitude per unit of `magnitude_scale`.
pub const JITTER_FACTOR: f32 = 0.02;

/// Malformed vertex buffers. Proceeding would silently corrupt geometry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    /// A flat position or normal buffer is not a whole number of xyz triples.
    #[error("buffer length {len} is not a multiple of 3")]
    NotTriples { len: usize },

    /// Positions and normals do not correspond one-to-one.
    #[error("{positions} position components but {normals} normal components")]
    LengthMismatch { positions: usize, normals: usize },
}

fn check_triples(buffer: &[f32]) -> Result<(), MeshError> {
    if buffer.len() % 3 != 0 {
        return Err(MeshError::NotTriples { len: buffer.len() });
    }
    Ok(())
}

/// Displace every coordinate by an independent draw from
/// `(rand() - 0.5) * 0.02 * magnitude_scale`.
///
/// Callers pass the block height as `magnitude_scale` so taller blocks get
/// proportionally rougher faces. Draws are consumed x, y, z per vertex even
/// when the scale is zero, in which case the output equals the input.
pub fn jitter<R: Rng + ?Sized>(
    rng: &mut R,
    positions: &[f32],
    magnitude_scale: f32,
) -> Result<Vec<f32>, MeshError> {
    check_triples(positions)?;
    let amplitude = JITTER_FACTOR * magnitude_scale;
    Ok(positions
        .iter()
        .map(|&c| c + (rng.random::<f32>() - 0.5) * amplitude)
        .collect())
}

/// Sinusoidal fluting around the Y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluteParams {
    /// Number of full grooves around the circumference.
    pub flute_count: u32,
    /// Relative radial amplitude; 0.04 bulges and cuts the radius by 4%.
    pub depth: f32,
}

impl Default for FluteParams {
    fn default() -> Self {
        Self {
            flute_count: 12,
            depth: 0.04,
        }
    }
}

/// Result of [`flute`]: buffers index-aligned with the inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlutedMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

/// Carve flutes into a Y-axis cylinder.
///
/// For a vertex at angle `θ = atan2(z, x)` the radius is scaled by
/// `1 + sin(θ·n)·depth`, leaving `y` untouched. Its normal is pushed along the
/// tangent (`atan2(nz, nx) + π/2`) by `cos(θ·n)·depth`, the derivative of the
/// radial profile. The horizontal part is then rescaled to `√(1 − ny²)`, so the
/// vertical component is kept exactly and the normal stays unit length.
///
/// Vertices on the axis (`ρ = 0`) and normals with no horizontal component
/// (cap normals) pass through unchanged.
pub fn flute(
    positions: &[f32],
    normals: &[f32],
    params: &FluteParams,
) -> Result<FlutedMesh, MeshError> {
    check_triples(positions)?;
    if normals.len() != positions.len() {
        return Err(MeshError::LengthMismatch {
            positions: positions.len(),
            normals: normals.len(),
        });
    }

    let mut out = FlutedMesh {
        positions: positions.to_vec(),
        normals: normals.to_vec(),
    };
    if params.depth == 0.0 {
        return Ok(out);
    }

    let flutes = params.flute_count as f32;
    let mut axis_vertices = 0usize;

    for (p, n) in out
        .positions
        .chunks_exact_mut(3)
        .zip(out.normals.chunks_exact_mut(3))
    {
        let (x, z) = (p[0], p[2]);
        let rho = (x * x + z * z).sqrt();
        if rho == 0.0 {
            axis_vertices += 1;
            continue;
        }

        let theta = z.atan2(x);
        let modulation = 1.0 + (theta * flutes).sin() * params.depth;
        p[0] = x * modulation;
        p[2] = z * modulation;

        let (nx, nz) = (n[0], n[2]);
        if nx == 0.0 && nz == 0.0 {
            continue;
        }
        let tangent = nz.atan2(nx) + FRAC_PI_2;
        let correction = (theta * flutes).cos() * params.depth;
        // Only the horizontal part is rescaled, so `ny` survives and the
        // normal stays unit length.
        let horizontal = glam::Vec2::new(
            nx + tangent.cos() * correction,
            nz + tangent.sin() * correction,
        );
        let reach = (1.0 - n[1] * n[1]).max(0.0).sqrt();
        let horizontal = horizontal.normalize_or_zero() * reach;
        n[0] = horizontal.x;
        n[2] = horizontal.y;
    }

    log::debug!(
        "fluted {} vertices ({} on axis) with {} flutes",
        positions.len() / 3,
        axis_vertices,
        params.flute_count
    );
    Ok(out)
}
