//! Flat vertex buffers for the two shapes the platform is built from: stone
//! blocks (boxes) and pillar shafts (open cylinders around Y).

use std::f32::consts::TAU;

use glam::Vec3;

/// Positions of an axis-aligned box centred on the origin.
///
/// Four vertices per face, 24 in total, so each face can carry its own normal
/// and UVs downstream.
pub fn box_positions(width: f32, height: f32, depth: f32) -> Vec<f32> {
    let h = Vec3::new(width, height, depth) * 0.5;
    // (outward normal, u axis, v axis)
    let faces = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    ];

    let mut positions = Vec::with_capacity(24 * 3);
    for (normal, u, v) in faces {
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (normal + u * su + v * sv) * h;
            positions.extend_from_slice(&corner.to_array());
        }
    }
    positions
}

/// Side wall of a cylinder around the Y axis, index-aligned positions and normals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CylinderMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

/// Build the side wall of a Y-axis cylinder centred on the origin.
///
/// `segments + 1` columns of two vertices each (bottom, top); the seam column
/// is duplicated so UVs can wrap. Fewer than 3 segments is raised to 3.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> CylinderMesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let columns = segments as usize + 1;
    let mut mesh = CylinderMesh {
        positions: Vec::with_capacity(columns * 6),
        normals: Vec::with_capacity(columns * 6),
    };

    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        for y in [-half, half] {
            mesh.positions
                .extend_from_slice(&[cos * radius, y, sin * radius]);
            mesh.normals.extend_from_slice(&[cos, 0.0, sin]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_has_24_vertices_on_its_hull() {
        let positions = box_positions(2.0, 4.0, 6.0);
        assert_eq!(positions.len(), 72);
        for p in positions.chunks(3) {
            assert_eq!(p[0].abs(), 1.0);
            assert_eq!(p[1].abs(), 2.0);
            assert_eq!(p[2].abs(), 3.0);
        }
    }

    #[test]
    fn test_cylinder_vertices_on_radius() {
        let mesh = cylinder(0.6, 5.0, 20);
        assert_eq!(mesh.positions.len(), 21 * 2 * 3);
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        for (p, n) in mesh.positions.chunks(3).zip(mesh.normals.chunks(3)) {
            let rho = p[0].hypot(p[2]);
            assert!((rho - 0.6).abs() < 1e-5);
            assert_eq!(p[1].abs(), 2.5);
            assert!((n[0].hypot(n[2]) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cylinder_minimum_segments() {
        assert_eq!(cylinder(1.0, 1.0, 0).positions.len(), 4 * 2 * 3);
    }
}
