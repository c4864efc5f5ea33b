//! Stone geometry: vertex perturbation (hand-hewn jitter, pillar fluting),
//! the primitive buffers they operate on, and the platform's ring layout.

pub mod layout;
pub mod perturb;
pub mod primitives;

pub use layout::{BlockPlacement, RingConfig, default_rings, ring_blocks};
pub use perturb::{FluteParams, FlutedMesh, MeshError, flute, jitter};
pub use primitives::{CylinderMesh, box_positions, cylinder};
