//! Geometry for waves and the wet decals they leave behind.
//!
//! Generators only read wave state. They run after the simulation step and
//! produce camera-relative quads that are turned into a Bevy [`Mesh`].
//!
//! [`Mesh`]: bevy::render::mesh::Mesh

pub mod mesh;
pub mod overlay;
pub mod wave_mesh;

pub use mesh::*;
pub use overlay::*;
pub use wave_mesh::*;
