//! Conductor cross-sections and their discretization into current filaments.

mod conductor;
mod filament;
mod mesh;

pub use conductor::{Conductor, ConductorRole};
pub use filament::Filament;
pub use mesh::{build_mesh, filament_count, graded_edges, Mesh, MeshMode};
