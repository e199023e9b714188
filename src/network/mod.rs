//! Filament-level impedance networks and their reduction to conductor level.

use crate::math::CMatrix;

/// Impedance system assembly from a filament mesh.
pub mod assembly;
/// Block reduction of filament admittances to per-conductor quantities.
pub mod reduction;

/// Dense complex impedance matrix (Ω/m).
pub type ImpedanceMatrix = CMatrix;
/// Dense complex admittance matrix (S·m).
pub type AdmittanceMatrix = CMatrix;

pub use assembly::{assemble_impedance, LossAttribution};
pub use reduction::{reduce_admittance, reduce_to_conductors};
