//! Convenience re-exports for setting up and running an extraction.

pub use crate::constants::*;
pub use crate::errors::{ExtractionError, Result};
pub use crate::fields::partial_inductance;
pub use crate::geometry::{build_mesh, Conductor, ConductorRole, Filament, Mesh, MeshMode};
pub use crate::materials::{calc_dielectric_loss, calc_eff_dielectric, Substrate};
pub use crate::math::{CMatrix, CScalar, RMatrix, Scalar};
pub use crate::network::{assemble_impedance, reduce_to_conductors, LossAttribution};
pub use crate::simulation::{extract, ExtractionConfig, ExtractionResult, ExtractionStats};
pub use crate::solver::{invert, ComplexLu, InversionReport};

#[cfg(feature = "yaml")]
pub use crate::config::{load_yaml, load_yaml_file};
