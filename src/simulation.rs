//! High-level orchestration of a single-frequency R/L extraction.
//!
//! The pipeline runs strictly downstream and owns one stage's matrices at a
//! time: mesh → impedance assembly (the mesh is dropped once `Z` is built) →
//! filament inversion (`Z` is consumed) → conductor reduction (the filament
//! admittance is consumed) → final inversion.

use std::time::{Duration, Instant};

use tracing::{debug, info, info_span};

use crate::constants::angular_frequency;
use crate::errors::{ExtractionError, Result};
use crate::geometry::{build_mesh, Conductor};
use crate::math::{CMatrix, RMatrix, Scalar};
use crate::network::{assemble_impedance, reduce_to_conductors, LossAttribution};
use crate::solver::{invert_with_report, InversionReport};

/// Default operating frequency (Hz) when an input omits one.
pub const DEFAULT_FREQUENCY: Scalar = 30.0e6;

/// Description of one extraction run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Operating frequency in hertz.
    pub frequency: Scalar,
    /// Ordered conductors; index 0 is the return conductor.
    pub conductors: Vec<Conductor>,
    /// Substrate-loss attribution for signal filaments.
    pub attribution: LossAttribution,
}

impl ExtractionConfig {
    /// Creates a configuration with owner-based loss attribution.
    #[must_use]
    pub fn new(name: impl Into<String>, frequency: Scalar, conductors: Vec<Conductor>) -> Self {
        Self {
            name: name.into(),
            frequency,
            conductors,
            attribution: LossAttribution::Owner,
        }
    }

    /// Selects the loss attribution.
    #[must_use]
    pub fn with_attribution(mut self, attribution: LossAttribution) -> Self {
        self.attribution = attribution;
        self
    }

    /// Angular frequency Ω = 2πf.
    #[must_use]
    pub fn angular_frequency(&self) -> Scalar {
        angular_frequency(self.frequency)
    }

    /// Number of signal conductors N.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.conductors.len().saturating_sub(1)
    }
}

/// Sizes and timings of a completed run.
#[derive(Debug, Clone, Default)]
pub struct ExtractionStats {
    /// Filament count M (excluding the return filament).
    pub filaments: usize,
    /// Leading filaments owned by the return conductor (n0).
    pub return_offset: usize,
    /// Time spent meshing and assembling `Z`.
    pub assembly_time: Duration,
    /// Diagnostics of the M x M inversion.
    pub filament_inversion: InversionReport,
    /// Diagnostics of the N x N inversion.
    pub conductor_inversion: InversionReport,
    /// End-to-end wall time.
    pub total_time: Duration,
}

/// Per-conductor impedance at one frequency.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Operating frequency (Hz).
    pub frequency: Scalar,
    /// Angular frequency (rad/s).
    pub omega: Scalar,
    /// N x N complex impedance per unit length (Ω/m).
    pub impedance: CMatrix,
    /// Run diagnostics.
    pub stats: ExtractionStats,
}

impl ExtractionResult {
    /// Number of signal conductors N.
    #[must_use]
    pub fn conductor_count(&self) -> usize {
        self.impedance.nrows()
    }

    /// Resistance matrix (Ω/m): real part of the impedance.
    #[must_use]
    pub fn resistance(&self) -> RMatrix {
        self.impedance.map(|z| z.re)
    }

    /// Inductance matrix (H/m): imaginary part of the impedance over Ω.
    #[must_use]
    pub fn inductance(&self) -> RMatrix {
        let omega = self.omega;
        self.impedance.map(|z| z.im / omega)
    }

    /// Impedance magnitude (Ω) at the operating frequency.
    #[must_use]
    pub fn impedance_magnitude(&self) -> RMatrix {
        self.impedance.map(|z| z.norm())
    }
}

/// Runs the full extraction described by `config`.
pub fn extract(config: &ExtractionConfig) -> Result<ExtractionResult> {
    if !(config.frequency.is_finite() && config.frequency > 0.0) {
        return Err(ExtractionError::Config(format!(
            "frequency must be positive and finite, got {}",
            config.frequency
        )));
    }

    let _span = info_span!("extract", name = %config.name, frequency = config.frequency).entered();
    let started = Instant::now();
    let omega = config.angular_frequency();

    let mesh = {
        let _span = info_span!("mesh").entered();
        build_mesh(&config.conductors)?
    };
    for (index, conductor) in config.conductors.iter().enumerate() {
        debug!(
            conductor = %conductor.label(index),
            er = conductor.substrate.permittivity,
            substrate_h = conductor.substrate.height,
            tan_delta = conductor.substrate.loss_tangent,
            "dielectric"
        );
    }
    let filaments = mesh.len();
    let return_offset = mesh.return_offset;
    let signal_counts = mesh.signal_counts.clone();
    info!(filaments, conductors = signal_counts.len(), "mesh ready");

    let z = assemble_impedance(&mesh, &config.conductors, omega, config.attribution)?;
    drop(mesh);
    let assembly_time = started.elapsed();
    info!(seconds = assembly_time.as_secs_f64(), "impedance matrix assembled");

    let (y, filament_inversion) = {
        let _span = info_span!("invert", order = filaments).entered();
        invert_with_report(z, "filament inversion")?
    };
    let (impedance, conductor_inversion) = reduce_to_conductors(y, return_offset, &signal_counts)?;

    let stats = ExtractionStats {
        filaments,
        return_offset,
        assembly_time,
        filament_inversion,
        conductor_inversion,
        total_time: started.elapsed(),
    };
    info!(seconds = stats.total_time.as_secs_f64(), "extraction finished");

    Ok(ExtractionResult {
        frequency: config.frequency,
        omega,
        impedance,
        stats,
    })
}
