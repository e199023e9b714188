//! YAML input documents.
//!
//! ```yaml
//! frequency: 30e6
//! conductors:
//!   - name: ground
//!     w: 2800.0e-6
//!     h: 2.0e-6
//!     nw: 20
//!     nh: 2
//!   - name: line1
//!     w: 300.0e-6
//!     h: 2.0e-6
//!     x: 1250.0e-6
//!     y: 200.0e-6
//!     er: 4.4
//!     substrate_h: 200.0e-6
//!     tan_delta: 0.02
//! ```
//!
//! The first conductor is the return conductor. Omitted keys take the defaults
//! below and unknown keys are ignored.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{ExtractionError, Result};
use crate::geometry::Conductor;
use crate::materials::Substrate;
use crate::math::Scalar;
use crate::network::LossAttribution;
use crate::simulation::{ExtractionConfig, DEFAULT_FREQUENCY};

/// Largest number of conductors accepted in one document.
pub const MAX_CONDUCTORS: usize = 10;

#[derive(Debug, Deserialize)]
struct InputDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_frequency")]
    frequency: Scalar,
    #[serde(default)]
    loss_attribution: LossAttribution,
    #[serde(default)]
    conductors: Vec<ConductorEntry>,
}

#[derive(Debug, Deserialize)]
struct ConductorEntry {
    #[serde(default)]
    name: Option<String>,
    w: Scalar,
    h: Scalar,
    #[serde(default)]
    x: Scalar,
    #[serde(default)]
    y: Scalar,
    #[serde(default = "default_grading")]
    b: Scalar,
    #[serde(default = "default_divisions")]
    nw: usize,
    #[serde(default = "default_divisions")]
    nh: usize,
    #[serde(default = "default_permittivity")]
    er: Scalar,
    #[serde(default)]
    substrate_h: Scalar,
    #[serde(default)]
    tan_delta: Scalar,
}

const fn default_frequency() -> Scalar {
    DEFAULT_FREQUENCY
}

const fn default_grading() -> Scalar {
    0.5
}

const fn default_divisions() -> usize {
    10
}

const fn default_permittivity() -> Scalar {
    1.0
}

impl From<ConductorEntry> for Conductor {
    fn from(entry: ConductorEntry) -> Self {
        let conductor = Self::new(entry.w, entry.h, entry.x, entry.y)
            .with_mesh(entry.nw, entry.nh)
            .with_grading(entry.b)
            .with_substrate(Substrate::new(entry.er, entry.substrate_h, entry.tan_delta));
        match entry.name {
            Some(name) => conductor.with_name(name),
            None => conductor,
        }
    }
}

/// Parses an input document.
///
/// Fails with [`ExtractionError::Config`] when the YAML is malformed, when
/// fewer than two or more than [`MAX_CONDUCTORS`] conductors are listed, or
/// when a conductor is missing `w` or `h`.
pub fn load_yaml(source: &str) -> Result<ExtractionConfig> {
    parse_document(source, "extraction")
}

/// Reads and parses the input document at `path`. Unnamed documents take the
/// file stem as their name.
pub fn load_yaml_file(path: impl AsRef<Path>) -> Result<ExtractionConfig> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("extraction");
    parse_document(&source, stem)
}

fn parse_document(source: &str, fallback_name: &str) -> Result<ExtractionConfig> {
    let doc: InputDocument = serde_yaml::from_str(source).map_err(|err| ExtractionError::Config(err.to_string()))?;

    match doc.conductors.len() {
        n if n < 2 => {
            return Err(ExtractionError::Config(format!(
                "need a return conductor and at least one signal line, got {n} conductor(s)"
            )))
        }
        n if n > MAX_CONDUCTORS => {
            return Err(ExtractionError::Config(format!(
                "at most {MAX_CONDUCTORS} conductors are supported, got {n}"
            )))
        }
        _ => {}
    }

    let conductors: Vec<Conductor> = doc.conductors.into_iter().map(Conductor::from).collect();
    for (index, c) in conductors.iter().enumerate() {
        debug!(
            conductor = %c.label(index),
            w = c.width,
            h = c.height,
            er = c.substrate.permittivity,
            substrate_h = c.substrate.height,
            tan_delta = c.substrate.loss_tangent,
            "conductor loaded"
        );
    }

    let name = doc.name.unwrap_or_else(|| fallback_name.to_owned());
    Ok(ExtractionConfig::new(name, doc.frequency, conductors).with_attribution(doc.loss_attribution))
}
