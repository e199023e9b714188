#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and fixed model parameters.
pub mod constants;
/// Shared numerical aliases and fallible allocation helpers.
pub mod math;
/// Error types shared between modules.
pub mod errors;
/// Dielectric substrate models and presets.
pub mod materials;
/// Conductor cross-sections and filament meshes.
pub mod geometry;
/// Partial inductance between rectangular filaments.
pub mod fields;
/// Dense complex LU factorization and inversion.
pub mod solver;
/// Filament impedance assembly and conductor-level reduction.
pub mod network;
/// End-to-end extraction pipeline.
pub mod simulation;
/// YAML input documents.
#[cfg(feature = "yaml")]
pub mod config;
/// Report and CSV writers.
pub mod io;

/// Common exports for downstream crates.
pub mod prelude;
