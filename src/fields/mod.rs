//! Magnetic coupling between current filaments.

mod inductance;

pub use inductance::partial_inductance;
