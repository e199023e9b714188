//! Dielectric substrate models.
//!
//! The substrate under a strip is reduced to a single homogeneous medium using
//! the Hammerstad–Jensen effective permittivity, and its loss tangent is turned
//! into an equivalent series resistance per unit length that the assembler adds
//! to the filament resistances.
//!
//! ## References
//!
//! - E. Hammerstad and Ø. Jensen, "Accurate Models for Microstrip Computer-Aided
//!   Design", IEEE MTT-S Int. Microwave Symp. Dig., 1980, pp. 407–409.
//! - D. M. Pozar, *Microwave Engineering*, 4th ed., §3.8 (dielectric attenuation).

use crate::constants::SPEED_OF_LIGHT;
use crate::math::Scalar;

/// Dielectric substrate beneath a conductor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Substrate {
    /// Relative permittivity εr.
    pub permittivity: Scalar,
    /// Distance from the conductor to its reference plane in meters.
    pub height: Scalar,
    /// Loss tangent tan δ.
    pub loss_tangent: Scalar,
}

impl Substrate {
    /// No substrate: air, zero height, lossless.
    #[must_use]
    pub const fn air() -> Self {
        Self {
            permittivity: 1.0,
            height: 0.0,
            loss_tangent: 0.0,
        }
    }

    /// FR4 glass epoxy (εr = 4.4, tan δ = 0.02 at 1 GHz).
    #[must_use]
    pub const fn fr4(height: Scalar) -> Self {
        Self::new(4.4, height, 0.02)
    }

    /// Rogers RO4003C (εr = 3.38, tan δ = 0.0027).
    #[must_use]
    pub const fn rogers_4003c(height: Scalar) -> Self {
        Self::new(3.38, height, 0.0027)
    }

    /// Rogers RO4350B (εr = 3.48, tan δ = 0.0027).
    #[must_use]
    pub const fn rogers_4350b(height: Scalar) -> Self {
        Self::new(3.48, height, 0.0027)
    }

    /// Alumina ceramic (εr = 9.8, tan δ = 0.001).
    #[must_use]
    pub const fn alumina(height: Scalar) -> Self {
        Self::new(9.8, height, 0.001)
    }

    /// PTFE (εr = 2.1). Treated as lossless.
    #[must_use]
    pub const fn ptfe(height: Scalar) -> Self {
        Self::new(2.1, height, 0.0)
    }

    /// Substrate with explicit parameters.
    #[must_use]
    pub const fn new(permittivity: Scalar, height: Scalar, loss_tangent: Scalar) -> Self {
        Self {
            permittivity,
            height,
            loss_tangent,
        }
    }

    /// True when a substrate is actually present under the conductor.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.height > 0.0
    }

    /// Effective permittivity seen by a strip of width `width` on this substrate.
    #[must_use]
    pub fn effective_permittivity(&self, width: Scalar) -> Scalar {
        calc_eff_dielectric(width, self.height, self.permittivity)
    }

    /// Dielectric loss of a strip of width `width` at angular frequency `omega`.
    #[must_use]
    pub fn series_loss(&self, omega: Scalar, width: Scalar) -> Scalar {
        calc_dielectric_loss(self.permittivity, self.loss_tangent, omega, width, self.height)
    }
}

impl Default for Substrate {
    fn default() -> Self {
        Self::air()
    }
}

/// Hammerstad–Jensen effective permittivity of a strip of width `w` at height
/// `h` above its reference plane on a substrate of relative permittivity `er`.
///
/// Returns `1.0` without a substrate (`h <= 0`), for air-like media
/// (`er <= 1`) and for a degenerate strip (`w <= 0`). Otherwise the result lies
/// strictly between 1 and `er`.
#[must_use]
pub fn calc_eff_dielectric(w: Scalar, h: Scalar, er: Scalar) -> Scalar {
    if h <= 0.0 || er <= 1.0 || w <= 0.0 {
        return 1.0;
    }

    let u = w / h;
    let u4 = u.powi(4);
    let a = 1.0
        + ((u4 + (u / 52.0).powi(2)) / (u4 + 0.432)).ln() / 49.0
        + (1.0 + (u / 18.1).powi(3)).ln() / 18.7;
    let b = 0.564 * ((er - 0.9) / (er + 3.0)).powf(0.053);

    (er + 1.0) / 2.0 + (er - 1.0) / 2.0 * (1.0 + 10.0 / u).powf(-a * b)
}

/// Equivalent series resistance per unit length (Ω/m) of the dielectric loss
/// under a strip of width `w` at height `h`, at angular frequency `omega`.
///
/// α_d = (ω √εeff / c) · (εr − 1)/(εeff − 1) · (εeff / εr) · tan δ
///
/// Zero when `tan_delta <= 0`, `h <= 0`, or the medium is air-like (`er <= 1`),
/// where the filling-factor ratio is undefined.
#[must_use]
pub fn calc_dielectric_loss(er: Scalar, tan_delta: Scalar, omega: Scalar, w: Scalar, h: Scalar) -> Scalar {
    if tan_delta <= 0.0 || h <= 0.0 || er <= 1.0 {
        return 0.0;
    }

    let eff = calc_eff_dielectric(w, h, er);
    if eff <= 1.0 {
        return 0.0;
    }

    (omega * eff.sqrt() / SPEED_OF_LIGHT) * ((er - 1.0) / (eff - 1.0)) * (eff / er) * tan_delta
}
