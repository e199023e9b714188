//! Physical constants and fixed model parameters.
//!
//! ## Accuracy
//!
//! The speed of light is exact by SI definition (2019 revision). The partial
//! inductance kernel folds μ₀/4π into the fixed scale [`KERNEL_SCALE`], which
//! assumes the pre-2019 exact value μ₀ = 4π × 10⁻⁷ H/m; the difference to the
//! CODATA value is below one part in 10⁹ and far beneath the mesh error.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - W. T. Weeks et al., "Resistive and Inductive Skin Effect in Rectangular
//!   Conductors", IBM J. Res. Develop., vol. 23, no. 6, Nov. 1979.

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permeability μ₀ in henries per meter (H/m), nominal 4π × 10⁻⁷.
pub const VACUUM_PERMEABILITY: Scalar = 4.0 * PI * 1.0e-7;
/// Speed of light in vacuum _c_ in meters per second (m/s).
/// Exact value by SI definition (2019): 299,792,458 m/s.
pub const SPEED_OF_LIGHT: Scalar = 299_792_458.0;
/// Conductivity of annealed copper in siemens per meter (S/m), as used for
/// every filament's DC resistance.
pub const COPPER_CONDUCTIVITY: Scalar = 58.0e6;
/// μ₀/4π in H/m; scales the dimensionless Weeks integral to H/m.
pub const KERNEL_SCALE: Scalar = 1.0e-7;
/// Constant offset of the Weeks closed form (25/6) that absorbs the
/// self-inductance singularity of the logarithmic Green's function.
pub const KERNEL_SELF_OFFSET: Scalar = 25.0 / 6.0;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}
