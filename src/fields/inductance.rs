//! Closed-form partial inductance between rectangular current filaments.
//!
//! The mutual partial inductance per unit length of two parallel, infinitely
//! long rectangular bars is the four-fold integral of the logarithmic Green's
//! function over both cross-sections. Weeks et al. give a closed form as an
//! inclusion–exclusion sum of one primitive `F` over the 16 pairwise corner
//! differences of the two rectangles.
//!
//! ## References
//!
//! - W. T. Weeks, L. L. Wu, M. F. McAllister and A. Singh, "Resistive and
//!   Inductive Skin Effect in Rectangular Conductors", IBM J. Res. Develop.,
//!   vol. 23, no. 6, pp. 652–660, Nov. 1979, eq. (5).

use std::cmp::Ordering;

use crate::constants::{KERNEL_SCALE, KERNEL_SELF_OFFSET};
use crate::geometry::Filament;
use crate::math::Scalar;

/// Corner-difference signs of the inclusion–exclusion expansion, indexed as
/// `(p1 - q1, p1 - q2, p2 - q1, p2 - q2)`.
const SIGNS: [Scalar; 4] = [1.0, -1.0, -1.0, 1.0];

/// One term of the Weeks primitive for the offset `(x, y)` with squares
/// `(x2, y2)` supplied by the caller.
#[inline]
fn weeks_term(x: Scalar, y: Scalar, x2: Scalar, y2: Scalar) -> Scalar {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    if x == 0.0 {
        return y2 * y2 * y2.ln() / 24.0;
    }
    if y == 0.0 {
        return x2 * x2 * x2.ln() / 24.0;
    }
    (x2 * x2 - 6.0 * x2 * y2 + y2 * y2) * (x2 + y2).ln() / 24.0
        - x * y * (x2 * (y / x).atan() + y2 * (x / y).atan()) / 3.0
}

/// Orders two filaments so that both argument orders evaluate identically.
fn canonical<'a>(a: &'a Filament, b: &'a Filament) -> (&'a Filament, &'a Filament) {
    let key = |f: &Filament| [f.x1, f.x2, f.y1, f.y2];
    let ordering = key(a)
        .iter()
        .zip(key(b).iter())
        .map(|(p, q)| p.total_cmp(q))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal);
    if ordering == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}

/// Partial inductance per unit length (H/m) between filaments `a` and `b`,
/// assuming free-space permeability.
///
/// `partial_inductance(a, b) == partial_inductance(b, a)` holds bit for bit.
/// Both filaments must have non-zero area.
#[must_use]
pub fn partial_inductance(a: &Filament, b: &Filament) -> Scalar {
    let (p, q) = canonical(a, b);

    let dx = [p.x1 - q.x1, p.x1 - q.x2, p.x2 - q.x1, p.x2 - q.x2];
    let dy = [p.y1 - q.y1, p.y1 - q.y2, p.y2 - q.y1, p.y2 - q.y2];
    let dx2 = dx.map(|v| v * v);
    let dy2 = dy.map(|v| v * v);

    let mut sum = 0.0;
    for i in 0..4 {
        for j in 0..4 {
            sum += SIGNS[i] * SIGNS[j] * weeks_term(dx[i], dy[j], dx2[i], dy2[j]);
        }
    }
    sum /= (p.area() * q.area()).abs();

    KERNEL_SCALE * (sum + KERNEL_SELF_OFFSET)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{LN_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    fn unit_square_self() -> Scalar {
        // -2 ln(GMD) of a square, GMD = a * exp(ln 2 / 3 + π / 3 - 25 / 12).
        KERNEL_SCALE * (25.0 / 6.0 - 2.0 * PI / 3.0 - 2.0 * LN_2 / 3.0)
    }

    #[test]
    fn unit_square_self_term_matches_geometric_mean_distance() {
        let e = Filament::new(0.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(partial_inductance(&e, &e), unit_square_self(), max_relative = 1.0e-12);
    }

    #[test]
    fn self_term_scales_logarithmically_with_size() {
        let a = 1.0e-4;
        let e = Filament::new(5.0e-4, 5.0e-4 + a, -2.0e-4, -2.0e-4 + a);
        let expected = unit_square_self() - 2.0 * KERNEL_SCALE * a.ln();
        assert_relative_eq!(partial_inductance(&e, &e), expected, max_relative = 1.0e-9);
    }

    #[test]
    fn distant_filaments_behave_like_line_currents() {
        let a = Filament::new(0.0, 1.0, 0.0, 1.0);
        let b = Filament::new(3.0, 4.0, 0.0, 1.0);
        assert_relative_eq!(
            partial_inductance(&a, &b) / KERNEL_SCALE,
            -2.0 * 3.0_f64.ln(),
            max_relative = 1.0e-3
        );
    }

    #[test]
    fn kernel_is_exactly_symmetric() {
        let cells = [
            Filament::new(0.0, 1.0e-5, 0.0, 2.0e-6),
            Filament::new(3.3e-5, 4.1e-5, 2.0e-4, 2.02e-4),
            Filament::new(-7.0e-6, 1.0e-6, 1.0e-6, 3.5e-6),
            Filament::new(0.0, 1.0e-5, 2.0e-6, 4.0e-6),
        ];
        for a in &cells {
            for b in &cells {
                assert_eq!(partial_inductance(a, b), partial_inductance(b, a));
            }
        }
    }

    #[test]
    fn mutual_term_is_below_self_terms() {
        let a = Filament::new(0.0, 1.0e-5, 0.0, 2.0e-6);
        let b = Filament::new(1.0e-5, 2.0e-5, 0.0, 2.0e-6);
        let m = partial_inductance(&a, &b);
        assert!(m < partial_inductance(&a, &a));
        assert!(m < partial_inductance(&b, &b));
    }
}
