use crate::math::Scalar;

/// Axis-aligned rectangular mesh cell carrying a uniform current density.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filament {
    /// Left edge (m).
    pub x1: Scalar,
    /// Right edge (m).
    pub x2: Scalar,
    /// Bottom edge (m).
    pub y1: Scalar,
    /// Top edge (m).
    pub y2: Scalar,
}

impl Filament {
    /// Rectangle spanning `[x1, x2] x [y1, y2]`.
    #[must_use]
    pub const fn new(x1: Scalar, x2: Scalar, y1: Scalar, y2: Scalar) -> Self {
        Self { x1, x2, y1, y2 }
    }

    /// Horizontal extent (m).
    #[must_use]
    pub fn width(&self) -> Scalar {
        self.x2 - self.x1
    }

    /// Vertical extent (m).
    #[must_use]
    pub fn height(&self) -> Scalar {
        self.y2 - self.y1
    }

    /// Cross-sectional area (m²).
    #[must_use]
    pub fn area(&self) -> Scalar {
        self.width() * self.height()
    }

    /// Geometric center `(x, y)`.
    #[must_use]
    pub fn centroid(&self) -> (Scalar, Scalar) {
        (0.5 * (self.x1 + self.x2), 0.5 * (self.y1 + self.y2))
    }

    /// DC resistance per unit length (Ω/m) for conductivity `sigma` (S/m).
    #[must_use]
    pub fn dc_resistance(&self, sigma: Scalar) -> Scalar {
        1.0 / (sigma * self.area())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::COPPER_CONDUCTIVITY;

    #[test]
    fn area_and_resistance_of_copper_cell() {
        let f = Filament::new(0.0, 10.0e-6, 0.0, 2.0e-6);
        assert_relative_eq!(f.area(), 2.0e-11, max_relative = 1.0e-12);
        assert_relative_eq!(f.centroid().0, 5.0e-6, max_relative = 1.0e-12);
        assert_relative_eq!(
            f.dc_resistance(COPPER_CONDUCTIVITY),
            862.068_965_517_241_4,
            max_relative = 1.0e-9
        );
    }
}
