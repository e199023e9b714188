use crate::errors::{ExtractionError, Result};
use crate::materials::Substrate;
use crate::math::Scalar;

/// Role a conductor plays in the cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConductorRole {
    /// The ground conductor every loop returns through (index 0).
    Return,
    /// A signal line (indices 1..=N).
    Signal,
}

impl ConductorRole {
    /// Role implied by a conductor's position in the ordered list.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Return
        } else {
            Self::Signal
        }
    }
}

/// Rectangular conductor cross-section with its mesh and substrate settings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Conductor {
    /// Optional label used in diagnostics.
    pub name: Option<String>,
    /// Width in meters.
    pub width: Scalar,
    /// Thickness in meters.
    pub height: Scalar,
    /// Lower-left corner, x (m).
    pub x: Scalar,
    /// Lower-left corner, y (m).
    pub y: Scalar,
    /// Edge-cell fraction of the graded mesh, in (0, 1). Unused for the return conductor.
    pub grading: Scalar,
    /// Cells across the width.
    pub nw: usize,
    /// Cells across the thickness.
    pub nh: usize,
    /// Dielectric beneath the conductor.
    pub substrate: Substrate,
}

impl Conductor {
    /// Conductor of `width` x `height` at `(x, y)` with a 10 x 10 mesh,
    /// grading 0.5 and no substrate.
    #[must_use]
    pub fn new(width: Scalar, height: Scalar, x: Scalar, y: Scalar) -> Self {
        Self {
            name: None,
            width,
            height,
            x,
            y,
            grading: 0.5,
            nw: 10,
            nh: 10,
            substrate: Substrate::air(),
        }
    }

    /// Sets the mesh divisions.
    #[must_use]
    pub fn with_mesh(mut self, nw: usize, nh: usize) -> Self {
        self.nw = nw;
        self.nh = nh;
        self
    }

    /// Sets the grading parameter of the signal mesh.
    #[must_use]
    pub fn with_grading(mut self, grading: Scalar) -> Self {
        self.grading = grading;
        self
    }

    /// Places the conductor on `substrate`.
    #[must_use]
    pub fn with_substrate(mut self, substrate: Substrate) -> Self {
        self.substrate = substrate;
        self
    }

    /// Attaches a label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of mesh cells `nw * nh`.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.nw * self.nh
    }

    /// Label for diagnostics, falling back to `line{index}`.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("line{index}"))
    }

    /// Checks that the conductor at `index` can be meshed in its role.
    ///
    /// A conductor with exactly zero width or thickness is reported as
    /// [`ExtractionError::SingularMatrix`]: its filaments would carry no current
    /// and the impedance system has no solution.
    pub fn validate(&self, index: usize) -> Result<()> {
        let role = ConductorRole::from_index(index);
        let bad = |reason: String| Err(ExtractionError::geometry(index, reason));

        for (what, value) in [("width", self.width), ("height", self.height), ("x", self.x), ("y", self.y)] {
            if !value.is_finite() {
                return bad(format!("{what} must be finite, got {value}"));
            }
        }
        if self.width < 0.0 || self.height < 0.0 {
            return bad(format!(
                "width and height must be positive, got {} x {}",
                self.width, self.height
            ));
        }
        if self.width == 0.0 || self.height == 0.0 {
            return Err(ExtractionError::SingularMatrix {
                stage: "mesh",
                reason: format!("conductor {index} has zero cross-sectional area"),
            });
        }
        if self.nw == 0 || self.nh == 0 {
            return bad(format!("mesh divisions must be positive, got {} x {}", self.nw, self.nh));
        }
        if self.nw % 2 != 0 {
            return bad(format!("nw must be even, got {}", self.nw));
        }
        if role == ConductorRole::Signal {
            if self.nh % 2 != 0 {
                return bad(format!("nh must be even, got {}", self.nh));
            }
            if !(self.grading > 0.0 && self.grading < 1.0) {
                return bad(format!("grading must lie in (0, 1), got {}", self.grading));
            }
        }

        let s = &self.substrate;
        if !(s.permittivity >= 0.0) {
            return bad(format!("relative permittivity must be non-negative, got {}", s.permittivity));
        }
        if !(s.loss_tangent >= 0.0) {
            return bad(format!("loss tangent must be non-negative, got {}", s.loss_tangent));
        }
        if !(s.height >= 0.0) {
            return bad(format!("substrate height must be non-negative, got {}", s.height));
        }
        Ok(())
    }
}
