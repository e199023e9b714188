//! Filament meshing of conductor cross-sections.
//!
//! The return conductor is cut into a uniform grid from which a single cell is
//! carved out as the common return filament. Signal conductors get a graded grid
//! whose cells shrink toward the edges, where skin effect crowds the current.

use tracing::debug;

use super::{Conductor, Filament};
use crate::errors::{ExtractionError, Result};
use crate::math::{try_with_capacity, Scalar};

/// How a conductor is discretized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshMode {
    /// Uniform `nw x nh` grid; the cell at row 0, column `nw / 2` becomes the
    /// return filament and is kept out of the general array.
    Return,
    /// Grid graded symmetrically about both midlines.
    Graded,
}

/// Filament discretization of a whole cross-section.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Every filament except the return filament; return-conductor cells first,
    /// then each signal conductor in order, row-major within a conductor.
    pub filaments: Vec<Filament>,
    /// Index of the conductor owning each entry of `filaments`.
    pub owners: Vec<usize>,
    /// The common current-return reference.
    pub return_filament: Filament,
    /// Number of leading filaments that belong to the return conductor (`n0`).
    pub return_offset: usize,
    /// Filament count of each signal conductor, in conductor order.
    pub signal_counts: Vec<usize>,
}

impl Mesh {
    /// Total filament count `M` excluding the return filament.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filaments.len()
    }

    /// True when the mesh holds no general filaments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filaments.is_empty()
    }

    /// Number of signal conductors `N`.
    #[must_use]
    pub fn signal_conductors(&self) -> usize {
        self.signal_counts.len()
    }

    /// Index range of the filaments owned by signal conductor `k` (1-based
    /// conductor index, as in the conductor list).
    #[must_use]
    pub fn signal_range(&self, k: usize) -> std::ops::Range<usize> {
        let start = self.return_offset + self.signal_counts[..k - 1].iter().sum::<usize>();
        start..start + self.signal_counts[k - 1]
    }
}

/// Total number of filaments `M`: all cells of all conductors, minus the
/// extracted return filament.
pub fn filament_count(conductors: &[Conductor]) -> Result<usize> {
    let cells = conductors
        .iter()
        .try_fold(0usize, |acc, c| c.nw.checked_mul(c.nh).and_then(|n| acc.checked_add(n)))
        .ok_or(ExtractionError::AllocationFailure {
            rows: usize::MAX,
            cols: 1,
        })?;
    cells
        .checked_sub(1)
        .ok_or_else(|| ExtractionError::geometry(0, "the return conductor has no cells"))
}

/// Meshes the ordered conductor list (index 0 is the return conductor).
pub fn build_mesh(conductors: &[Conductor]) -> Result<Mesh> {
    if conductors.len() < 2 {
        return Err(ExtractionError::geometry(
            conductors.len(),
            "need a return conductor and at least one signal conductor",
        ));
    }
    for (index, conductor) in conductors.iter().enumerate() {
        conductor.validate(index)?;
    }

    let total = filament_count(conductors)?;
    let mut filaments = try_with_capacity(total)?;
    let mut owners = try_with_capacity(total)?;

    let return_filament = mesh_conductor(&conductors[0], MeshMode::Return, &mut filaments)
        .ok_or_else(|| ExtractionError::geometry(0, "return filament was not extracted"))?;
    let return_offset = filaments.len();
    owners.resize(return_offset, 0);

    let mut signal_counts = Vec::with_capacity(conductors.len() - 1);
    for (index, conductor) in conductors.iter().enumerate().skip(1) {
        let before = filaments.len();
        mesh_conductor(conductor, MeshMode::Graded, &mut filaments);
        let count = filaments.len() - before;
        owners.resize(filaments.len(), index);
        signal_counts.push(count);
    }

    debug!(
        filaments = filaments.len(),
        return_offset,
        signals = signal_counts.len(),
        "mesh built"
    );

    Ok(Mesh {
        filaments,
        owners,
        return_filament,
        return_offset,
        signal_counts,
    })
}

/// Appends the cells of `conductor` to `out`; returns the carved-out return
/// filament in [`MeshMode::Return`].
fn mesh_conductor(conductor: &Conductor, mode: MeshMode, out: &mut Vec<Filament>) -> Option<Filament> {
    match mode {
        MeshMode::Return => Some(mesh_return(conductor, out)),
        MeshMode::Graded => {
            mesh_graded(conductor, out);
            None
        }
    }
}

fn mesh_return(c: &Conductor, out: &mut Vec<Filament>) -> Filament {
    let dx = c.width / c.nw as Scalar;
    let dy = c.height / c.nh as Scalar;
    let cell = |j: usize, k: usize| {
        Filament::new(
            c.x + dx * k as Scalar,
            c.x + dx * (k + 1) as Scalar,
            c.y + dy * j as Scalar,
            c.y + dy * (j + 1) as Scalar,
        )
    };

    let carve = c.nw / 2;
    for j in 0..c.nh {
        for k in 0..c.nw {
            if (j, k) != (0, carve) {
                out.push(cell(j, k));
            }
        }
    }
    cell(0, carve)
}

fn mesh_graded(c: &Conductor, out: &mut Vec<Filament>) {
    let xs = graded_edges(c.x, c.width, c.nw, c.grading);
    let ys = graded_edges(c.y, c.height, c.nh, c.grading);
    for y in ys.windows(2) {
        for x in xs.windows(2) {
            out.push(Filament::new(x[0], x[1], y[0], y[1]));
        }
    }
}

/// Cell boundaries of a graded 1-D grid of `cells` (even) cells over
/// `[origin, origin + length]`.
///
/// Relative cell sizes grow linearly from `grading` at each edge to just below
/// 1 at the midline, in steps of `(1 - grading) / (cells / 2)`, and are scaled
/// so each half covers exactly half the length. The upper half mirrors the
/// lower half about the midline.
#[must_use]
pub fn graded_edges(origin: Scalar, length: Scalar, cells: usize, grading: Scalar) -> Vec<Scalar> {
    let half = cells / 2;
    let step = (1.0 - grading) / half as Scalar;
    let weight_sum: Scalar = (0..half).map(|k| grading + step * k as Scalar).sum();
    let scale = 0.5 * length / weight_sum;

    let mut lower = Vec::with_capacity(half);
    let mut offset = 0.0;
    for k in 0..half {
        lower.push(offset);
        offset += (grading + step * k as Scalar) * scale;
    }

    let mut edges = Vec::with_capacity(cells + 1);
    edges.extend(lower.iter().map(|d| origin + d));
    edges.push(origin + 0.5 * length);
    edges.extend(lower.iter().rev().map(|d| origin + length - d));
    edges
}
