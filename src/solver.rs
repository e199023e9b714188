//! Dense complex LU factorization and inversion.
//!
//! Gaussian elimination with partial pivoting on a [`CMatrix`], factored in
//! place so a matrix and its inverse are the only two live buffers during an
//! inversion. Pivots are chosen by the largest `|re| + |im|` in the column;
//! an exactly zero pivot aborts with [`ExtractionError::SingularMatrix`].
//! There is no iterative refinement.
//!
//! The inverse is built column by column from `L U x = P e_i`: a forward solve
//! with the implicit unit diagonal of `L`, starting at the first non-zero of
//! the permuted basis vector, then a back solve against the explicit diagonal
//! of `U`. Columns are independent and run on `rayon` workers when the
//! `parallel` feature is enabled.

use std::time::{Duration, Instant};

use nalgebra::DVector;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{ExtractionError, Result};
use crate::math::{try_zeroed, CMatrix, CScalar, Scalar};

const ZERO: CScalar = CScalar::new(0.0, 0.0);
const ONE: CScalar = CScalar::new(1.0, 0.0);

/// Diagnostics gathered while inverting a matrix.
#[derive(Debug, Clone, Default)]
pub struct InversionReport {
    /// Matrix order.
    pub dimension: usize,
    /// Ratio of the largest to the smallest pivot magnitude (larger is worse).
    pub pivot_ratio: Scalar,
    /// Number of row interchanges performed.
    pub row_swaps: usize,
    /// Wall time of factorization plus column solves.
    pub elapsed: Duration,
}

/// In-place LU factorization `P A = L U` of a square complex matrix.
#[derive(Debug, Clone)]
pub struct ComplexLu {
    lu: CMatrix,
    /// `perm[k]` is the original row now at position `k`.
    perm: Vec<usize>,
    /// Position of original row `i` after pivoting.
    position: Vec<usize>,
    row_swaps: usize,
}

impl ComplexLu {
    /// Factors `matrix`, reusing its storage for the `L` and `U` factors.
    pub fn factor(mut matrix: CMatrix) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(ExtractionError::SingularMatrix {
                stage: "LU factorization",
                reason: format!("matrix must be square, got {rows}x{cols}"),
            });
        }
        let n = rows;
        let mut perm: Vec<usize> = (0..n).collect();
        let mut row_swaps = 0;

        for k in 0..n {
            let (pivot_row, magnitude) = (k..n)
                .map(|r| (r, matrix[(r, k)].l1_norm()))
                .fold((k, -1.0), |best, cand| if cand.1 > best.1 { cand } else { best });
            if !(magnitude > 0.0) {
                return Err(ExtractionError::SingularMatrix {
                    stage: "LU factorization",
                    reason: format!("zero pivot at step {k} of {n}"),
                });
            }
            if pivot_row != k {
                matrix.swap_rows(k, pivot_row);
                perm.swap(k, pivot_row);
                row_swaps += 1;
            }

            let pivot = matrix[(k, k)];
            for r in k + 1..n {
                matrix[(r, k)] /= pivot;
            }
            for c in k + 1..n {
                let u = matrix[(k, c)];
                if u == ZERO {
                    continue;
                }
                for r in k + 1..n {
                    let l = matrix[(r, k)];
                    matrix[(r, c)] -= l * u;
                }
            }
        }

        let mut position = vec![0; n];
        for (k, &row) in perm.iter().enumerate() {
            position[row] = k;
        }

        Ok(Self {
            lu: matrix,
            perm,
            position,
            row_swaps,
        })
    }

    /// Matrix order.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.perm.len()
    }

    /// Number of row interchanges performed while pivoting.
    #[must_use]
    pub fn row_swaps(&self) -> usize {
        self.row_swaps
    }

    /// Determinant of the factored matrix.
    #[must_use]
    pub fn determinant(&self) -> CScalar {
        let det = self.lu.diagonal().iter().fold(ONE, |acc, d| acc * d);
        if self.row_swaps % 2 == 0 {
            det
        } else {
            -det
        }
    }

    /// Largest over smallest pivot magnitude; a cheap conditioning indicator.
    #[must_use]
    pub fn pivot_ratio(&self) -> Scalar {
        let (min, max) = self
            .lu
            .diagonal()
            .iter()
            .map(|d| d.norm())
            .fold((Scalar::INFINITY, 0.0_f64), |(lo, hi), d| (lo.min(d), hi.max(d)));
        if self.dim() == 0 {
            1.0
        } else {
            max / min
        }
    }

    /// Solves `A x = b`.
    #[must_use]
    pub fn solve(&self, b: &DVector<CScalar>) -> DVector<CScalar> {
        let mut x = DVector::from_iterator(self.dim(), self.perm.iter().map(|&row| b[row]));
        let start = x.iter().position(|v| *v != ZERO).unwrap_or(self.dim());
        self.forward(x.as_mut_slice(), start);
        self.backward(x.as_mut_slice());
        x
    }

    /// Inverse of the factored matrix.
    pub fn inverse(&self) -> Result<CMatrix> {
        let n = self.dim();
        let mut data = try_zeroed(n, n, ZERO)?;
        if n > 0 {
            #[cfg(feature = "parallel")]
            data.par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, column)| self.solve_basis(i, column));
            #[cfg(not(feature = "parallel"))]
            data.chunks_mut(n)
                .enumerate()
                .for_each(|(i, column)| self.solve_basis(i, column));
        }
        Ok(CMatrix::from_vec(n, n, data))
    }

    /// Writes column `i` of the inverse into `x`.
    fn solve_basis(&self, i: usize, x: &mut [CScalar]) {
        x.fill(ZERO);
        let start = self.position[i];
        x[start] = ONE;
        self.forward(x, start);
        self.backward(x);
    }

    /// Forward substitution with the implicit unit diagonal of `L`; entries
    /// before `start` are zero and stay zero.
    fn forward(&self, x: &mut [CScalar], start: usize) {
        let n = self.dim();
        for r in start + 1..n {
            let mut sum = x[r];
            for c in start..r {
                sum -= self.lu[(r, c)] * x[c];
            }
            x[r] = sum;
        }
    }

    /// Back substitution against the explicit diagonal of `U`.
    fn backward(&self, x: &mut [CScalar]) {
        let last = match x.iter().rposition(|v| *v != ZERO) {
            Some(last) => last,
            None => return,
        };
        for r in (0..=last).rev() {
            let mut sum = x[r];
            for c in r + 1..=last {
                sum -= self.lu[(r, c)] * x[c];
            }
            x[r] = sum / self.lu[(r, r)];
        }
    }
}

/// Inverts `matrix`, consuming it. `stage` names the pipeline step in errors.
pub fn invert(matrix: CMatrix, stage: &'static str) -> Result<CMatrix> {
    invert_with_report(matrix, stage).map(|(inverse, _)| inverse)
}

/// Inverts `matrix` and reports pivot diagnostics.
pub fn invert_with_report(matrix: CMatrix, stage: &'static str) -> Result<(CMatrix, InversionReport)> {
    let start = Instant::now();
    let dimension = matrix.nrows();
    let lu = ComplexLu::factor(matrix).map_err(|err| match err {
        ExtractionError::SingularMatrix { reason, .. } => ExtractionError::SingularMatrix { stage, reason },
        other => other,
    })?;
    let inverse = lu.inverse()?;
    let report = InversionReport {
        dimension,
        pivot_ratio: lu.pivot_ratio(),
        row_swaps: lu.row_swaps(),
        elapsed: start.elapsed(),
    };
    tracing::trace!(stage, dimension, pivot_ratio = report.pivot_ratio, "matrix inverted");
    Ok((inverse, report))
}
