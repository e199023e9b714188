use tracing::debug_span;

use super::{AdmittanceMatrix, ImpedanceMatrix};
use crate::errors::{ExtractionError, Result};
use crate::math::{try_complex_zeros, CScalar};
use crate::solver::{invert_with_report, InversionReport};

/// Collapses the filament admittance matrix `y` into an N x N per-conductor
/// admittance matrix.
///
/// Filaments of signal conductor `k` occupy the `counts[k]` consecutive rows
/// and columns starting at `return_offset + counts[..k].sum()`. Entry `(i, k)`
/// of the result is the sum of the `(i, k)` block: the filaments of a
/// conductor are in parallel, so their admittances add.
pub fn reduce_admittance(y: &AdmittanceMatrix, return_offset: usize, counts: &[usize]) -> Result<AdmittanceMatrix> {
    let expected = return_offset + counts.iter().sum::<usize>();
    if y.nrows() != expected || y.ncols() != expected {
        return Err(ExtractionError::geometry(
            0,
            format!(
                "filament counts cover {expected} filaments but the admittance matrix is {}x{}",
                y.nrows(),
                y.ncols()
            ),
        ));
    }

    let starts: Vec<usize> = counts
        .iter()
        .scan(return_offset, |next, &count| {
            let start = *next;
            *next += count;
            Some(start)
        })
        .collect();

    let n = counts.len();
    let mut reduced = try_complex_zeros(n)?;
    for k in 0..n {
        for i in 0..n {
            reduced[(i, k)] = y
                .view((starts[i], starts[k]), (counts[i], counts[k]))
                .iter()
                .fold(CScalar::new(0.0, 0.0), |acc, v| acc + v);
        }
    }
    Ok(reduced)
}

/// Reduces the filament admittance matrix and inverts the result, giving the
/// N x N per-conductor impedance matrix (Ω/m). Consumes `y`.
pub fn reduce_to_conductors(
    y: AdmittanceMatrix,
    return_offset: usize,
    counts: &[usize],
) -> Result<(ImpedanceMatrix, InversionReport)> {
    let _span = debug_span!("reduce", conductors = counts.len()).entered();
    let reduced = reduce_admittance(&y, return_offset, counts)?;
    drop(y);
    invert_with_report(reduced, "conductor reduction")
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::CMatrix;

    #[test]
    fn blocks_are_summed_per_conductor_pair() {
        // One return filament, then conductors with 2 and 3 filaments.
        let y = CMatrix::from_fn(6, 6, |i, j| CScalar::new((i * 10 + j) as f64, 1.0));
        let reduced = reduce_admittance(&y, 1, &[2, 3]).unwrap();
        assert_eq!(reduced.shape(), (2, 2));
        // rows 1..3 x cols 1..3
        assert_relative_eq!(reduced[(0, 0)].re, 11.0 + 12.0 + 21.0 + 22.0);
        // rows 1..3 x cols 3..6
        assert_relative_eq!(reduced[(0, 1)].re, 13.0 + 14.0 + 15.0 + 23.0 + 24.0 + 25.0);
        assert_relative_eq!(reduced[(1, 0)].re, 31.0 + 32.0 + 41.0 + 42.0 + 51.0 + 52.0);
        assert_relative_eq!(reduced[(1, 1)].im, 9.0);
    }

    #[test]
    fn parallel_filaments_combine_like_resistors() {
        // Two isolated 2 Ω filaments in parallel give 1 Ω.
        let y = CMatrix::from_diagonal_element(2, 2, CScalar::new(0.5, 0.0));
        let (z, report) = reduce_to_conductors(y, 0, &[2]).unwrap();
        assert_eq!(report.dimension, 1);
        assert_relative_eq!(z[(0, 0)].re, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn mismatched_counts_are_rejected() {
        let y = CMatrix::zeros(4, 4);
        assert!(reduce_admittance(&y, 1, &[2]).is_err());
    }
}
