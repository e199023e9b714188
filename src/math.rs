//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::DMatrix;

use crate::errors::{ExtractionError, Result};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances and admittances.
pub type CScalar = num_complex::Complex<Scalar>;
/// Dense complex matrix (impedance or admittance).
pub type CMatrix = DMatrix<CScalar>;
/// Dense real matrix (resistance, inductance, magnitude).
pub type RMatrix = DMatrix<Scalar>;

/// Reserves a zeroed `rows x cols` buffer without aborting the process on
/// exhaustion.
pub(crate) fn try_zeroed<T: Clone>(rows: usize, cols: usize, zero: T) -> Result<Vec<T>> {
    let len = rows
        .checked_mul(cols)
        .ok_or(ExtractionError::AllocationFailure { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ExtractionError::AllocationFailure { rows, cols })?;
    data.resize(len, zero);
    Ok(data)
}

/// Reserves an empty vector able to hold `len` items.
pub(crate) fn try_with_capacity<T>(len: usize) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ExtractionError::AllocationFailure { rows: len, cols: 1 })?;
    Ok(data)
}

/// Allocates a zeroed square complex matrix of order `n`.
pub fn try_complex_zeros(n: usize) -> Result<CMatrix> {
    let data = try_zeroed(n, n, CScalar::new(0.0, 0.0))?;
    Ok(CMatrix::from_vec(n, n, data))
}

/// Largest element-wise relative deviation between two complex matrices,
/// measured against the largest magnitude in `reference`.
#[must_use]
pub fn max_relative_deviation(value: &CMatrix, reference: &CMatrix) -> Scalar {
    let scale = reference.iter().map(|z| z.norm()).fold(0.0, Scalar::max);
    if scale == 0.0 {
        return value.iter().map(|z| z.norm()).fold(0.0, Scalar::max);
    }
    value
        .iter()
        .zip(reference.iter())
        .map(|(a, b)| (a - b).norm() / scale)
        .fold(0.0, Scalar::max)
}
