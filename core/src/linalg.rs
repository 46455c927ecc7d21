//! Dense complex least-squares solve shared by the channel estimator and the
//! equalizer designer.

use num_complex::Complex64;

use crate::error::{ModemError, Result};

// Relative column-norm threshold for declaring rank deficiency.
const RANK_THRESHOLD: f64 = 1e-12;

/// Solve `min_h |A*h - b|` for an overdetermined system given as rows of
/// `a` (one row per equation) and the right-hand side `b`.
///
/// QR by modified Gram-Schmidt, with `b` carried as a trailing column so the
/// projected right-hand side is orthogonalized in the same sweep; the
/// solution comes from back-substituting the triangular factor. Fails on
/// under-determined shapes (fewer rows than unknowns) and on rank-deficient
/// systems instead of returning a degenerate solution.
pub fn lstsq(a: &[Vec<Complex64>], b: &[Complex64]) -> Result<Vec<Complex64>> {
    let rows = a.len();
    let cols = a.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(ModemError::Underdetermined { rows, cols });
    }
    if a.iter().any(|row| row.len() != cols) {
        return Err(ModemError::InvalidInputSize(
            "design matrix rows have unequal lengths".into(),
        ));
    }
    if b.len() != rows {
        return Err(ModemError::InvalidInputSize(format!(
            "{rows} rows against {} right-hand sides",
            b.len()
        )));
    }
    if rows < cols {
        return Err(ModemError::Underdetermined { rows, cols });
    }

    let zero = Complex64::new(0.0, 0.0);

    // Column-major copy of A with b as the trailing column.
    let mut columns: Vec<Vec<Complex64>> = (0..cols)
        .map(|j| (0..rows).map(|i| a[i][j]).collect())
        .collect();
    columns.push(b.to_vec());

    let scale = columns[..cols]
        .iter()
        .map(|col| col_norm(col))
        .fold(f64::MIN_POSITIVE, f64::max);

    let mut q: Vec<Vec<Complex64>> = Vec::with_capacity(cols);
    let mut r = vec![zero; cols * (cols + 1)];

    for (j, column) in columns.iter().enumerate() {
        let mut v = column.clone();
        for (i, qi) in q.iter().enumerate() {
            let dot = qi
                .iter()
                .zip(&v)
                .fold(zero, |acc, (qk, vk)| acc + qk.conj() * *vk);
            r[i * (cols + 1) + j] = dot;
            for (vk, qk) in v.iter_mut().zip(qi) {
                *vk -= dot * *qk;
            }
        }
        if j < cols {
            let norm = col_norm(&v);
            if norm < scale * RANK_THRESHOLD {
                return Err(ModemError::SingularSystem);
            }
            r[j * (cols + 1) + j] = Complex64::new(norm, 0.0);
            for vk in v.iter_mut() {
                *vk /= norm;
            }
            q.push(v);
        }
    }

    // Back-substitute R x = (projected b)
    let mut x = vec![zero; cols];
    for i in (0..cols).rev() {
        let mut sum = r[i * (cols + 1) + cols];
        for k in (i + 1)..cols {
            sum -= r[i * (cols + 1) + k] * x[k];
        }
        x[i] = sum / r[i * (cols + 1) + i];
    }
    Ok(x)
}

fn col_norm(v: &[Complex64]) -> f64 {
    v.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
}
