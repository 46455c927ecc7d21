//! Least-squares recovery of an unknown FIR channel from an input/output
//! signal pair.

use log::trace;
use num_complex::Complex64;

use crate::error::{ModemError, Result};
use crate::linalg::lstsq;

/// Lift a real signal into the complex domain for estimation.
pub fn complex_from_real(x: &[f64]) -> Vec<Complex64> {
    x.iter().map(|&v| Complex64::new(v, 0.0)).collect()
}

/// Estimate the taps of an unknown length-`order` FIR system assuming
/// `y[n] = sum_k h[k] * x[n-k]`.
///
/// Builds the design matrix from shifted copies of `x` (rows
/// `[x[n], x[n-1], ..., x[n-order+1]]` against `y[n]`, full rows only) and
/// solves least-squares. Noise-free: if `y` really is `x` convolved with at
/// most `order` taps, the estimate recovers them to rounding error.
pub fn estimate(x: &[Complex64], y: &[Complex64], order: usize) -> Result<Vec<Complex64>> {
    if order == 0 {
        return Err(ModemError::InvalidConfig(
            "estimator order must be positive".into(),
        ));
    }
    if x.len() != y.len() {
        return Err(ModemError::InvalidInputSize(format!(
            "input length {} does not match output length {}",
            x.len(),
            y.len()
        )));
    }

    let mut lhs = Vec::new();
    let mut rhs = Vec::new();
    for n in (order - 1)..x.len() {
        lhs.push((0..order).map(|k| x[n - k]).collect::<Vec<_>>());
        rhs.push(y[n]);
    }
    trace!("channel estimate: {} rows for order {order}", lhs.len());

    let taps = lstsq(&lhs, &rhs)?;
    if taps.iter().any(|t| !t.re.is_finite() || !t.im.is_finite()) {
        return Err(ModemError::EstimateDiverged(
            "non-finite taps from least-squares solve".into(),
        ));
    }
    Ok(taps)
}
