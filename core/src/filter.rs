//! Causal linear (IIR/FIR) filtering over real or complex sample sequences.

use std::ops::{Add, Div, Mul, Sub};

use num_complex::Complex64;

use crate::error::{ModemError, Result};

/// Sample scalar usable by the filter recursion: `f64` for waveforms,
/// `Complex64` for symbol streams and equalizer taps.
pub trait Scalar:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl Scalar for Complex64 {
    fn zero() -> Self {
        Complex64::new(0.0, 0.0)
    }
    fn one() -> Self {
        Complex64::new(1.0, 0.0)
    }
}

/// Apply the causal recursion
/// `a[0]*y[n] = sum_k b[k]*x[n-k] - sum_{k>=1} a[k]*y[n-k]`
/// with zero initial conditions. The output has exactly the length of `x`.
///
/// `a[0]` must be non-zero; taps are normalized by it before filtering.
pub fn lfilter<T: Scalar>(b: &[T], a: &[T], x: &[T]) -> Result<Vec<T>> {
    if b.is_empty() {
        return Err(ModemError::InvalidConfig(
            "feed-forward taps must not be empty".into(),
        ));
    }
    let a0 = match a.first() {
        Some(&a0) if a0 != T::zero() => a0,
        Some(_) => {
            return Err(ModemError::InvalidConfig(
                "leading feedback tap must be non-zero".into(),
            ))
        }
        None => {
            return Err(ModemError::InvalidConfig(
                "feedback taps must not be empty".into(),
            ))
        }
    };

    let b: Vec<T> = b.iter().map(|&v| v / a0).collect();
    let a: Vec<T> = a.iter().map(|&v| v / a0).collect();

    let mut y = Vec::with_capacity(x.len());
    for n in 0..x.len() {
        let mut acc = T::zero();
        for (k, &bk) in b.iter().enumerate().take(n + 1) {
            acc = acc + bk * x[n - k];
        }
        for (k, &ak) in a.iter().enumerate().skip(1).take(n) {
            acc = acc - ak * y[n - k];
        }
        y.push(acc);
    }
    Ok(y)
}

/// Immutable feed-forward/feedback coefficient pair defining a causal LTI
/// system, e.g. an equalizer solution or a simulated channel.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTaps<T> {
    pub b: Vec<T>,
    pub a: Vec<T>,
}

impl<T: Scalar> FilterTaps<T> {
    pub fn new(b: Vec<T>, a: Vec<T>) -> Result<Self> {
        // lfilter re-validates; reject bad taps at construction instead
        if b.is_empty() {
            return Err(ModemError::InvalidConfig(
                "feed-forward taps must not be empty".into(),
            ));
        }
        match a.first() {
            Some(&a0) if a0 != T::zero() => Ok(Self { b, a }),
            _ => Err(ModemError::InvalidConfig(
                "leading feedback tap must be non-zero".into(),
            )),
        }
    }

    /// Feed-forward only taps (`a = [1]`).
    pub fn fir(b: Vec<T>) -> Result<Self> {
        Self::new(b, vec![T::one()])
    }

    pub fn filter(&self, x: &[T]) -> Result<Vec<T>> {
        lfilter(&self.b, &self.a, x)
    }
}
