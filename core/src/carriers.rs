//! Complex-exponential carrier bank shared by the modulator, the
//! demultiplexer and the equalizer designer.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::{ModemError, Result};

/// One symbol period of `exp(i*omega*n)` for `n` in `0..len`.
pub fn exp_iwt(omega: f64, len: usize) -> Vec<Complex64> {
    (0..len)
        .map(|n| Complex64::from_polar(1.0, omega * n as f64))
        .collect()
}

/// Immutable set of carriers, one per configured frequency, each sampled at
/// the system rate over exactly one symbol period.
///
/// The bank also precomputes the conjugated, `2/Nsym`-scaled correlator for
/// each carrier; `Demux` and `EqualizerDesigner` both project frames against
/// these, so modulation and demodulation always agree on geometry.
#[derive(Debug, Clone)]
pub struct CarrierBank {
    frequencies: Vec<f64>,
    carriers: Vec<Vec<Complex64>>,
    correlators: Vec<Vec<Complex64>>,
    nsym: usize,
    sample_rate: f64,
}

impl CarrierBank {
    pub fn new(frequencies: &[f64], nsym: usize, sample_rate: f64) -> Result<Self> {
        if nsym == 0 {
            return Err(ModemError::InvalidConfig(
                "symbol period must be positive".into(),
            ));
        }
        if !(sample_rate > 0.0) {
            return Err(ModemError::InvalidConfig(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        if frequencies.is_empty() {
            return Err(ModemError::InvalidConfig(
                "at least one carrier frequency is required".into(),
            ));
        }
        for &f in frequencies {
            if !(f > 0.0) || f >= sample_rate / 2.0 {
                return Err(ModemError::InvalidConfig(format!(
                    "carrier frequency {f} outside (0, {})",
                    sample_rate / 2.0
                )));
            }
        }

        let carriers: Vec<Vec<Complex64>> = frequencies
            .iter()
            .map(|&f| exp_iwt(2.0 * PI * f / sample_rate, nsym))
            .collect();
        let scale = 2.0 / nsym as f64;
        let correlators = carriers
            .iter()
            .map(|c| c.iter().map(|z| z.conj() * scale).collect())
            .collect();

        Ok(Self {
            frequencies: frequencies.to_vec(),
            carriers,
            correlators,
            nsym,
            sample_rate,
        })
    }

    /// Number of carriers.
    pub fn nfreq(&self) -> usize {
        self.carriers.len()
    }

    /// Samples per symbol period.
    pub fn nsym(&self) -> usize {
        self.nsym
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Configured frequencies, in carrier order.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Synthesis waveforms, in the same order as `frequencies()`.
    pub fn carriers(&self) -> &[Vec<Complex64>] {
        &self.carriers
    }

    /// Analysis weights: `conj(carrier) * 2/Nsym`, one row per carrier.
    pub fn correlators(&self) -> &[Vec<Complex64>] {
        &self.correlators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> CarrierBank {
        CarrierBank::new(&[1_000.0, 2_000.0, 3_000.0], 8, 8_000.0).unwrap()
    }

    #[test]
    fn test_carrier_geometry() {
        let bank = bank();
        assert_eq!(bank.nfreq(), 3);
        assert_eq!(bank.nsym(), 8);
        for c in bank.carriers() {
            assert_eq!(c.len(), 8);
        }
        assert_eq!(bank.frequencies(), &[1_000.0, 2_000.0, 3_000.0]);
    }

    #[test]
    fn test_carriers_have_unit_magnitude() {
        for c in bank().carriers().iter().flatten() {
            assert!((c.norm() - 1.0).abs() < 1e-15);
        }
    }

    #[test]
    fn test_exp_iwt_phase_step() {
        let w = exp_iwt(PI / 2.0, 4);
        assert!((w[0] - Complex64::new(1.0, 0.0)).norm() < 1e-15);
        assert!((w[1] - Complex64::new(0.0, 1.0)).norm() < 1e-15);
        assert!((w[2] - Complex64::new(-1.0, 0.0)).norm() < 1e-15);
        assert!((w[3] - Complex64::new(0.0, -1.0)).norm() < 1e-15);
    }

    #[test]
    fn test_correlator_recovers_own_carrier() {
        // (2/Nsym) * sum conj(c_k) * Re(c_j) == delta(j, k) for bin-aligned tones
        let bank = bank();
        for (k, corr) in bank.correlators().iter().enumerate() {
            for (j, carrier) in bank.carriers().iter().enumerate() {
                let sum = corr
                    .iter()
                    .zip(carrier)
                    .fold(Complex64::new(0.0, 0.0), |acc, (w, c)| acc + *w * c.re);
                let expected = if j == k { 1.0 } else { 0.0 };
                assert!(
                    (sum - Complex64::new(expected, 0.0)).norm() < 1e-12,
                    "carrier {j} against correlator {k}: {sum}"
                );
            }
        }
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(CarrierBank::new(&[1_000.0], 0, 8_000.0).is_err());
        assert!(CarrierBank::new(&[1_000.0], 8, 0.0).is_err());
        assert!(CarrierBank::new(&[1_000.0], 8, -8_000.0).is_err());
        assert!(CarrierBank::new(&[], 8, 8_000.0).is_err());
        assert!(CarrierBank::new(&[4_000.0], 8, 8_000.0).is_err()); // Nyquist
        assert!(CarrierBank::new(&[-100.0], 8, 8_000.0).is_err());
        assert!(CarrierBank::new(&[0.0], 8, 8_000.0).is_err());
    }
}
