//! Symbol-vector to waveform synthesis.

use num_complex::Complex64;

use crate::carriers::CarrierBank;
use crate::error::{ModemError, Result};

// Rounding slack on the unit amplitude postcondition.
const PEAK_SLACK: f64 = 1e-9;

/// Maps symbol vectors to a real waveform by weighted carrier synthesis.
///
/// Each symbol vector contributes one symbol period of
/// `Re(sum_k s[k] * carrier[k]) / Nfreq`, appended in order. The `1/Nfreq`
/// gain is derived from the bank size so that any constellation of at most
/// unit magnitude stays within the unit amplitude bound.
pub struct Modulator {
    bank: CarrierBank,
}

impl Modulator {
    pub fn new(bank: CarrierBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &CarrierBank {
        &self.bank
    }

    /// Synthesize the waveform for a sequence of symbol vectors.
    ///
    /// Every vector must have one symbol per carrier. A peak above the unit
    /// bound means the input left the supported constellation and is
    /// reported as `AmplitudeOverflow`.
    pub fn modulate(&self, symbols: &[Vec<Complex64>]) -> Result<Vec<f64>> {
        let nfreq = self.bank.nfreq();
        let nsym = self.bank.nsym();
        let carriers = self.bank.carriers();
        let gain = 1.0 / nfreq as f64;

        let mut out = Vec::with_capacity(symbols.len() * nsym);
        for (i, s) in symbols.iter().enumerate() {
            if s.len() != nfreq {
                return Err(ModemError::InvalidInputSize(format!(
                    "symbol vector {i} has {} entries for {nfreq} carriers",
                    s.len()
                )));
            }
            for n in 0..nsym {
                let sum = carriers
                    .iter()
                    .zip(s)
                    .fold(Complex64::new(0.0, 0.0), |acc, (c, &sym)| acc + sym * c[n]);
                out.push(sum.re * gain);
            }
        }

        let peak = out.iter().fold(0.0f64, |m, &v| m.max(v.abs()));
        if peak > 1.0 + PEAK_SLACK {
            return Err(ModemError::AmplitudeOverflow(peak));
        }
        Ok(out)
    }
}
