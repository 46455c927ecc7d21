//! Equalizer design from training sequences.
//!
//! The designer drives the training phase end to end: it generates the
//! reference block and its waveform, and once the caller has pushed that
//! waveform through the unknown channel it fits complex taps that map the
//! observed symbol stream back onto the reference.

use log::debug;
use num_complex::Complex64;

use crate::carriers::CarrierBank;
use crate::error::{ModemError, Result};
use crate::linalg::lstsq;
use crate::modulator::Modulator;
use crate::training::training_symbols;

pub struct EqualizerDesigner {
    bank: CarrierBank,
    train_length: usize,
    train_seed: u64,
    order: usize,
    stride: usize,
}

impl EqualizerDesigner {
    /// `stride` is the sample step between design-matrix offsets; one symbol
    /// period (`bank.nsym()`) keeps the offsets block-aligned, smaller
    /// strides give overlapping windows.
    pub fn new(
        bank: CarrierBank,
        train_length: usize,
        train_seed: u64,
        order: usize,
        stride: usize,
    ) -> Result<Self> {
        if train_length == 0 {
            return Err(ModemError::InvalidConfig(
                "training length must be positive".into(),
            ));
        }
        if order == 0 {
            return Err(ModemError::InvalidConfig(
                "equalizer order must be positive".into(),
            ));
        }
        if stride == 0 {
            return Err(ModemError::InvalidConfig(
                "equalizer stride must be positive".into(),
            ));
        }
        Ok(Self {
            bank,
            train_length,
            train_seed,
            order,
            stride,
        })
    }

    pub fn bank(&self) -> &CarrierBank {
        &self.bank
    }

    /// The reference block both ends regenerate from the shared seed.
    pub fn train_symbols(&self) -> Vec<Vec<Complex64>> {
        training_symbols(self.train_length, self.bank.nfreq(), self.train_seed)
    }

    /// The modulated reference waveform to transmit through the channel.
    pub fn training_waveform(&self) -> Result<Vec<f64>> {
        let wave = Modulator::new(self.bank.clone()).modulate(&self.train_symbols())?;
        debug!(
            "training waveform: {} blocks, {} samples",
            self.train_length,
            wave.len()
        );
        Ok(wave)
    }

    /// Observed symbol stream: the received waveform projected onto every
    /// carrier at every sample offset.
    pub fn symbol_stream(&self, signal: &[f64]) -> Vec<Vec<Complex64>> {
        let nsym = self.bank.nsym();
        let correlators = self.bank.correlators();
        if signal.len() < nsym {
            return Vec::new();
        }
        (0..=signal.len() - nsym)
            .map(|i| {
                let frame = &signal[i..i + nsym];
                correlators
                    .iter()
                    .map(|weights| {
                        weights
                            .iter()
                            .zip(frame)
                            .fold(Complex64::new(0.0, 0.0), |acc, (w, &s)| acc + *w * s)
                    })
                    .collect()
            })
            .collect()
    }

    /// Fit equalizing taps from the received training waveform.
    ///
    /// For every carrier, each block-aligned offset contributes one row: the
    /// `order` successive symbol-stream entries starting there, against the
    /// transmitted symbol for that carrier and block. All carriers are
    /// stacked into a single least-squares system, so the solution is one
    /// tap vector shared across the session's carriers.
    pub fn design(&self, received: &[f64]) -> Result<Vec<Complex64>> {
        let symbols = self.train_symbols();
        let stream = self.symbol_stream(received);
        if stream.len() < self.order {
            return Err(ModemError::Underdetermined {
                rows: 0,
                cols: self.order,
            });
        }

        let offsets: Vec<usize> = (0..=stream.len() - self.order)
            .step_by(self.stride)
            .take(symbols.len())
            .collect();
        let nfreq = self.bank.nfreq();
        debug!(
            "equalizer design: {} offsets x {} carriers, order {}",
            offsets.len(),
            nfreq,
            self.order
        );

        let mut lhs = Vec::with_capacity(offsets.len() * nfreq);
        let mut rhs = Vec::with_capacity(offsets.len() * nfreq);
        for j in 0..nfreq {
            for (i, &offset) in offsets.iter().enumerate() {
                lhs.push(
                    (0..self.order)
                        .map(|k| stream[offset + k][j])
                        .collect::<Vec<_>>(),
                );
                rhs.push(symbols[i][j]);
            }
        }

        let taps = lstsq(&lhs, &rhs)?;
        if taps.iter().any(|t| !t.re.is_finite() || !t.im.is_finite()) {
            return Err(ModemError::EstimateDiverged(
                "non-finite equalizer taps".into(),
            ));
        }
        Ok(taps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::lfilter;

    fn designer(order: usize) -> EqualizerDesigner {
        let bank = CarrierBank::new(&[1_000.0, 2_000.0, 3_000.0], 8, 8_000.0).unwrap();
        EqualizerDesigner::new(bank, 500, 0, order, 8).unwrap()
    }

    #[test]
    fn test_two_tap_channel_inverse_recovered() {
        // Channel y[n] = 4 x[n-1]; the matching equalizer is [0, 0.25].
        let designer = designer(2);
        let gain = designer.bank().nfreq() as f64;
        let x: Vec<f64> = designer
            .training_waveform()
            .unwrap()
            .into_iter()
            .map(|v| v * gain)
            .collect();
        let y = lfilter(&[0.0, 4.0], &[1.0], &x).unwrap();

        let h = designer.design(&y).unwrap();
        let err = ((h[0] - Complex64::new(0.0, 0.0)).norm_sqr()
            + (h[1] - Complex64::new(0.25, 0.0)).norm_sqr())
        .sqrt();
        assert!(err < 1e-10, "tap error {err}: {h:?}");
    }

    #[test]
    fn test_identity_channel_gives_unit_tap() {
        let designer = designer(1);
        let gain = designer.bank().nfreq() as f64;
        let x: Vec<f64> = designer
            .training_waveform()
            .unwrap()
            .into_iter()
            .map(|v| v * gain)
            .collect();

        let h = designer.design(&x).unwrap();
        assert!((h[0] - Complex64::new(1.0, 0.0)).norm() < 1e-10, "{h:?}");
    }

    #[test]
    fn test_training_waveform_is_deterministic() {
        let d1 = designer(2);
        let d2 = designer(2);
        assert_eq!(d1.training_waveform().unwrap(), d2.training_waveform().unwrap());
    }

    #[test]
    fn test_symbol_stream_shape() {
        let designer = designer(2);
        let stream = designer.symbol_stream(&vec![0.25; 20]);
        assert_eq!(stream.len(), 20 - 8 + 1);
        assert_eq!(stream[0].len(), 3);

        assert!(designer.symbol_stream(&[0.0; 7]).is_empty());
    }

    #[test]
    fn test_received_shorter_than_order_rejected() {
        let designer = designer(4);
        // Three samples: no symbol-period window fits at all
        let err = designer.design(&[0.1, 0.2, 0.3]).unwrap_err();
        assert!(matches!(err, ModemError::Underdetermined { .. }));

        // One full period still leaves fewer windows than the order needs
        let err = designer.design(&[0.1; 8]).unwrap_err();
        assert!(matches!(err, ModemError::Underdetermined { .. }));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let bank = CarrierBank::new(&[1_000.0], 8, 8_000.0).unwrap();
        assert!(EqualizerDesigner::new(bank.clone(), 0, 0, 2, 8).is_err());
        assert!(EqualizerDesigner::new(bank.clone(), 10, 0, 0, 8).is_err());
        assert!(EqualizerDesigner::new(bank, 10, 0, 2, 0).is_err());
    }
}
