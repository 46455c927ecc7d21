//! Validated session configuration shared by both ends of the link.

use crate::carriers::CarrierBank;
use crate::demux::Demux;
use crate::equalizer::EqualizerDesigner;
use crate::error::{ModemError, Result};
use crate::modulator::Modulator;
use crate::{
    default_frequencies, DEFAULT_EQUALIZER_ORDER, DEFAULT_TRAIN_LENGTH, DEFAULT_TRAIN_SEED,
    SAMPLES_PER_SYMBOL, SAMPLE_RATE,
};

/// Everything a session needs to agree on: sample-domain geometry, carrier
/// set, and the training/equalization parameters. Building the modulator,
/// demultiplexer and designer through one `Config` guarantees their carrier
/// geometry matches.
#[derive(Debug, Clone)]
pub struct Config {
    pub sample_rate: f64,
    pub nsym: usize,
    pub frequencies: Vec<f64>,
    pub train_length: usize,
    pub train_seed: u64,
    pub equalizer_order: usize,
    /// Sample step between equalizer design offsets; `nsym` keeps them
    /// block-aligned.
    pub equalizer_stride: usize,
}

impl Config {
    pub fn new(sample_rate: f64, nsym: usize, frequencies: Vec<f64>) -> Result<Self> {
        let config = Self {
            sample_rate,
            nsym,
            frequencies,
            train_length: DEFAULT_TRAIN_LENGTH,
            train_seed: DEFAULT_TRAIN_SEED,
            equalizer_order: DEFAULT_EQUALIZER_ORDER,
            equalizer_stride: nsym,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Carrier geometry checks live in CarrierBank::new
        CarrierBank::new(&self.frequencies, self.nsym, self.sample_rate)?;
        if self.train_length == 0 {
            return Err(ModemError::InvalidConfig(
                "training length must be positive".into(),
            ));
        }
        if self.equalizer_order == 0 {
            return Err(ModemError::InvalidConfig(
                "equalizer order must be positive".into(),
            ));
        }
        if self.equalizer_stride == 0 {
            return Err(ModemError::InvalidConfig(
                "equalizer stride must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn nfreq(&self) -> usize {
        self.frequencies.len()
    }

    pub fn carrier_bank(&self) -> Result<CarrierBank> {
        CarrierBank::new(&self.frequencies, self.nsym, self.sample_rate)
    }

    pub fn modulator(&self) -> Result<Modulator> {
        Ok(Modulator::new(self.carrier_bank()?))
    }

    pub fn demux<I: Iterator<Item = f64>>(&self, stream: I) -> Result<Demux<I>> {
        Ok(Demux::new(stream, &self.carrier_bank()?))
    }

    pub fn designer(&self) -> Result<EqualizerDesigner> {
        self.validate()?;
        EqualizerDesigner::new(
            self.carrier_bank()?,
            self.train_length,
            self.train_seed,
            self.equalizer_order,
            self.equalizer_stride,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            nsym: SAMPLES_PER_SYMBOL,
            frequencies: default_frequencies(),
            train_length: DEFAULT_TRAIN_LENGTH,
            train_seed: DEFAULT_TRAIN_SEED,
            equalizer_order: DEFAULT_EQUALIZER_ORDER,
            equalizer_stride: SAMPLES_PER_SYMBOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nfreq(), crate::NUM_CARRIERS);

        let bank = config.carrier_bank().unwrap();
        assert_eq!(bank.nsym(), config.nsym);
        assert_eq!(bank.nfreq(), config.nfreq());
    }

    #[test]
    fn test_modulator_and_demux_share_geometry() {
        let config = Config::new(8_000.0, 8, vec![1_000.0, 2_000.0]).unwrap();
        let modulator = config.modulator().unwrap();
        let demux = config.demux(std::iter::empty()).unwrap();
        assert_eq!(modulator.bank().nfreq(), 2);
        drop(demux);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(Config::new(8_000.0, 0, vec![1_000.0]).is_err());
        assert!(Config::new(0.0, 8, vec![1_000.0]).is_err());
        assert!(Config::new(8_000.0, 8, vec![]).is_err());
        assert!(Config::new(8_000.0, 8, vec![5_000.0]).is_err()); // above Nyquist

        let mut config = Config::new(8_000.0, 8, vec![1_000.0]).unwrap();
        config.equalizer_order = 0;
        assert!(config.validate().is_err());
        assert!(config.designer().is_err());
    }
}
