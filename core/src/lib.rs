//! Physical-layer DSP core for an audio data modem
//!
//! Modulates complex symbols onto a set of audio-frequency carriers, recovers
//! symbol estimates from a received waveform, and designs equalizing filter
//! taps from deterministic training sequences.

pub mod carriers;
pub mod config;
pub mod demux;
pub mod equalizer;
pub mod error;
pub mod estimator;
pub mod filter;
pub mod linalg;
pub mod modulator;
pub mod training;
pub mod wire;

pub use carriers::CarrierBank;
pub use config::Config;
pub use demux::Demux;
pub use equalizer::EqualizerDesigner;
pub use error::{ModemError, Result};
pub use estimator::estimate;
pub use filter::{lfilter, FilterTaps};
pub use modulator::Modulator;

// Default session configuration
pub const SAMPLE_RATE: f64 = 32_000.0; // Hz
pub const SAMPLES_PER_SYMBOL: usize = 32;
pub const CARRIER_SPACING: f64 = SAMPLE_RATE / SAMPLES_PER_SYMBOL as f64; // 1 kHz
pub const NUM_CARRIERS: usize = 8;
pub const MIN_FREQUENCY: f64 = 1_000.0; // Hz
pub const MAX_FREQUENCY: f64 = 8_000.0; // Hz

// Training / equalization defaults
pub const DEFAULT_TRAIN_LENGTH: usize = 500;
pub const DEFAULT_TRAIN_SEED: u64 = 0;
pub const DEFAULT_EQUALIZER_ORDER: usize = 8;

/// Carrier frequencies of the default session: `NUM_CARRIERS` tones spaced
/// `CARRIER_SPACING` apart, starting at `MIN_FREQUENCY`.
pub fn default_frequencies() -> Vec<f64> {
    (0..NUM_CARRIERS)
        .map(|k| MIN_FREQUENCY + k as f64 * CARRIER_SPACING)
        .collect()
}
