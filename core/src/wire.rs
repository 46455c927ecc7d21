//! Exact binary (de)serialization of sample and symbol arrays, for fixtures
//! and telemetry exchange with collaborating layers.

use byteorder::{ByteOrder, LittleEndian};
use num_complex::Complex64;

use crate::error::{ModemError, Result};

const SAMPLE_BYTES: usize = std::mem::size_of::<f64>();

/// Serialize samples as packed little-endian f64.
pub fn dump(samples: &[f64]) -> Vec<u8> {
    let mut bytes = vec![0u8; samples.len() * SAMPLE_BYTES];
    LittleEndian::write_f64_into(samples, &mut bytes);
    bytes
}

/// Inverse of `dump`; the round-trip is exact elementwise.
pub fn load(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.len() % SAMPLE_BYTES != 0 {
        return Err(ModemError::InvalidInputSize(format!(
            "buffer of {} bytes is not a whole number of samples",
            bytes.len()
        )));
    }
    let mut samples = vec![0.0; bytes.len() / SAMPLE_BYTES];
    LittleEndian::read_f64_into(bytes, &mut samples);
    Ok(samples)
}

/// Serialize symbols as interleaved re/im little-endian f64 pairs.
pub fn dump_symbols(symbols: &[Complex64]) -> Vec<u8> {
    let mut flat = Vec::with_capacity(symbols.len() * 2);
    for s in symbols {
        flat.push(s.re);
        flat.push(s.im);
    }
    dump(&flat)
}

/// Inverse of `dump_symbols`.
pub fn load_symbols(bytes: &[u8]) -> Result<Vec<Complex64>> {
    let flat = load(bytes)?;
    if flat.len() % 2 != 0 {
        return Err(ModemError::InvalidInputSize(format!(
            "{} values do not pair into re/im symbols",
            flat.len()
        )));
    }
    Ok(flat
        .chunks_exact(2)
        .map(|pair| Complex64::new(pair[0], pair[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_exact() {
        let x = vec![
            0.1,
            0.4,
            -0.2,
            0.6,
            f64::MIN_POSITIVE,
            5e-324, // subnormal
            1e308,
            -0.0,
            std::f64::consts::PI,
        ];
        let y = load(&dump(&x)).unwrap();
        assert_eq!(x.len(), y.len());
        for (a, b) in x.iter().zip(&y) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_empty_round_trip() {
        assert!(dump(&[]).is_empty());
        assert!(load(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_length_rejected() {
        let err = load(&[0u8; 12]).unwrap_err();
        assert!(matches!(err, ModemError::InvalidInputSize(_)));
    }

    #[test]
    fn test_symbol_round_trip() {
        let symbols = vec![
            Complex64::new(1.0, -1.0),
            Complex64::new(0.0, 0.5),
            Complex64::new(-3.25, 1e-300),
        ];
        let restored = load_symbols(&dump_symbols(&symbols)).unwrap();
        assert_eq!(symbols, restored);
    }

    #[test]
    fn test_symbol_odd_value_count_rejected() {
        // 24 bytes = 3 f64 values: loads as samples, not as re/im pairs
        assert!(load_symbols(&[0u8; 24]).is_err());
        assert!(load_symbols(&[0u8; 20]).is_err());
    }
}
