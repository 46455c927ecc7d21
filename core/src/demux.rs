//! Frame-by-frame symbol recovery from a sample stream.

use num_complex::Complex64;

use crate::carriers::CarrierBank;

/// Pull-based demultiplexer: consumes exactly one symbol period of samples
/// per emitted symbol vector and never looks ahead or rewinds.
///
/// Each `next()` reads `Nsym` samples from the underlying stream and
/// projects the frame onto every carrier:
/// `symbol[k] = (2/Nsym) * sum_n conj(carrier[k][n]) * frame[n]`.
/// A stream with fewer than `Nsym` samples left ends the sequence cleanly.
pub struct Demux<I> {
    stream: I,
    correlators: Vec<Vec<Complex64>>,
    nsym: usize,
    frame: Vec<f64>,
}

impl<I: Iterator<Item = f64>> Demux<I> {
    pub fn new(stream: I, bank: &CarrierBank) -> Self {
        Self {
            stream,
            correlators: bank.correlators().to_vec(),
            nsym: bank.nsym(),
            frame: Vec::with_capacity(bank.nsym()),
        }
    }
}

impl<I: Iterator<Item = f64>> Iterator for Demux<I> {
    type Item = Vec<Complex64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frame.clear();
        for _ in 0..self.nsym {
            self.frame.push(self.stream.next()?);
        }
        Some(
            self.correlators
                .iter()
                .map(|weights| {
                    weights
                        .iter()
                        .zip(&self.frame)
                        .fold(Complex64::new(0.0, 0.0), |acc, (w, &s)| acc + *w * s)
                })
                .collect(),
        )
    }
}
