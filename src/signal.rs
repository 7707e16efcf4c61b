//! Mono sample buffers tagged with their sampling rate.

use crate::error::{HarmonizerError, Result};

/// Absorbs the representation error of products like `0.7 * 44100.0`,
/// which would otherwise floor one sample short.
const SAMPLE_EPSILON: f64 = 1e-6;

/// Number of whole samples covered by `seconds` at `sample_rate`.
///
/// This is `floor(seconds * sample_rate)`, tolerant of values that land a hair
/// below an integer because of binary floating point.
pub fn whole_samples(seconds: f64, sample_rate: usize) -> usize {
    let exact = seconds * sample_rate as f64;
    if !exact.is_finite() || exact <= 0. {
        return 0;
    }
    (exact + SAMPLE_EPSILON).floor() as usize
}

/// An ordered run of mono samples at a fixed sampling rate.
///
/// Analysis works on `SampleBuffer<f32>`/`SampleBuffer<f64>`; the synthesizer
/// produces `SampleBuffer<i16>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<T> {
    samples: Vec<T>,
    sample_rate: usize,
}

impl<T> SampleBuffer<T> {
    pub fn new(samples: Vec<T>, sample_rate: usize) -> Result<Self> {
        if sample_rate == 0 {
            return Err(HarmonizerError::invalid_param(
                "sample_rate",
                "must be greater than zero",
            ));
        }
        Ok(SampleBuffer {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    pub fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    /// Always 1: buffers are mono.
    pub fn channels(&self) -> u16 {
        1
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Keep only the first `len` samples.
    pub fn truncate(&mut self, len: usize) {
        self.samples.truncate(len);
    }
}
