use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::float::Float;

pub mod internals;
pub mod spectral;

use spectral::SpectralDetector;

/// The dominant frequency found in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch<T>
where
    T: Float,
{
    pub frequency: f64,
    pub magnitude: T,
}

/// Outcome of analysing a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameEstimate<T>
where
    T: Float,
{
    Pitch(Pitch<T>),
    /// The frame carries no energy at all.
    Silence,
    /// The frame has energy, but none of it inside the vocal band.
    OutOfBand,
}

impl<T: Float> FrameEstimate<T> {
    /// Frequency in Hz, with 0 standing for silence.
    pub fn frequency(&self) -> f64 {
        match self {
            FrameEstimate::Pitch(pitch) => pitch.frequency,
            FrameEstimate::Silence | FrameEstimate::OutOfBand => 0.,
        }
    }
}

pub trait PitchDetector<T>
where
    T: Float,
{
    fn get_pitch(&mut self, frame: &[T]) -> Result<FrameEstimate<T>>;
}

/// Frequency range, in Hz, searched for the dominant pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VocalBand {
    pub low_hz: f64,
    pub high_hz: f64,
}

impl VocalBand {
    pub fn new(low_hz: f64, high_hz: f64) -> Self {
        VocalBand { low_hz, high_hz }
    }
}

impl Default for VocalBand {
    fn default() -> Self {
        VocalBand {
            low_hz: 65.,
            high_hz: 1000.,
        }
    }
}

/// Non-fatal findings raised while estimating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Frame `frame` had energy only outside the vocal band and was reported
    /// as silence.
    SilentFrameAmbiguity { frame: usize },
}

/// One frequency per frame, in frame order. A value of 0 marks silence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencySequence {
    frequencies: Vec<f64>,
    diagnostics: Vec<Diagnostic>,
}

impl FrequencySequence {
    pub fn new(frequencies: Vec<f64>) -> Self {
        FrequencySequence {
            frequencies,
            diagnostics: Vec::new(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.frequencies.iter()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn push(&mut self, frequency: f64) {
        self.frequencies.push(frequency);
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl From<Vec<f64>> for FrequencySequence {
    fn from(frequencies: Vec<f64>) -> Self {
        FrequencySequence::new(frequencies)
    }
}

/// Run `detector` over every frame and collect the frequencies in order.
pub fn estimate_with<T, D>(detector: &mut D, frames: &[&[T]]) -> Result<FrequencySequence>
where
    T: Float,
    D: PitchDetector<T> + ?Sized,
{
    let mut sequence = FrequencySequence::default();

    for (i, frame) in frames.iter().enumerate() {
        let estimate = detector.get_pitch(frame)?;
        if let FrameEstimate::OutOfBand = estimate {
            log::warn!(
                "frame {} has energy only outside the vocal band, treating it as silence",
                i
            );
            sequence.warn(Diagnostic::SilentFrameAmbiguity { frame: i });
        }
        log::debug!("frame {}: {:?}", i, estimate);
        sequence.push(estimate.frequency());
    }

    Ok(sequence)
}

/// Estimate the dominant frequency of each frame with a [SpectralDetector].
pub fn estimate<T>(
    frames: &[&[T]],
    sample_rate: usize,
    frame_duration: f64,
    vocal_band: VocalBand,
) -> Result<FrequencySequence>
where
    T: Float,
{
    let mut detector = SpectralDetector::new(sample_rate, frame_duration, vocal_band)?;
    estimate_with(&mut detector, frames)
}
