//! Render a frequency sequence as a run of pure sine segments.
//!
//! Each frame becomes `floor(frame_duration * sample_rate)` samples of
//! `i16::MAX * sin(2 pi f t)`. All segments share one time vector, so the phase
//! restarts at every frame boundary. A frequency of 0 renders as silence.

use std::f64::consts::PI;

use crate::config::TimeAxis;
use crate::error::{HarmonizerError, Result};
use crate::segment::frame_step;
use crate::signal::{whole_samples, SampleBuffer};

/// Peak amplitude of the rendered tone.
pub const AMPLITUDE: f64 = i16::MAX as f64;

/// Timing shared with the analysis stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParameters {
    /// Total length of the output in seconds.
    pub duration: f64,
    pub frame_duration: f64,
    pub sample_rate: usize,
    pub time_axis: TimeAxis,
}

impl ToneParameters {
    pub fn new(duration: f64, frame_duration: f64, sample_rate: usize) -> Self {
        ToneParameters {
            duration,
            frame_duration,
            sample_rate,
            time_axis: TimeAxis::default(),
        }
    }

    pub fn with_time_axis(mut self, time_axis: TimeAxis) -> Self {
        self.time_axis = time_axis;
        self
    }
}

/// The `n` sample times, in seconds, reused by every frame.
fn time_vector(params: &ToneParameters, n: usize) -> Vec<f64> {
    match params.time_axis {
        TimeAxis::FrameLocal => {
            let dt = 1.0 / params.sample_rate as f64;
            (0..n).map(|k| k as f64 * dt).collect()
        }
        TimeAxis::Stretched => {
            let dt = match n {
                0 | 1 => 0.,
                _ => params.duration / (n - 1) as f64,
            };
            (0..n).map(|k| k as f64 * dt).collect()
        }
    }
}

pub fn synthesize(frequencies: &[f64], params: &ToneParameters) -> Result<SampleBuffer<i16>> {
    if params.sample_rate == 0 {
        return Err(HarmonizerError::invalid_param(
            "sample_rate",
            "must be greater than zero",
        ));
    }
    if !params.duration.is_finite() || params.duration <= 0. {
        return Err(HarmonizerError::invalid_param(
            "duration",
            format!("must be a positive number of seconds, got {}", params.duration),
        ));
    }

    let n = frame_step(params.frame_duration, params.sample_rate)?;
    let expected = whole_samples(params.duration, params.sample_rate);
    let actual = frequencies.len() * n;
    if actual != expected {
        return Err(HarmonizerError::BufferSizeMismatch { expected, actual });
    }

    let t = time_vector(params, n);
    let mut samples = Vec::with_capacity(expected);
    for &freq in frequencies {
        let omega = 2. * PI * freq;
        // `as` truncates toward zero, matching an integer cast of the float wave.
        samples.extend(t.iter().map(|&tk| (AMPLITUDE * (omega * tk).sin()) as i16));
    }

    log::debug!(
        "synthesized {} frames of {} samples at {} Hz",
        frequencies.len(),
        n,
        params.sample_rate
    );

    SampleBuffer::new(samples, params.sample_rate)
}
