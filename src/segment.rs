//! Split a sample buffer into equal, non-overlapping frames.
//!
//! A frame holds `floor(frame_duration * sample_rate)` samples. Samples past
//! the last whole frame are dropped; [Segmentation::discarded] reports how
//! many.

use crate::error::{HarmonizerError, Result};
use crate::signal::{whole_samples, SampleBuffer};

/// Number of samples in one frame of `frame_duration` seconds.
pub fn frame_step(frame_duration: f64, sample_rate: usize) -> Result<usize> {
    if !frame_duration.is_finite() || frame_duration <= 0. {
        return Err(HarmonizerError::invalid_param(
            "frame_duration",
            format!("must be a positive number of seconds, got {}", frame_duration),
        ));
    }
    match whole_samples(frame_duration, sample_rate) {
        0 => Err(HarmonizerError::invalid_param(
            "frame_duration",
            format!(
                "{} s is shorter than one sample at {} Hz",
                frame_duration, sample_rate
            ),
        )),
        step => Ok(step),
    }
}

/// The frames of one buffer, borrowed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation<'a, T> {
    frames: Vec<&'a [T]>,
    frame_step: usize,
    discarded: usize,
}

impl<'a, T> Segmentation<'a, T> {
    pub fn frames(&self) -> &[&'a [T]] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_step(&self) -> usize {
        self.frame_step
    }

    /// Trailing samples that did not fill a whole frame.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

pub fn segment<T>(buffer: &SampleBuffer<T>, frame_duration: f64) -> Result<Segmentation<'_, T>> {
    let step = frame_step(frame_duration, buffer.sample_rate())?;
    let chunks = buffer.samples().chunks_exact(step);
    let discarded = chunks.remainder().len();
    let frames: Vec<&[T]> = chunks.collect();

    if discarded > 0 {
        log::debug!(
            "dropping {} trailing samples after {} frames of {}",
            discarded,
            frames.len(),
            step
        );
    }

    Ok(Segmentation {
        frames,
        frame_step: step,
        discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize, sample_rate: usize) -> SampleBuffer<f64> {
        SampleBuffer::new((0..len).map(|i| i as f64).collect(), sample_rate).unwrap()
    }

    #[test]
    fn step_is_floored() {
        assert_eq!(frame_step(0.25, 44100).unwrap(), 11025);
        assert_eq!(frame_step(0.1, 44100).unwrap(), 4410);
        assert_eq!(frame_step(0.5, 3).unwrap(), 1);
    }

    #[test]
    fn step_below_one_sample_is_rejected() {
        assert!(frame_step(0.1, 5).is_err());
        assert!(frame_step(0., 44100).is_err());
        assert!(frame_step(-0.25, 44100).is_err());
        assert!(frame_step(f64::INFINITY, 44100).is_err());
    }

    #[test]
    fn frames_partition_the_buffer() {
        let buffer = ramp(10, 4);
        let segmentation = segment(&buffer, 0.75).unwrap();

        assert_eq!(segmentation.frame_step(), 3);
        assert_eq!(segmentation.len(), 3);
        assert_eq!(segmentation.discarded(), 1);
        assert_eq!(segmentation.frames()[0], &[0., 1., 2.][..]);
        assert_eq!(segmentation.frames()[1], &[3., 4., 5.][..]);
        assert_eq!(segmentation.frames()[2], &[6., 7., 8.][..]);
    }

    #[test]
    fn segmentation_is_deterministic() {
        let buffer = ramp(44100 + 1234, 44100);
        let first = segment(&buffer, 0.25).unwrap();
        let second = segment(&buffer, 0.25).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), (44100 + 1234) / 11025);
        assert_eq!(first.discarded(), (44100 + 1234) % 11025);
    }

    #[test]
    fn short_buffer_has_no_frames() {
        let buffer = ramp(100, 44100);
        let segmentation = segment(&buffer, 0.25).unwrap();
        assert!(segmentation.is_empty());
        assert_eq!(segmentation.discarded(), 100);
    }
}
