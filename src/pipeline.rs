//! Recording in, harmony out.

use crate::config::{HarmonizerConfig, Interval};
use crate::detector::spectral::SpectralDetector;
use crate::detector::{estimate_with, FrequencySequence};
use crate::error::{HarmonizerError, Result};
use crate::float::Float;
use crate::segment::segment;
use crate::signal::{whole_samples, SampleBuffer};
use crate::synth::{synthesize, ToneParameters};

/// Everything produced by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Harmony {
    /// Detected frequency of each frame of the recording.
    pub notes: FrequencySequence,
    /// Frequencies that were rendered.
    pub harmony: FrequencySequence,
    pub interval: Interval,
    pub samples: SampleBuffer<i16>,
}

pub struct Harmonizer<T>
where
    T: Float,
{
    config: HarmonizerConfig,
    detector: SpectralDetector<T>,
}

impl<T> Harmonizer<T>
where
    T: Float,
{
    pub fn new(config: HarmonizerConfig) -> Result<Self> {
        config.validate()?;
        let detector =
            SpectralDetector::new(config.sample_rate, config.frame_duration, config.vocal_band)?;

        if let Some(duration) = config.recording_duration {
            let samples = whole_samples(duration, config.sample_rate);
            let step = detector.frame_size();
            if samples == 0 || samples % step != 0 {
                return Err(HarmonizerError::invalid_param(
                    "recording_duration",
                    format!(
                        "{} s ({} samples) is not a whole number of {} s frames",
                        duration, samples, config.frame_duration
                    ),
                ));
            }
        }

        Ok(Harmonizer { config, detector })
    }

    pub fn config(&self) -> &HarmonizerConfig {
        &self.config
    }

    /// Analyse `recording` and render its harmony.
    ///
    /// The recording must be non-empty and at the configured sample rate. With
    /// a `recording_duration`, it is cut to that length and must be at least
    /// that long; otherwise every whole frame is used.
    pub fn process(&mut self, mut recording: SampleBuffer<T>) -> Result<Harmony> {
        let sample_rate = self.config.sample_rate;
        let frame_duration = self.config.frame_duration;

        if recording.is_empty() {
            return Err(HarmonizerError::invalid_param(
                "recording",
                "buffer holds no samples",
            ));
        }
        if recording.sample_rate() != sample_rate {
            return Err(HarmonizerError::invalid_param(
                "sample_rate",
                format!(
                    "recording is at {} Hz but the harmonizer is configured for {} Hz",
                    recording.sample_rate(),
                    sample_rate
                ),
            ));
        }

        let duration = match self.config.recording_duration {
            Some(duration) => {
                let wanted = whole_samples(duration, sample_rate);
                if recording.len() < wanted {
                    return Err(HarmonizerError::invalid_param(
                        "recording_duration",
                        format!(
                            "{} s needs {} samples, recording has {}",
                            duration,
                            wanted,
                            recording.len()
                        ),
                    ));
                }
                recording.truncate(wanted);
                duration
            }
            None => {
                let step = self.detector.frame_size();
                (recording.len() / step * step) as f64 / sample_rate as f64
            }
        };

        let segmentation = segment(&recording, frame_duration)?;
        log::info!(
            "analysing {} frames of {} samples ({} s)",
            segmentation.len(),
            segmentation.frame_step(),
            duration
        );
        if segmentation.is_empty() {
            return Err(HarmonizerError::invalid_param(
                "recording",
                format!(
                    "{} samples is shorter than one {} s frame",
                    recording.len(),
                    frame_duration
                ),
            ));
        }

        let notes = estimate_with(&mut self.detector, segmentation.frames())?;

        // The interval is reported but not applied: the harmony line repeats
        // the detected notes.
        let harmony = FrequencySequence::new(notes.as_slice().to_vec());

        let params = ToneParameters::new(duration, frame_duration, sample_rate)
            .with_time_axis(self.config.time_axis);
        let samples = synthesize(harmony.as_slice(), &params)?;

        Ok(Harmony {
            notes,
            harmony,
            interval: self.config.interval,
            samples,
        })
    }
}
