//! Peak picking on the magnitude spectrum of each frame.
//!
//! The detector takes the real FFT of a frame, ignores every bin outside the
//! vocal band and reports the frequency of the loudest remaining bin. The
//! resolution is one bin, `1 / frame_duration` Hz.

use crate::detector::internals::{bin_frequency, num_bins, BandWindow, DetectorInternals};
use crate::detector::{FrameEstimate, Pitch, PitchDetector, VocalBand};
use crate::error::{HarmonizerError, Result};
use crate::float::Float;
use crate::segment::frame_step;
use crate::utils::buffer::is_silent;
use crate::utils::peak::find_peak;

pub struct SpectralDetector<T>
where
    T: Float,
{
    internals: DetectorInternals<T>,
    sample_rate: usize,
    window: BandWindow,
}

impl<T> SpectralDetector<T>
where
    T: Float,
{
    /// Build a detector for frames of `frame_duration` seconds at `sample_rate`.
    ///
    /// Fails if a frame would hold no samples, or if `vocal_band` does not map
    /// to a non-empty window inside the spectrum.
    pub fn new(sample_rate: usize, frame_duration: f64, vocal_band: VocalBand) -> Result<Self> {
        let size = frame_step(frame_duration, sample_rate)?;
        let window = BandWindow::new(
            vocal_band.low_hz,
            vocal_band.high_hz,
            frame_duration,
            num_bins(size),
        )?;
        let internals = DetectorInternals::new(size);

        Ok(SpectralDetector {
            internals,
            sample_rate,
            window,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.internals.size
    }

    pub fn window(&self) -> BandWindow {
        self.window
    }
}

impl<T> PitchDetector<T> for SpectralDetector<T>
where
    T: Float,
{
    fn get_pitch(&mut self, frame: &[T]) -> Result<FrameEstimate<T>> {
        let size = self.internals.size;
        if frame.len() != size {
            return Err(HarmonizerError::invalid_param(
                "frame",
                format!("expected {} samples, got {}", size, frame.len()),
            ));
        }

        if frame.iter().any(|s| !s.is_finite()) {
            return Err(HarmonizerError::invalid_param(
                "frame",
                "samples must be finite numbers",
            ));
        }

        let spectrum = self.internals.magnitude_spectrum(frame);
        if is_silent(spectrum) {
            return Ok(FrameEstimate::Silence);
        }

        let floor = match find_peak(spectrum) {
            Some((_, peak)) => noise_floor(peak, size),
            None => return Ok(FrameEstimate::Silence),
        };
        let band = &spectrum[self.window.range()];

        Ok(match find_peak(band) {
            Some((idx, magnitude)) if magnitude > floor => FrameEstimate::Pitch(Pitch {
                frequency: bin_frequency(self.window.low + idx, self.sample_rate, size),
                magnitude,
            }),
            _ => FrameEstimate::OutOfBand,
        })
    }
}

/// Largest magnitude that is still FFT rounding noise for a transform of
/// `size` points whose loudest bin is `peak`.
fn noise_floor<T: Float>(peak: T, size: usize) -> T {
    let size = T::from_usize(size).unwrap_or_else(T::max_value);
    peak * size * T::epsilon()
}
