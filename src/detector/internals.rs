use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::{HarmonizerError, Result};
use crate::float::Float;
use crate::utils::buffer::{copy_real_to_complex, modulus, new_complex_buffer, new_real_buffer};

/// Number of non-negative frequency bins of a real signal of length `size`.
///
/// Equal to `ceil((size + 1) / 2)`.
pub fn num_bins(size: usize) -> usize {
    size / 2 + 1
}

/// Frequency in Hz of bin `k` for a transform of `size` samples.
pub fn bin_frequency(k: usize, sample_rate: usize, size: usize) -> f64 {
    k as f64 * sample_rate as f64 / size as f64
}

/// The FFT plan and buffers needed to analyse frames of one size.
/// Planning and allocating happen once; every frame reuses them.
pub struct DetectorInternals<T>
where
    T: Float,
{
    pub size: usize,
    fft: Arc<dyn Fft<T>>,
    signal_complex: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
    magnitudes: Vec<T>,
}

impl<T> DetectorInternals<T>
where
    T: Float,
{
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = new_complex_buffer(fft.get_inplace_scratch_len());

        DetectorInternals {
            size,
            fft,
            signal_complex: new_complex_buffer(size),
            scratch,
            magnitudes: new_real_buffer(num_bins(size)),
        }
    }

    /// Compute the magnitude of the non-negative frequency bins of `signal`.
    /// The returned slice has [num_bins] entries and lives until the next call.
    pub fn magnitude_spectrum(&mut self, signal: &[T]) -> &[T] {
        assert_eq!(signal.len(), self.size);

        copy_real_to_complex(signal, &mut self.signal_complex);
        self.fft
            .process_with_scratch(&mut self.signal_complex, &mut self.scratch);
        modulus(&self.signal_complex, &mut self.magnitudes);

        &self.magnitudes
    }
}

/// Bin window `low..high` searched for the dominant pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandWindow {
    pub low: usize,
    pub high: usize,
}

impl BandWindow {
    /// Map a band in Hz to bin indices: `ceil(low_hz * frame_duration)` and
    /// `floor(high_hz * frame_duration)`. Both must fall inside the spectrum
    /// and the window must be non-empty.
    pub fn new(low_hz: f64, high_hz: f64, frame_duration: f64, bins: usize) -> Result<Self> {
        let low = (low_hz * frame_duration).ceil();
        let high = (high_hz * frame_duration).floor();

        if !low.is_finite() || !high.is_finite() || low < 0. || high < 0. {
            return Err(HarmonizerError::invalid_param(
                "vocal_band",
                format!("[{}, {}] Hz does not map to bin indices", low_hz, high_hz),
            ));
        }
        let (low, high) = (low as usize, high as usize);

        if low >= high {
            return Err(HarmonizerError::invalid_param(
                "vocal_band",
                format!(
                    "[{}, {}] Hz spans no bins at {} s frames (low bin {}, high bin {})",
                    low_hz, high_hz, frame_duration, low, high
                ),
            ));
        }
        if high >= bins {
            return Err(HarmonizerError::invalid_param(
                "vocal_band",
                format!(
                    "high bin {} is outside the spectrum of {} bins",
                    high, bins
                ),
            ));
        }

        Ok(BandWindow { low, high })
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.low..self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_count_matches_rfft() {
        assert_eq!(num_bins(11025), 5513);
        assert_eq!(num_bins(8), 5);
        assert_eq!(num_bins(1), 1);
    }

    #[test]
    fn bins_are_spaced_by_rate_over_size() {
        assert_eq!(bin_frequency(0, 44100, 11025), 0.);
        assert_eq!(bin_frequency(55, 44100, 11025), 220.);
    }

    #[test]
    fn magnitude_of_dc_and_nyquist() {
        let mut internals = DetectorInternals::<f64>::new(4);
        let spectrum = internals.magnitude_spectrum(&[1., -1., 1., -1.]).to_vec();
        let expected = vec![0., 0., 4.];
        for (s, e) in spectrum.iter().zip(expected.iter()) {
            assert!((s - e).abs() < 1e-9, "{:?} != {:?}", spectrum, expected);
        }

        let spectrum = internals.magnitude_spectrum(&[2., 2., 2., 2.]);
        assert!((spectrum[0] - 8.).abs() < 1e-9);
        assert!(spectrum[1].abs() < 1e-9);
    }

    #[test]
    fn default_band_at_quarter_second() {
        let window = BandWindow::new(65., 1000., 0.25, num_bins(11025)).unwrap();
        assert_eq!(window, BandWindow { low: 17, high: 250 });
    }

    #[test]
    fn inverted_band_is_rejected() {
        assert!(BandWindow::new(1000., 65., 0.25, 5513).is_err());
        assert!(BandWindow::new(100., 101., 0.25, 5513).is_err());
    }

    #[test]
    fn band_past_nyquist_is_rejected() {
        // 100 samples of 0.25 s: 51 bins, 1000 Hz maps to bin 250.
        assert!(BandWindow::new(65., 1000., 0.25, num_bins(100)).is_err());
    }

    #[test]
    fn negative_band_is_rejected() {
        assert!(BandWindow::new(-400., 100., 0.25, 5513).is_err());
    }
}
