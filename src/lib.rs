//! # Harmonizer
//! *harmonizer* estimates the dominant pitch of a monophonic vocal recording
//! in fixed-length frames and renders those pitches back as a pure-tone
//! "harmony" track.
//!
//! # Pipeline
//!   * [segment][segment::segment] splits the recording into non-overlapping frames.
//!   * [SpectralDetector][detector::spectral::SpectralDetector] picks the
//!     loudest FFT bin inside the vocal band of each frame.
//!   * [synthesize][synth::synthesize] turns the frequency of every frame into a
//!     sine segment of 16-bit samples.
//!
//! [Harmonizer][pipeline::Harmonizer] wires the three together, and the
//! [wav] module reads recordings from and writes harmonies to disk.
//!
//! # Examples
//! ```
//! use harmonizer::config::HarmonizerConfig;
//! use harmonizer::pipeline::Harmonizer;
//! use harmonizer::signal::SampleBuffer;
//!
//! fn main() {
//!     const SAMPLE_RATE: usize = 44100;
//!
//!     // One second of a 220 Hz tone, from a microphone, a file, etc...
//!     let dt = 1.0 / SAMPLE_RATE as f64;
//!     let freq = 220.0;
//!     let signal: Vec<f64> = (0..SAMPLE_RATE)
//!         .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!     let recording = SampleBuffer::new(signal, SAMPLE_RATE).unwrap();
//!
//!     let mut harmonizer = Harmonizer::new(HarmonizerConfig::default()).unwrap();
//!     let harmony = harmonizer.process(recording).unwrap();
//!
//!     assert_eq!(harmony.notes.as_slice(), &[220.0; 4]);
//!     assert_eq!(harmony.samples.len(), SAMPLE_RATE);
//! }
//! ```

pub use detector::{FrequencySequence, Pitch};
pub use error::{HarmonizerError, Result};

#[cfg(feature = "record")]
pub mod capture;
pub mod config;
pub mod detector;
pub mod error;
pub mod float;
pub mod pipeline;
pub mod segment;
pub mod signal;
pub mod synth;
pub mod utils;
pub mod wav;
