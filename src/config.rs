//! Settings shared by the analysis and synthesis stages.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::detector::VocalBand;
use crate::error::{HarmonizerError, Result};

pub const DEFAULT_SAMPLE_RATE: usize = 44100;
pub const DEFAULT_FRAME_DURATION: f64 = 0.25;

/// Harmonic interval chosen for the harmony line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interval {
    MinorThird,
    MajorThird,
    PerfectFourth,
    #[default]
    PerfectFifth,
    Octave,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::MinorThird,
        Interval::MajorThird,
        Interval::PerfectFourth,
        Interval::PerfectFifth,
        Interval::Octave,
    ];

    /// Frequency ratio between the two notes of the interval.
    pub fn ratio(&self) -> f64 {
        match self {
            Interval::MinorThird => 1.2,
            Interval::MajorThird => 1.25,
            Interval::PerfectFourth => 1.33,
            Interval::PerfectFifth => 1.5,
            Interval::Octave => 2.,
        }
    }

    /// Select an interval by its menu number, 1 (minor third) to 5 (octave).
    pub fn from_menu(choice: u8) -> Result<Self> {
        match choice {
            1..=5 => Ok(Self::ALL[usize::from(choice) - 1]),
            _ => Err(HarmonizerError::invalid_param(
                "interval",
                format!("menu choice {} is not between 1 and 5", choice),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Interval::MinorThird => "minor third",
            Interval::MajorThird => "major third",
            Interval::PerfectFourth => "perfect fourth",
            Interval::PerfectFifth => "perfect fifth",
            Interval::Octave => "octave",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interval {
    type Err = HarmonizerError;

    /// Accepts a menu number ("4"), a name ("perfect fifth", "perfect-fifth")
    /// or the short names "fourth" and "fifth".
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        if let Ok(choice) = s.parse::<u8>() {
            return Interval::from_menu(choice);
        }
        match s.as_str() {
            "minor third" => Ok(Interval::MinorThird),
            "major third" => Ok(Interval::MajorThird),
            "perfect fourth" | "fourth" => Ok(Interval::PerfectFourth),
            "perfect fifth" | "fifth" => Ok(Interval::PerfectFifth),
            "octave" => Ok(Interval::Octave),
            _ => Err(HarmonizerError::invalid_param(
                "interval",
                format!("unknown interval '{}'", s),
            )),
        }
    }
}

/// Time base used by the synthesizer for each frame's sine segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeAxis {
    /// `t_k = k / sample_rate`: each segment plays at its own frequency.
    #[default]
    FrameLocal,
    /// Every segment spans `[0, duration]` inclusive in `n` evenly spaced
    /// points. Pitches come out scaled by `duration / frame_duration`.
    Stretched,
}

impl FromStr for TimeAxis {
    type Err = HarmonizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frame-local" | "local" => Ok(TimeAxis::FrameLocal),
            "stretched" => Ok(TimeAxis::Stretched),
            other => Err(HarmonizerError::invalid_param(
                "time_axis",
                format!("unknown time axis '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonizerConfig {
    pub sample_rate: usize,
    /// Seconds per analysis frame.
    pub frame_duration: f64,
    pub vocal_band: VocalBand,
    /// Length of the recording in seconds. `None` uses every whole frame of
    /// the input.
    pub recording_duration: Option<f64>,
    pub interval: Interval,
    pub time_axis: TimeAxis,
}

impl Default for HarmonizerConfig {
    fn default() -> Self {
        HarmonizerConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            frame_duration: DEFAULT_FRAME_DURATION,
            vocal_band: VocalBand::default(),
            recording_duration: None,
            interval: Interval::default(),
            time_axis: TimeAxis::default(),
        }
    }
}

impl HarmonizerConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check the values that do not depend on the input buffer. Frame and
    /// band bounds are checked when the detector is built.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(HarmonizerError::invalid_param(
                "sample_rate",
                "must be greater than zero",
            ));
        }
        let band = self.vocal_band;
        if !(band.low_hz.is_finite() && band.high_hz.is_finite())
            || band.low_hz < 0.
            || band.low_hz > band.high_hz
        {
            return Err(HarmonizerError::invalid_param(
                "vocal_band",
                format!(
                    "[{}, {}] Hz is not a valid frequency range",
                    band.low_hz, band.high_hz
                ),
            ));
        }
        if let Some(duration) = self.recording_duration {
            if !duration.is_finite() || duration <= 0. {
                return Err(HarmonizerError::invalid_param(
                    "recording_duration",
                    format!("must be a positive number of seconds, got {}", duration),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios() {
        let ratios: Vec<f64> = Interval::ALL.iter().map(Interval::ratio).collect();
        assert_eq!(ratios, vec![1.2, 1.25, 1.33, 1.5, 2.]);
    }

    #[test]
    fn menu_choices() {
        assert_eq!(Interval::from_menu(1).unwrap(), Interval::MinorThird);
        assert_eq!(Interval::from_menu(5).unwrap(), Interval::Octave);
        assert!(Interval::from_menu(0).is_err());
        assert!(Interval::from_menu(6).is_err());
    }

    #[test]
    fn parse_interval() {
        assert_eq!("4".parse::<Interval>().unwrap(), Interval::PerfectFifth);
        assert_eq!("Major-Third".parse::<Interval>().unwrap(), Interval::MajorThird);
        assert_eq!("fourth".parse::<Interval>().unwrap(), Interval::PerfectFourth);
        assert!("tritone".parse::<Interval>().is_err());
    }

    #[test]
    fn json_fills_in_defaults() {
        let config = HarmonizerConfig::from_json(
            r#"{ "frame_duration": 0.5, "interval": "octave", "time_axis": "stretched" }"#,
        )
        .unwrap();
        assert_eq!(config.frame_duration, 0.5);
        assert_eq!(config.interval, Interval::Octave);
        assert_eq!(config.time_axis, TimeAxis::Stretched);
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.vocal_band, VocalBand::default());
        assert_eq!(config.recording_duration, None);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let result = HarmonizerConfig::from_json("{ frame_duration: }");
        assert!(matches!(result, Err(HarmonizerError::Config(_))));
    }

    #[test]
    fn validation() {
        assert!(HarmonizerConfig::default().validate().is_ok());

        let mut config = HarmonizerConfig::default();
        config.vocal_band = VocalBand::new(1000., 65.);
        assert!(config.validate().is_err());

        let mut config = HarmonizerConfig::default();
        config.recording_duration = Some(0.);
        assert!(config.validate().is_err());

        let mut config = HarmonizerConfig::default();
        config.sample_rate = 0;
        assert!(config.validate().is_err());
    }
}
