//! Record a mono buffer from the default input device.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::error::{HarmonizerError, Result};
use crate::signal::{whole_samples, SampleBuffer};

/// Block for `duration` seconds while recording from the default input
/// device at `sample_rate`, then return the take mixed down to mono.
pub fn record(duration: f64, sample_rate: usize) -> Result<SampleBuffer<f64>> {
    if !duration.is_finite() || duration <= 0. {
        return Err(HarmonizerError::invalid_param(
            "duration",
            format!("must be a positive number of seconds, got {}", duration),
        ));
    }
    let rate = u32::try_from(sample_rate).map_err(|_| {
        HarmonizerError::invalid_param("sample_rate", format!("{} Hz is too high", sample_rate))
    })?;

    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| HarmonizerError::capture("no input device available"))?;
    let default = device
        .default_input_config()
        .map_err(|e| HarmonizerError::capture(format!("no default input config: {}", e)))?;
    let channels = usize::from(default.channels());
    log::info!(
        "recording {} s from {} ({} channels, {:?}) at {} Hz",
        duration,
        device.name().unwrap_or_default(),
        channels,
        default.sample_format(),
        sample_rate
    );

    let config = cpal::StreamConfig {
        channels: default.channels(),
        sample_rate: cpal::SampleRate(rate),
        buffer_size: cpal::BufferSize::Default,
    };
    let take: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&take);
    let on_error = |err: cpal::StreamError| log::error!("audio input error: {}", err);

    let stream = match default.sample_format() {
        cpal::SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut buf) = sink.lock() {
                    buf.extend_from_slice(data);
                }
            },
            on_error,
            None,
        ),
        cpal::SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                if let Ok(mut buf) = sink.lock() {
                    buf.extend(data.iter().map(|&s| f32::from(s) / 32768.));
                }
            },
            on_error,
            None,
        ),
        cpal::SampleFormat::U16 => device.build_input_stream(
            &config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| {
                if let Ok(mut buf) = sink.lock() {
                    buf.extend(data.iter().map(|&s| (f32::from(s) - 32768.) / 32768.));
                }
            },
            on_error,
            None,
        ),
        other => {
            return Err(HarmonizerError::capture(format!(
                "unsupported input sample format {:?}",
                other
            )))
        }
    }
    .map_err(|e| HarmonizerError::capture(format!("failed to build input stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| HarmonizerError::capture(format!("failed to start input stream: {}", e)))?;
    thread::sleep(Duration::from_secs_f64(duration));
    drop(stream);

    let interleaved = match take.lock() {
        Ok(mut buf) => std::mem::take(&mut *buf),
        Err(_) => return Err(HarmonizerError::capture("capture buffer was poisoned")),
    };
    let mut samples = to_mono(&interleaved, channels);
    let wanted = whole_samples(duration, sample_rate);
    if samples.len() < wanted {
        log::debug!("padding {} missing samples with silence", wanted - samples.len());
    }
    // Device start-up latency can leave the take a little short.
    samples.resize(wanted, 0.);

    SampleBuffer::new(samples, sample_rate)
}

/// Average each interleaved sample frame of `channels` values.
fn to_mono(interleaved: &[f32], channels: usize) -> Vec<f64> {
    match channels {
        0 => Vec::new(),
        1 => interleaved.iter().map(|&s| f64::from(s)).collect(),
        _ => interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().map(|&s| f64::from(s)).sum::<f64>() / channels as f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_passes_through() {
        assert_eq!(to_mono(&[0.5, -0.25], 1), vec![0.5, -0.25]);
    }

    #[test]
    fn stereo_is_averaged() {
        assert_eq!(to_mono(&[0.5, 0., -1., -0.5, 0.25], 2), vec![0.25, -0.75]);
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(record(0., 44100).is_err());
    }
}
