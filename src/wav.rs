//! Reading recordings from and writing harmonies to WAV files.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{HarmonizerError, Result};
use crate::signal::SampleBuffer;

/// Decode a WAV file into a mono buffer.
///
/// Integer samples are scaled into `[-1, 1]`. Files with several channels are
/// mixed down by averaging each sample frame.
pub fn read_wav(path: impl AsRef<Path>) -> Result<SampleBuffer<f64>> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels);
    if channels == 0 {
        return Err(HarmonizerError::invalid_param(
            "channels",
            format!("{} declares no channels", path.display()),
        ));
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f64 * scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let samples = if channels == 1 {
        interleaved
    } else {
        log::info!(
            "mixing {} channels of {} down to mono",
            channels,
            path.display()
        );
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    };

    log::debug!(
        "read {} samples at {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.display()
    );
    SampleBuffer::new(samples, spec.sample_rate as usize)
}

/// Encode `buffer` as 16-bit mono PCM.
pub fn write_wav(path: impl AsRef<Path>, buffer: &SampleBuffer<i16>) -> Result<()> {
    let sample_rate = u32::try_from(buffer.sample_rate()).map_err(|_| {
        HarmonizerError::invalid_param(
            "sample_rate",
            format!("{} Hz does not fit a WAV header", buffer.sample_rate()),
        )
    })?;
    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::debug!(
        "wrote {} samples to {}",
        buffer.len(),
        path.as_ref().display()
    );
    Ok(())
}
