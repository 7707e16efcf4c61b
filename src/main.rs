//! Harmonizer CLI - turn a vocal recording into a pure-tone harmony track.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use harmonizer::config::{HarmonizerConfig, Interval, TimeAxis};
use harmonizer::detector::VocalBand;
use harmonizer::pipeline::Harmonizer;
use harmonizer::wav::{read_wav, write_wav};

#[derive(Parser)]
#[command(name = "harmonizer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recording to analyse (WAV). With `--record`, the take is written here first
    input: PathBuf,

    /// Record this many seconds from the default input device before analysing
    #[cfg(feature = "record")]
    #[arg(long, value_name = "SECS")]
    record: Option<f64>,

    /// Where to write the harmony track
    #[arg(short, long, default_value = "harmony.wav")]
    output: PathBuf,

    /// Harmony interval: 1-5 or a name (minor-third, major-third, fourth, fifth, octave).
    /// Asked for interactively when neither this nor the config file sets it.
    #[arg(short, long)]
    interval: Option<Interval>,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds per analysis frame
    #[arg(long)]
    frame_duration: Option<f64>,

    /// Lowest frequency searched, in Hz
    #[arg(long)]
    low_hz: Option<f64>,

    /// Highest frequency searched, in Hz
    #[arg(long)]
    high_hz: Option<f64>,

    /// Expected sample rate of the recording and rate of the output
    #[arg(long)]
    sample_rate: Option<usize>,

    /// Seconds of the recording to use (default: every whole frame)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Synthesis time base: frame-local or stretched
    #[arg(long)]
    time_axis: Option<TimeAxis>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let (mut config, interval_from_file) = match &cli.config {
        Some(path) => {
            let config = HarmonizerConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            (config, true)
        }
        None => (HarmonizerConfig::default(), false),
    };

    if let Some(frame_duration) = cli.frame_duration {
        config.frame_duration = frame_duration;
    }
    if cli.low_hz.is_some() || cli.high_hz.is_some() {
        config.vocal_band = VocalBand::new(
            cli.low_hz.unwrap_or(config.vocal_band.low_hz),
            cli.high_hz.unwrap_or(config.vocal_band.high_hz),
        );
    }
    if let Some(sample_rate) = cli.sample_rate {
        config.sample_rate = sample_rate;
    }
    if let Some(duration) = cli.duration {
        config.recording_duration = Some(duration);
    }
    if let Some(time_axis) = cli.time_axis {
        config.time_axis = time_axis;
    }
    config.interval = match cli.interval {
        Some(interval) => interval,
        None if interval_from_file => config.interval,
        None => prompt_interval()?,
    };
    println!("{} chosen!", capitalize(config.interval.name()));

    #[cfg(feature = "record")]
    if let Some(seconds) = cli.record {
        config.recording_duration.get_or_insert(seconds);
        println!("Recording...");
        let take = harmonizer::capture::record(seconds, config.sample_rate)
            .context("recording from the input device")?;
        println!("Recording has stopped!");
        write_wav(&cli.input, &quantize(&take)?)
            .with_context(|| format!("writing recording {}", cli.input.display()))?;
    }

    let recording = read_wav(&cli.input)
        .with_context(|| format!("reading recording {}", cli.input.display()))?;

    let mut harmonizer = Harmonizer::<f64>::new(config)?;
    let harmony = harmonizer.process(recording)?;

    println!("Frequency of notes: {:?}", harmony.notes.as_slice());
    println!("Harmony notes: {:?}", harmony.harmony.as_slice());
    let ambiguous = harmony.notes.diagnostics().len();
    if ambiguous > 0 {
        println!(
            "{} frame(s) had energy only outside the vocal band and were left silent",
            ambiguous
        );
    }

    write_wav(&cli.output, &harmony.samples)
        .with_context(|| format!("writing harmony {}", cli.output.display()))?;
    println!("Harmony written to {}", cli.output.display());

    Ok(())
}

/// Ask for an interval on stdin until a valid one is given.
fn prompt_interval() -> Result<Interval> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!(
            "Select desired harmony (1 = minor third, 2 = major third, \
             3 = perfect fourth, 4 = perfect fifth, 5 = octave): "
        );
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => anyhow::bail!("no harmony selected"),
        };
        match line.parse::<Interval>() {
            Ok(interval) => return Ok(interval),
            Err(_) => println!("Invalid entry!"),
        }
    }
}

/// Convert a `[-1, 1]` take to 16-bit samples for storage.
#[cfg(feature = "record")]
fn quantize(
    take: &harmonizer::signal::SampleBuffer<f64>,
) -> harmonizer::Result<harmonizer::signal::SampleBuffer<i16>> {
    let samples = take
        .samples()
        .iter()
        .map(|&s| (s.clamp(-1., 1.) * f64::from(i16::MAX)) as i16)
        .collect();
    harmonizer::signal::SampleBuffer::new(samples, take.sample_rate())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
