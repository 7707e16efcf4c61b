use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use harmonizer::{
    detector::{spectral::SpectralDetector, PitchDetector, VocalBand},
    synth::{synthesize, ToneParameters},
    utils::peak::find_peak,
};

pub fn utils_benchmark(c: &mut Criterion) {
    let v = (0..1024)
        .into_iter()
        .map(|v| ((v as f64) / PI / 30.).sin())
        .collect::<Vec<f64>>();
    let vv = v.as_slice();

    c.bench_function("find_peak", |b| b.iter(|| find_peak(black_box(vv))));
}

pub fn pitch_detect_benchmark(c: &mut Criterion) {
    const SAMPLE_RATE: usize = 44100;
    const FRAME_DURATION: f64 = 0.25;
    const SIZE: usize = 11025;

    // Signal coming from some source (microphone, generated, etc...)
    let dt = 1.0 / SAMPLE_RATE as f64;
    let freq = 300.0;
    let signal: Vec<f64> = (0..SIZE)
        .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
        .collect();

    let mut detector =
        SpectralDetector::new(SAMPLE_RATE, FRAME_DURATION, VocalBand::default()).unwrap();

    c.bench_function("SpectralDetector get_pitch", |b| {
        b.iter(|| detector.get_pitch(black_box(&signal)).unwrap());
    });

    let params = ToneParameters::new(3.0, FRAME_DURATION, SAMPLE_RATE);
    let notes = vec![220.0; 12];
    c.bench_function("synthesize 3s", |b| {
        b.iter(|| synthesize(black_box(&notes), &params).unwrap());
    });
}

criterion_group!(benches, pitch_detect_benchmark, utils_benchmark);
criterion_main!(benches);
