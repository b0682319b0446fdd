use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sstv_core::catalogue::mode_by_name;
use sstv_core::config::{DecoderConfig, EncoderConfig};
use sstv_core::decoder::Decoder;
use sstv_core::demod::FrequencyTracker;
use sstv_core::encoder::Encoder;

fn benchmark_frequency_tracker(c: &mut Criterion) {
    let samples: Vec<i16> = (0..8000)
        .map(|n| ((n as f32 * 0.3).sin() * 10000.0) as i16)
        .collect();

    c.bench_function("frequency_tracker_8000_samples", |b| {
        b.iter(|| {
            let mut tracker = FrequencyTracker::new(8000, 3);
            for &s in &samples {
                black_box(tracker.push_sample(s));
            }
        })
    });
}

fn benchmark_decode_martin1(c: &mut Criterion) {
    let mode = mode_by_name("Martin 1").unwrap();
    let mut enc = Encoder::new(mode, EncoderConfig { sample_rate: 8000, emit_vox: false, emit_footer: false });
    enc.set_source_image(1, 1, Box::new(|_, _| Some([128, 64, 200])));
    let audio = enc.run_all();

    c.bench_function("decode_martin1_8khz", |b| {
        b.iter(|| {
            let mut dec = Decoder::new(DecoderConfig { sample_rate: 8000, ..Default::default() });
            black_box(dec.decode(&audio).unwrap())
        })
    });
}

criterion_group!(benches, benchmark_frequency_tracker, benchmark_decode_martin1);
criterion_main!(benches);
