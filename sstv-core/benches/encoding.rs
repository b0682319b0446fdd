use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sstv_core::catalogue::mode_by_name;
use sstv_core::config::EncoderConfig;
use sstv_core::encoder::Encoder;

fn benchmark_run_all_by_mode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoder_run_all");

    for name in ["B&W 8", "Martin 1", "Scottie 1", "Robot 36", "PD120"] {
        let mode = mode_by_name(name).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &mode, |b, &mode| {
            b.iter(|| {
                let mut enc = Encoder::new(mode, EncoderConfig::default());
                black_box(enc.run_all())
            })
        });
    }

    group.finish();
}

fn benchmark_pump_chunked(c: &mut Criterion) {
    let mode = mode_by_name("Martin 1").unwrap();

    c.bench_function("encoder_pump_1024_sample_chunks", |b| {
        b.iter(|| {
            let mut enc = Encoder::new(mode, EncoderConfig::default());
            let mut chunk = [0.0f32; 1024];
            loop {
                let n = enc.pump(&mut chunk);
                if n == 0 {
                    break;
                }
                black_box(&chunk[..n]);
            }
        })
    });
}

criterion_group!(benches, benchmark_run_all_by_mode, benchmark_pump_chunked);
criterion_main!(benches);
