//! Benchmarks for waveform assembly and full synthesis
//!
//! Units are synthetic sine bursts so the numbers measure the pipeline,
//! not disk access.

#![allow(clippy::expect_used)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use diphone_synth::{
    AssemblyMode, Lexicon, SampleBuffer, Segment, SynthConfig, Synthesizer, UnitInventory,
    WaveformAssembler,
};

const RATE: u32 = 16_000;

/// A 1600-sample (100 ms) sine burst with a per-unit frequency
fn unit(seed: usize) -> Vec<i16> {
    let freq = 200.0 + 20.0 * seed as f32;
    (0..1_600)
        .map(|i| {
            let t = i as f32 / RATE as f32;
            (8_000.0 * (2.0 * std::f32::consts::PI * freq * t).sin()) as i16
        })
        .collect()
}

fn bench_assembly_modes(c: &mut Criterion) {
    let units: Vec<Vec<i16>> = (0..50).map(unit).collect();

    let mut group = c.benchmark_group("assembly");
    group.measurement_time(Duration::from_secs(5));

    for count in [10_usize, 50] {
        let segments: Vec<Segment<'_>> = units[..count]
            .iter()
            .map(|samples| Segment::Unit(samples))
            .collect();
        group.throughput(Throughput::Elements(count as u64));

        let naive = WaveformAssembler::new(AssemblyMode::Naive, RATE);
        group.bench_with_input(BenchmarkId::new("naive", count), &segments, |b, segments| {
            b.iter(|| naive.assemble(black_box(segments.clone())));
        });

        let crossfade = WaveformAssembler::new(AssemblyMode::Crossfade { window: 160 }, RATE);
        group.bench_with_input(
            BenchmarkId::new("crossfade", count),
            &segments,
            |b, segments| {
                b.iter(|| crossfade.assemble(black_box(segments.clone())));
            },
        );
    }

    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let lexicon = Lexicon::new()
        .with_entry("hello", ["HH", "AH0", "L", "OW1"])
        .with_entry("world", ["W", "ER1", "L", "D"]);

    let keys = [
        "pau-hh", "hh-ah", "ah-l", "l-ow", "ow-pau", "pau-w", "w-er", "er-l", "l-d", "d-pau",
    ];
    let mut inventory = UnitInventory::new(RATE);
    for (i, key) in keys.iter().enumerate() {
        inventory
            .insert(*key, SampleBuffer::new(unit(i), RATE))
            .expect("benchmark unit has the inventory sample rate");
    }

    let mut group = c.benchmark_group("synthesis");
    group.measurement_time(Duration::from_secs(5));

    for crossfade in [false, true] {
        let config = SynthConfig {
            crossfade,
            ..SynthConfig::default()
        };
        let synth =
            Synthesizer::new(config, &lexicon, &inventory).expect("benchmark config is valid");
        let name = if crossfade { "crossfade" } else { "naive" };

        group.bench_function(name, |b| {
            b.iter(|| synth.synthesize(black_box("Hello, world!")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_assembly_modes, bench_synthesis);
criterion_main!(benches);
