use std::hint::black_box;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use nbt_inplace::{NbtDocument, TagID};

fn named(tag: TagID, name: &str, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![tag as u8];
    data.extend_from_slice(&(name.len() as u16).to_be_bytes());
    data.extend_from_slice(name.as_bytes());
    data.extend_from_slice(payload);
    data
}

/// A level-shaped document: a `Data` compound with scalars, a long string and
/// a list of small compounds.
fn sample() -> Vec<u8> {
    let mut inner = Vec::new();
    inner.extend(named(TagID::Int, "GameType", &0u32.to_be_bytes()));
    inner.extend(named(TagID::Long, "RandomSeed", &[7; 8]));
    inner.extend(named(TagID::Double, "BorderSize", &6.0e7f64.to_be_bytes()));
    let mut name = 64u16.to_be_bytes().to_vec();
    name.extend(std::iter::repeat_n(b'w', 64));
    inner.extend(named(TagID::String, "LevelName", &name));

    let mut list = vec![TagID::Compound as u8];
    list.extend_from_slice(&1000u32.to_be_bytes());
    for i in 0..1000u32 {
        list.extend(named(TagID::Int, "x", &i.to_be_bytes()));
        list.extend(named(TagID::Float, "y", &(i as f32).to_be_bytes()));
        list.extend(named(TagID::Short, "id", &((i % 256) as u16).to_be_bytes()));
        list.push(0);
    }
    inner.extend(named(TagID::List, "Entities", &list));
    inner.push(0);

    let mut data = vec![0x0A, 0x00, 0x00];
    data.extend(named(TagID::Compound, "Data", &inner));
    data.push(0);
    data
}

fn bench_decode(c: &mut Criterion) {
    let data = sample();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("level_like", |b| {
        b.iter_batched(
            || data.clone(),
            |buffer| black_box(NbtDocument::decode(buffer).unwrap()),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_set_value(c: &mut Criterion) {
    let mut doc = NbtDocument::decode(sample()).unwrap();
    c.bench_function("set_value/GameType", |b| {
        let mut mode = 0u8;
        b.iter(|| {
            mode ^= 1;
            doc.set_value(black_box(&["Data", "GameType"]), mode).unwrap();
        })
    });
}

criterion_group!(benches, bench_decode, bench_set_value);
criterion_main!(benches);
