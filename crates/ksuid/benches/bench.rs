use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use ksuid::{Ksuid, RandSource};

const TOTAL_IDS: usize = 4096;

struct FixedRand;
impl RandSource<u128> for FixedRand {
    fn rand(&self) -> u128 {
        0x0123_4567_89AB_CDEF_0123_4567_89AB_CDEF
    }
}

fn bench_encode(c: &mut Criterion) {
    let ids: Vec<Ksuid> = (0..TOTAL_IDS)
        .map(|i| Ksuid::from_parts(i as u32, (i as u128).to_be_bytes()))
        .collect();

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for id in &ids {
                black_box(id.encode());
            }
        });
    });
    group.finish();
}

fn bench_encode_to_buf(c: &mut Criterion) {
    let ids: Vec<Ksuid> = (0..TOTAL_IDS)
        .map(|i| Ksuid::from_parts(i as u32, (i as u128).to_be_bytes()))
        .collect();

    let mut group = c.benchmark_group("encode_to_buf");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        let mut buf = [0_u8; Ksuid::ENCODED_LEN];
        b.iter(|| {
            for id in &ids {
                id.encode_to_buf(&mut buf);
                black_box(&buf);
            }
        });
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let encoded: Vec<String> = (0..TOTAL_IDS)
        .map(|i| Ksuid::from_parts(i as u32, (i as u128).to_be_bytes()).encode())
        .collect();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for s in &encoded {
                black_box(Ksuid::decode(s).unwrap());
            }
        });
    });
    group.finish();
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(Ksuid::from_unix_secs_and_rand(1_400_000_000, &FixedRand).unwrap());
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_encode_to_buf,
    bench_decode,
    bench_construct
);
criterion_main!(benches);
