//! Criterion benchmark untuk scalar codec dan bulk transfer
//!
//! Run dengan: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use janus::buffer::{DirectBuf, MemoryBuf};
use janus::codec::{array, raw};
use janus::transfer::{get_bytes_array, set_bytes_array};

fn bench_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_codec");
    group.throughput(Throughput::Bytes(8));

    let mut buf = [0u8; 64];

    group.bench_function("raw_set_get_long_be", |b| {
        let p = buf.as_mut_ptr();
        let mut v = 0i64;
        b.iter(|| unsafe {
            raw::set_long(p, black_box(v));
            v = v.wrapping_add(raw::get_long(p));
        });
    });

    group.bench_function("raw_set_get_long_le", |b| {
        let p = buf.as_mut_ptr();
        let mut v = 0i64;
        b.iter(|| unsafe {
            raw::set_long_le(p, black_box(v));
            v = v.wrapping_add(raw::get_long_le(p));
        });
    });

    group.bench_function("array_set_get_long_be", |b| {
        let mut v = 0i64;
        b.iter(|| {
            array::set_long(&mut buf, 1, black_box(v)); // index ganjil: unaligned
            v = v.wrapping_add(array::get_long(&buf, 1));
        });
    });

    group.bench_function("array_set_get_int_be", |b| {
        let mut v = 0i32;
        b.iter(|| {
            array::set_int(&mut buf, 1, black_box(v));
            v = v.wrapping_add(array::get_int(&buf, 1));
        });
    });

    group.finish();
}

fn bench_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_transfer");

    for size in [64usize, 4096, 65536] {
        group.throughput(Throughput::Bytes(size as u64));

        let data = vec![0xA5u8; size];
        let buf = DirectBuf::allocate(size, size).unwrap();
        let addr = buf.memory_address().unwrap();
        let mut out = vec![0u8; size];

        group.bench_function(format!("array_region_roundtrip_{}", size), |b| {
            b.iter(|| unsafe {
                set_bytes_array(&buf, addr, 0, black_box(&data), 0, size).unwrap();
                get_bytes_array(&buf, addr, 0, black_box(&mut out), 0, size).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalar, bench_bulk);
criterion_main!(benches);
