//! Probe kemampuan platform + showcase codec
//!
//! Usage:
//!   cargo run --release --example endian_probe

use std::time::Instant;

use janus::codec::{array, raw};
use janus::platform::{AllocStrategy, DirectMemory, HOST};

fn main() {
    println!("🔍 Janus - Platform Probe & Codec Showcase");
    println!("==========================================\n");

    println!("Host capabilities:");
    println!("  unaligned access : {}", HOST.unaligned_access);
    println!(
        "  native order     : {}",
        if HOST.big_endian { "big-endian" } else { "little-endian" }
    );
    println!("  direct strategy  : {:?}\n", AllocStrategy::select());

    showcase_scalar();
    benchmark_codec();
}

fn showcase_scalar() {
    println!("Scalar codec:");

    let buf = [0x12u8, 0x34, 0x56, 0x78];
    println!("  bytes            : {:02X?}", buf);
    println!("  get_int (BE)     : 0x{:08X}", array::get_int(&buf, 0));
    println!("  get_int_le       : 0x{:08X}", array::get_int_le(&buf, 0));

    let medium = [0x01u8, 0x02, 0x03];
    println!("  medium bytes     : {:02X?}", medium);
    println!(
        "  get_medium (BE)  : 0x{:06X}",
        array::get_unsigned_medium(&medium, 0)
    );
    println!(
        "  get_medium_le    : 0x{:06X}\n",
        array::get_unsigned_medium_le(&medium, 0)
    );
}

fn benchmark_codec() {
    println!("Codec latency (off-heap region):");

    const ITERATIONS: usize = 1_000_000;
    let mem = DirectMemory::allocate(64).unwrap();
    let ptr = mem.base_ptr();

    let start = Instant::now();
    let mut acc = 0i64;
    for i in 0..ITERATIONS {
        unsafe {
            raw::set_long(ptr, i as i64);
            acc = acc.wrapping_add(raw::get_long(ptr));
        }
    }
    let duration = start.elapsed();

    let ns = duration.as_nanos() as f64 / ITERATIONS as f64;
    println!("  Operations : {} set+get i64 BE", ITERATIONS);
    println!("  Latency    : {:.2} ns/op (acc={})", ns, acc);
    println!(
        "  Throughput : {:.2} M ops/sec",
        ITERATIONS as f64 / duration.as_secs_f64() / 1_000_000.0
    );
}
