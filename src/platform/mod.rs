//! Platform layer: capability probe + off-heap memory
//!
//! Prinsip desain:
//! - Capability facts (unaligned access, native endianness) dihitung sekali,
//!   read-only selamanya, aman dibaca konkuren tanpa sinkronisasi
//! - Off-heap allocation lewat dua strategi konkret di balik satu tagged union

mod caps;
mod direct;

pub use caps::{HostCaps, HOST};
pub use direct::{AllocStrategy, DirectMemory};
