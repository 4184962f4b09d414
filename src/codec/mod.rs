//! Scalar Codec Engine: get/set integer 1/2/3/4/8 byte, BE dan LE
//!
//! Prinsip desain:
//! - Default big-endian (network order); varian `_le` harus eksplisit
//! - Fast path: satu akses native-width unaligned + `swap_bytes` hanya
//!   bila order yang diminta beda dari order native
//! - Fallback: rakit byte-per-byte sesuai order yang diminta, tidak pernah
//!   menyentuh load multi-byte di alamat yang berpotensi misaligned
//! - Medium (3 byte) selalu unsigned; tidak ada varian signed
//!
//! Dua backing store, kontrak accessor sama:
//! - [`raw`]: raw region via pointer - tanpa bounds check, `unsafe`
//! - [`array`]: array region via slice + index - bounds milik slice

pub mod array;
pub mod raw;
