//! Error types untuk operasi memory access
//!
//! Semua kegagalan dilaporkan sinkron ke pemanggil, tidak ada retry
//! internal. Bounds violation selalu terdeteksi SEBELUM ada byte yang
//! disentuh - tidak pernah partially applied.

use std::io;

use thiserror::Error;

/// Kegagalan operasi akses memori.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Index/length di luar kapasitas backing store
    #[error("index out of bounds: index {index}, length {length}, capacity {capacity}")]
    OutOfBounds {
        index: usize,
        length: usize,
        capacity: usize,
    },

    /// Destinasi bertanda read-only; tidak ada byte yang ditulis
    #[error("destination is read-only")]
    ReadOnly,

    /// Kegagalan stream, diteruskan apa adanya dari underlying I/O.
    /// Chunk yang sudah tertransfer sebelum kegagalan tetap berlaku.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AccessError {
    /// Konstruktor bounds violation.
    #[inline]
    pub fn out_of_bounds(index: usize, length: usize, capacity: usize) -> Self {
        Self::OutOfBounds {
            index,
            length,
            capacity,
        }
    }
}
