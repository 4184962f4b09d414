//! Bulk Transfer Engine: copy antar representasi
//!
//! Prinsip desain:
//! - Pilih jalur paling langsung yang tersedia: raw-to-raw > array > generik
//! - Stream transfer di-stage per chunk lewat scratch buffer terbatas,
//!   tidak pernah alokasi sebesar transfer
//! - Bounds check SEBELUM byte pertama disentuh; kegagalan stream di tengah
//!   membiarkan chunk yang sudah lewat tetap berlaku (tanpa rollback)

mod bulk;
mod stream;

pub use bulk::{
    copy, get_bytes_array, get_bytes_buf, get_bytes_cursor, set_bytes_array, set_bytes_buf,
    set_bytes_cursor, set_zero, set_zero_array, BULK_VIEW_THRESHOLD,
};
pub use stream::{get_bytes_writer, set_bytes_reader, WRITE_CHUNK_SIZE};
