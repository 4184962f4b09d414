//! Transfer region ↔ byte stream lewat scratch buffer terbatas
//!
//! Transfer sebesar apapun di-stage per chunk maksimal [`WRITE_CHUNK_SIZE`]
//! bytes. Chunk kecil memakai scratch array thread-local yang reusable;
//! chunk besar meminjam buffer heap sementara dari allocator, dilepas di
//! setiap jalur keluar (sukses maupun error) oleh scope.

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::ptr;

use tracing::trace;

use crate::buffer::{BufAllocator, MemoryBuf};
use crate::error::AccessError;

/// Ukuran chunk maksimum untuk staging stream transfer.
pub const WRITE_CHUNK_SIZE: usize = 8192;

/// Batas chunk yang masih dilayani scratch thread-local.
const MAX_TL_SCRATCH_LEN: usize = 1024;

thread_local! {
    // Scratch reusable per thread; dipinjam selama satu call, tidak pernah
    // ditahan lebih lama
    static TL_SCRATCH: RefCell<[u8; MAX_TL_SCRATCH_LEN]> =
        RefCell::new([0u8; MAX_TL_SCRATCH_LEN]);
}

/// Jalankan `f` dengan scratch sepanjang `len`: thread-local bila muat,
/// selain itu buffer heap pinjaman dari allocator.
fn with_scratch<R>(
    alloc: &dyn BufAllocator,
    len: usize,
    f: impl FnOnce(&mut [u8]) -> R,
) -> R {
    if len <= MAX_TL_SCRATCH_LEN {
        TL_SCRATCH.with(|s| f(&mut s.borrow_mut()[..len]))
    } else {
        let mut tmp = alloc.heap_buffer(len);
        match tmp.array_mut() {
            Some(arr) => f(&mut arr[..len]),
            // Allocator yang melahirkan heap buffer tanpa array: scratch lokal
            None => f(&mut vec![0u8; len]),
        }
    }
}

/// Region → byte sink. Chunked; kegagalan stream diteruskan apa adanya,
/// chunk yang sudah tertulis tetap berlaku.
///
/// # Safety
/// `addr..addr+length` harus berada dalam region valid milik `buf`.
pub unsafe fn get_bytes_writer(
    buf: &dyn MemoryBuf,
    addr: *const u8,
    index: usize,
    out: &mut dyn Write,
    length: usize,
) -> Result<(), AccessError> {
    buf.check_index(index, length)?;
    if length == 0 {
        return Ok(());
    }
    let chunk = length.min(WRITE_CHUNK_SIZE);
    with_scratch(buf.alloc(), chunk, |scratch| -> io::Result<()> {
        let mut addr = addr;
        let mut remaining = length;
        loop {
            let len = remaining.min(scratch.len());
            // SAFETY: addr..addr+len masih dalam range yang divalidasi caller
            unsafe {
                ptr::copy_nonoverlapping(addr, scratch.as_mut_ptr(), len);
            }
            out.write_all(&scratch[..len])?;
            remaining -= len;
            trace!(len, remaining, "chunk region ke stream");
            if remaining == 0 {
                return Ok(());
            }
            // SAFETY: remaining > 0 berarti addr+len masih dalam range
            addr = unsafe { addr.add(len) };
        }
    })
    .map_err(AccessError::from)
}

/// Byte source → region. Satu kali read ke scratch heap sebesar
/// `min(length, WRITE_CHUNK_SIZE)`, lalu copy ke region.
///
/// Mengembalikan jumlah byte yang benar-benar tertransfer; `0` berarti
/// end-of-data. Partial fill adalah hasil normal, bukan error.
///
/// # Safety
/// `addr..addr+length` harus berada dalam region valid milik `buf`.
pub unsafe fn set_bytes_reader(
    buf: &dyn MemoryBuf,
    addr: *mut u8,
    index: usize,
    input: &mut dyn Read,
    length: usize,
) -> Result<usize, AccessError> {
    buf.check_index(index, length)?;
    if length == 0 {
        return Ok(0);
    }

    // Scratch heap pinjaman dari allocator; scope menjamin pelepasannya
    // di semua jalur keluar
    let scratch_len = length.min(WRITE_CHUNK_SIZE);
    let mut tmp = buf.alloc().heap_buffer(scratch_len);
    let scratch = tmp.internal_view_mut(0, scratch_len)?;

    let read = input.read(scratch).map_err(AccessError::from)?;
    if read > 0 {
        // SAFETY: read <= scratch_len <= length, range divalidasi di atas
        ptr::copy_nonoverlapping(scratch.as_ptr(), addr, read);
    }
    Ok(read)
}
