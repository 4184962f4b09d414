//! Copy antar region, buffer, array, dan cursor + zero-fill + clone
//!
//! Semua fungsi yang menerima `addr` adalah jalur raw region dan `unsafe`:
//! `addr` harus alamat absolut awal range yang diakses di dalam region milik
//! `buf`, dan `index` adalah posisi logisnya (dipakai untuk bounds check dan
//! jalur lambat). Range sisi destinasi/source yang disuplai pemanggil
//! (array, buffer lain) divalidasi di sini sebelum byte pertama disentuh.

use std::ptr;
use std::slice;

use tracing::trace;

use crate::buffer::{is_out_of_bounds, ByteCursor, MemoryBuf};
use crate::error::AccessError;

/// Batas byte untuk memilih copy element-wise vs bulk view pada fallback
/// cursor tanpa backing. Heuristik performa, bukan kontrak.
pub const BULK_VIEW_THRESHOLD: usize = 8;

/// Region → Buffer.
///
/// # Safety
/// `addr..addr+length` harus berada dalam region valid milik `buf`.
pub unsafe fn get_bytes_buf(
    buf: &dyn MemoryBuf,
    addr: *const u8,
    index: usize,
    dst: &mut dyn MemoryBuf,
    dst_index: usize,
    length: usize,
) -> Result<(), AccessError> {
    buf.check_index(index, length)?;
    if is_out_of_bounds(dst_index, length, dst.capacity()) {
        return Err(AccessError::out_of_bounds(dst_index, length, dst.capacity()));
    }

    if let Some(dst_addr) = dst.memory_address() {
        ptr::copy_nonoverlapping(addr, dst_addr.add(dst_index), length);
    } else {
        let off = dst.array_offset() + dst_index;
        if let Some(arr) = dst.array_mut() {
            arr[off..off + length].copy_from_slice(slice::from_raw_parts(addr, length));
        } else {
            // Buffer tanpa raw maupun array backing: jalur generik
            dst.set_byte_range(dst_index, slice::from_raw_parts(addr, length))?;
        }
    }
    Ok(())
}

/// Region → Array.
///
/// # Safety
/// `addr..addr+length` harus berada dalam region valid milik `buf`.
pub unsafe fn get_bytes_array(
    buf: &dyn MemoryBuf,
    addr: *const u8,
    index: usize,
    dst: &mut [u8],
    dst_index: usize,
    length: usize,
) -> Result<(), AccessError> {
    buf.check_index(index, length)?;
    if is_out_of_bounds(dst_index, length, dst.len()) {
        return Err(AccessError::out_of_bounds(dst_index, length, dst.len()));
    }
    if length != 0 {
        dst[dst_index..dst_index + length]
            .copy_from_slice(slice::from_raw_parts(addr, length));
    }
    Ok(())
}

/// Region → Cursor. Panjang transfer = `dst.remaining()`; position maju
/// sebanyak itu.
///
/// # Safety
/// `addr..addr+dst.remaining()` harus berada dalam region valid milik `buf`.
pub unsafe fn get_bytes_cursor(
    buf: &dyn MemoryBuf,
    addr: *const u8,
    index: usize,
    dst: &mut ByteCursor,
) -> Result<(), AccessError> {
    let length = dst.remaining();
    buf.check_index(index, length)?;
    if length == 0 {
        return Ok(());
    }

    if let Some(dst_addr) = dst.memory_address() {
        // Destinasi direct read-only ditolak sebelum byte pertama
        if dst.is_read_only() {
            return Err(AccessError::ReadOnly);
        }
        ptr::copy_nonoverlapping(addr, dst_addr.add(dst.position()), length);
        dst.advance(length);
    } else {
        let pos = dst.position();
        if let Some(arr) = dst.array_mut() {
            arr[pos..pos + length].copy_from_slice(slice::from_raw_parts(addr, length));
            dst.advance(length);
        } else {
            // put generik dari view source; gagal ReadOnly bila perlu
            dst.put_slice(slice::from_raw_parts(addr, length))?;
        }
    }
    Ok(())
}

/// Buffer → Region.
///
/// # Safety
/// `addr..addr+length` harus berada dalam region valid milik `buf`.
pub unsafe fn set_bytes_buf(
    buf: &mut dyn MemoryBuf,
    addr: *mut u8,
    index: usize,
    src: &dyn MemoryBuf,
    src_index: usize,
    length: usize,
) -> Result<(), AccessError> {
    buf.check_index(index, length)?;
    if is_out_of_bounds(src_index, length, src.capacity()) {
        return Err(AccessError::out_of_bounds(src_index, length, src.capacity()));
    }

    if length != 0 {
        if let Some(arr) = src.array() {
            let off = src.array_offset() + src_index;
            ptr::copy_nonoverlapping(arr.as_ptr().add(off), addr, length);
        } else if let Some(src_addr) = src.memory_address() {
            ptr::copy_nonoverlapping(src_addr.add(src_index) as *const u8, addr, length);
        } else {
            let view = buf.internal_view_mut(index, length)?;
            src.get_byte_range(src_index, view)?;
        }
    }
    Ok(())
}

/// Array → Region.
///
/// # Safety
/// `addr..addr+length` harus berada dalam region valid milik `buf`.
pub unsafe fn set_bytes_array(
    buf: &dyn MemoryBuf,
    addr: *mut u8,
    index: usize,
    src: &[u8],
    src_index: usize,
    length: usize,
) -> Result<(), AccessError> {
    buf.check_index(index, length)?;
    if is_out_of_bounds(src_index, length, src.len()) {
        return Err(AccessError::out_of_bounds(src_index, length, src.len()));
    }
    if length != 0 {
        ptr::copy_nonoverlapping(src.as_ptr().add(src_index), addr, length);
    }
    Ok(())
}

/// Cursor → Region. Panjang transfer = `src.remaining()`; position maju
/// sebanyak itu.
///
/// Cursor tanpa raw maupun array backing: di bawah
/// [`BULK_VIEW_THRESHOLD`] byte di-copy satu-satu (transfer hampir kosong
/// tidak perlu view internal), selebihnya satu transfer bulk lewat
/// `internal_view_mut` destinasi.
///
/// # Safety
/// `addr..addr+src.remaining()` harus berada dalam region valid milik `buf`.
pub unsafe fn set_bytes_cursor(
    buf: &mut dyn MemoryBuf,
    addr: *mut u8,
    index: usize,
    src: &mut ByteCursor,
) -> Result<(), AccessError> {
    let length = src.remaining();
    if length == 0 {
        return Ok(());
    }
    let pos = src.position();

    if let Some(arr_ptr) = src.array().map(|a| a.as_ptr()) {
        buf.check_index(index, length)?;
        ptr::copy_nonoverlapping(arr_ptr.add(pos), addr, length);
        src.advance(length);
    } else if let Some(src_addr) = src.memory_address() {
        buf.check_index(index, length)?;
        ptr::copy_nonoverlapping(src_addr.add(pos) as *const u8, addr, length);
        src.advance(length);
    } else if length < BULK_VIEW_THRESHOLD {
        buf.check_index(index, length)?;
        for i in 0..length {
            *addr.add(i) = src.get_at(pos + i);
        }
        src.advance(length);
    } else {
        let view = buf.internal_view_mut(index, length)?;
        src.read_into(view);
    }
    Ok(())
}

/// Zero-fill raw region. `length == 0` adalah no-op tanpa sentuhan memori.
///
/// # Safety
/// `addr..addr+length` harus valid untuk ditulis.
pub unsafe fn set_zero(addr: *mut u8, length: usize) {
    if length == 0 {
        return;
    }
    ptr::write_bytes(addr, 0, length);
}

/// Zero-fill array region. `length == 0` adalah no-op tanpa sentuhan memori.
pub fn set_zero_array(array: &mut [u8], index: usize, length: usize) {
    if length == 0 {
        return;
    }
    array[index..index + length].fill(0);
}

/// Region Clone: buffer direct baru berisi copy `[index, index+length)`.
///
/// Kapasitas maksimum clone mengikuti source; range readable di-set
/// `[0, length)`. Clone zero-length tetap dialokasikan, tanpa copy.
///
/// # Safety
/// `addr..addr+length` harus berada dalam region valid milik `buf`.
pub unsafe fn copy(
    buf: &dyn MemoryBuf,
    addr: *const u8,
    index: usize,
    length: usize,
) -> Result<Box<dyn MemoryBuf>, AccessError> {
    buf.check_index(index, length)?;
    trace!(index, length, "clone region");
    let mut copied = buf.alloc().direct_buffer(length, buf.max_capacity())?;
    if length != 0 {
        if let Some(dst_addr) = copied.memory_address() {
            ptr::copy_nonoverlapping(addr, dst_addr, length);
        } else {
            copied.set_byte_range(0, slice::from_raw_parts(addr, length))?;
        }
        copied.set_readable(0, length);
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{DirectBuf, HeapBuf};

    fn direct_with(data: &[u8]) -> DirectBuf {
        let mut buf = DirectBuf::allocate(data.len(), data.len().max(64)).unwrap();
        buf.set_byte_range(0, data).unwrap();
        buf
    }

    #[test]
    fn test_region_to_array_and_back() {
        let src = direct_with(b"hello janus");
        let addr = src.memory_address().unwrap();

        let mut arr = [0u8; 16];
        unsafe { get_bytes_array(&src, addr, 0, &mut arr, 2, 11).unwrap() };
        assert_eq!(&arr[2..13], b"hello janus");

        let mut dst = DirectBuf::allocate(16, 16).unwrap();
        let dst_addr = dst.memory_address().unwrap();
        unsafe { set_bytes_array(&dst, dst_addr, 0, &arr, 2, 11).unwrap() };

        let mut out = [0u8; 11];
        dst.get_byte_range(0, &mut out).unwrap();
        assert_eq!(&out, b"hello janus");
    }

    #[test]
    fn test_region_to_direct_buffer_is_raw_copy() {
        let src = direct_with(b"abcdefgh");
        let addr = src.memory_address().unwrap();

        let mut dst = DirectBuf::allocate(8, 8).unwrap();
        unsafe { get_bytes_buf(&src, addr, 0, &mut dst, 0, 8).unwrap() };

        let mut out = [0u8; 8];
        dst.get_byte_range(0, &mut out).unwrap();
        assert_eq!(&out, b"abcdefgh");
    }

    #[test]
    fn test_region_to_heap_buffer_uses_array() {
        let src = direct_with(b"abcdefgh");
        let addr = src.memory_address().unwrap();

        let mut dst = HeapBuf::with_capacity(12);
        unsafe { get_bytes_buf(&src, addr, 2, &mut dst, 3, 6).unwrap() };
        assert_eq!(&dst.array().unwrap()[3..9], b"cdefgh");
    }

    #[test]
    fn test_heap_buffer_to_region() {
        let src = HeapBuf::from_slice(b"payload!");
        let mut dst = DirectBuf::allocate(8, 8).unwrap();
        let addr = dst.memory_address().unwrap();
        unsafe { set_bytes_buf(&mut dst, addr, 0, &src, 0, 8).unwrap() };

        let mut out = [0u8; 8];
        dst.get_byte_range(0, &mut out).unwrap();
        assert_eq!(&out, b"payload!");
    }

    #[test]
    fn test_destination_bounds_rejected() {
        let src = direct_with(b"abcd");
        let addr = src.memory_address().unwrap();
        let mut arr = [0u8; 2];
        let err = unsafe { get_bytes_array(&src, addr, 0, &mut arr, 0, 4) };
        assert!(matches!(err, Err(AccessError::OutOfBounds { capacity: 2, .. })));
    }

    #[test]
    fn test_set_zero() {
        let mut buf = direct_with(&[0xFFu8; 16]);
        let addr = buf.memory_address().unwrap();
        unsafe { set_zero(addr.add(4), 8) };

        let mut out = [0u8; 16];
        buf.get_byte_range(0, &mut out).unwrap();
        assert_eq!(&out[..4], &[0xFF; 4]);
        assert_eq!(&out[4..12], &[0u8; 8]);
        assert_eq!(&out[12..], &[0xFF; 4]);

        // Zero-length: tidak ada byte tersentuh
        unsafe { set_zero(addr, 0) };
        buf.get_byte_range(0, &mut out).unwrap();
        assert_eq!(&out[..4], &[0xFF; 4]);
    }

    #[test]
    fn test_set_zero_array() {
        let mut arr = [0xAAu8; 8];
        set_zero_array(&mut arr, 2, 3);
        assert_eq!(arr, [0xAA, 0xAA, 0, 0, 0, 0xAA, 0xAA, 0xAA]);

        set_zero_array(&mut arr, 0, 0);
        assert_eq!(arr[0], 0xAA);
    }

    #[test]
    fn test_copy_clone_independence() {
        let src = direct_with(b"original");
        let addr = src.memory_address().unwrap();

        let clone = unsafe { copy(&src, addr, 0, 8).unwrap() };
        assert_eq!(clone.readable_range(), (0, 8));
        assert_eq!(clone.max_capacity(), src.max_capacity());

        let mut out = [0u8; 8];
        clone.get_byte_range(0, &mut out).unwrap();
        assert_eq!(&out, b"original");

        // Mutasi source setelah clone tidak boleh bocor ke clone
        let mut src = src;
        src.set_byte_range(0, b"MUTATED!").unwrap();
        clone.get_byte_range(0, &mut out).unwrap();
        assert_eq!(&out, b"original");
    }

    #[test]
    fn test_copy_zero_length_allocates() {
        let src = direct_with(b"x");
        let addr = src.memory_address().unwrap();
        let clone = unsafe { copy(&src, addr, 0, 0).unwrap() };
        assert_eq!(clone.capacity(), 0);
        assert_eq!(clone.readable_range(), (0, 0));
    }
}
