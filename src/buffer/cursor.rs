//! ByteCursor: buffer terstruktur dengan semantik position/limit
//!
//! Konsumen/produsen interchange: setiap transfer membaca atau menulis
//! pada `position` lalu memajukannya. Storage bisa direct (off-heap) atau
//! heap; mode read-only menyembunyikan kedua backing dari jalur tulis -
//! cursor heap read-only bahkan tidak mengekspos array-nya sama sekali,
//! sehingga transfer jatuh ke jalur fallback element-wise.

use std::ptr;

use crate::error::AccessError;
use crate::platform::DirectMemory;

enum Storage {
    Direct(DirectMemory),
    Heap(Box<[u8]>),
}

/// Buffer in-memory terstruktur (analog position/remaining).
pub struct ByteCursor {
    storage: Storage,
    position: usize,
    limit: usize,
    read_only: bool,
}

impl ByteCursor {
    /// Cursor dengan storage off-heap. Limit awal = kapasitas.
    pub fn direct(capacity: usize) -> Result<Self, AccessError> {
        let mem = DirectMemory::allocate(capacity)?;
        Ok(Self {
            storage: Storage::Direct(mem),
            position: 0,
            limit: capacity,
            read_only: false,
        })
    }

    /// Cursor dengan storage heap. Limit awal = kapasitas.
    pub fn heap(capacity: usize) -> Self {
        Self {
            storage: Storage::Heap(vec![0u8; capacity].into_boxed_slice()),
            position: 0,
            limit: capacity,
            read_only: false,
        }
    }

    /// Cursor heap berisi copy dari `data`, siap dibaca penuh.
    pub fn from_slice(data: &[u8]) -> Self {
        let mut cur = Self::heap(data.len());
        if let Storage::Heap(arr) = &mut cur.storage {
            arr.copy_from_slice(data);
        }
        cur
    }

    /// Jadikan read-only: backing tidak lagi diekspos untuk ditulis.
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Direct(mem) => mem.len(),
            Storage::Heap(arr) => arr.len(),
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Set position absolut. Panic bila melewati limit.
    pub fn set_position(&mut self, position: usize) {
        assert!(position <= self.limit, "position melewati limit");
        self.position = position;
    }

    #[inline(always)]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Set limit absolut. Panic bila melewati kapasitas.
    pub fn set_limit(&mut self, limit: usize) {
        assert!(limit <= self.capacity(), "limit melewati kapasitas");
        self.limit = limit;
        self.position = self.position.min(limit);
    }

    /// Bytes tersisa antara position dan limit.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    #[inline(always)]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[inline(always)]
    pub fn is_direct(&self) -> bool {
        matches!(self.storage, Storage::Direct(_))
    }

    /// Majukan position sebanyak `n` bytes.
    #[inline(always)]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.position + n <= self.limit);
        self.position += n;
    }

    /// Base address storage direct. Membaca lewat address ini selalu sah;
    /// MENULIS ke cursor read-only adalah pelanggaran kontrak pemanggil.
    pub fn memory_address(&self) -> Option<*mut u8> {
        match &self.storage {
            Storage::Direct(mem) => Some(mem.base_ptr()),
            Storage::Heap(_) => None,
        }
    }

    /// Array backing untuk dibaca. Cursor read-only menyembunyikannya.
    pub fn array(&self) -> Option<&[u8]> {
        match &self.storage {
            Storage::Heap(arr) if !self.read_only => Some(arr),
            _ => None,
        }
    }

    /// Array backing untuk ditulis. Cursor read-only menyembunyikannya.
    pub fn array_mut(&mut self) -> Option<&mut [u8]> {
        match &mut self.storage {
            Storage::Heap(arr) if !self.read_only => Some(arr),
            _ => None,
        }
    }

    /// Baca satu byte pada index absolut (tidak menggeser position).
    pub fn get_at(&self, index: usize) -> u8 {
        assert!(index < self.limit, "index melewati limit");
        match &self.storage {
            // SAFETY: index < limit <= kapasitas region
            Storage::Direct(mem) => unsafe { *mem.base_ptr().add(index) },
            Storage::Heap(arr) => arr[index],
        }
    }

    /// Copy `dst.len()` bytes dari position ke `dst`, lalu majukan
    /// position. Membaca selalu sah, juga untuk cursor read-only.
    ///
    /// Panic bila remaining kurang dari `dst.len()`.
    pub fn read_into(&mut self, dst: &mut [u8]) {
        assert!(dst.len() <= self.remaining(), "remaining kurang");
        match &self.storage {
            Storage::Direct(mem) => {
                // SAFETY: position + dst.len() <= limit <= kapasitas
                unsafe {
                    ptr::copy_nonoverlapping(
                        mem.base_ptr().add(self.position),
                        dst.as_mut_ptr(),
                        dst.len(),
                    );
                }
            }
            Storage::Heap(arr) => {
                dst.copy_from_slice(&arr[self.position..self.position + dst.len()]);
            }
        }
        self.position += dst.len();
    }

    /// Tulis `src` pada position, lalu majukan position.
    ///
    /// Gagal dengan [`AccessError::ReadOnly`] sebelum ada byte tertulis
    /// bila cursor read-only, atau `OutOfBounds` bila remaining kurang.
    pub fn put_slice(&mut self, src: &[u8]) -> Result<(), AccessError> {
        if self.read_only {
            return Err(AccessError::ReadOnly);
        }
        if src.len() > self.remaining() {
            return Err(AccessError::out_of_bounds(
                self.position,
                src.len(),
                self.limit,
            ));
        }
        match &mut self.storage {
            Storage::Direct(mem) => {
                // SAFETY: position + src.len() <= limit <= kapasitas
                unsafe {
                    ptr::copy_nonoverlapping(
                        src.as_ptr(),
                        mem.base_ptr().add(self.position),
                        src.len(),
                    );
                }
            }
            Storage::Heap(arr) => {
                arr[self.position..self.position + src.len()].copy_from_slice(src);
            }
        }
        self.position += src.len();
        Ok(())
    }
}
