//! Off-Heap Direct Memory
//!
//! Backing untuk Raw Region: blok memori di luar heap Rust yang diakses
//! lewat pointer. Dua strategi alokasi konkret:
//! - `Malloc`: libc calloc/free - release eksplisit, tanpa mekanisme
//!   finalizer apapun (hanya unix)
//! - `Mmap`: anonymous mapping via memmap2 - release menumpang `Drop`
//!
//! Pemilihan strategi adalah fungsi murni tanpa side effect; alokasinya
//! sendiri yang menyentuh OS.

use std::io;
use std::ptr::NonNull;

use memmap2::{MmapMut, MmapOptions};
use tracing::trace;

/// Strategi alokasi direct memory yang tersedia di platform ini.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocStrategy {
    /// calloc/free eksplisit (unix)
    #[cfg(unix)]
    Malloc,
    /// Anonymous mmap, dilepas saat mapping di-drop
    Mmap,
}

impl AllocStrategy {
    /// Pilih strategi untuk platform ini. Fungsi murni: malloc eksplisit
    /// bila tersedia, selain itu anonymous mapping.
    pub const fn select() -> Self {
        #[cfg(unix)]
        return AllocStrategy::Malloc;
        #[cfg(not(unix))]
        AllocStrategy::Mmap
    }
}

/// Blok memori off-heap. Tagged union atas dua strategi alokasi,
/// kontrak akses sama: `base_ptr()` + `len()`.
pub enum DirectMemory {
    #[cfg(unix)]
    Malloc { ptr: NonNull<u8>, len: usize },
    Mmap {
        map: MmapMut,
        ptr: NonNull<u8>,
        len: usize,
    },
}

// SAFETY: DirectMemory memiliki alokasinya secara eksklusif; pointer tidak
// pernah di-alias oleh owner lain. Sinkronisasi akses konkuren ke isi
// memori adalah tanggung jawab pemanggil, bukan tipe ini.
unsafe impl Send for DirectMemory {}
unsafe impl Sync for DirectMemory {}

impl DirectMemory {
    /// Alokasi blok off-heap dengan strategi default platform.
    pub fn allocate(len: usize) -> io::Result<Self> {
        Self::allocate_with(AllocStrategy::select(), len)
    }

    /// Alokasi dengan strategi eksplisit.
    ///
    /// Region yang dihasilkan selalu zero-filled. Alokasi fisik minimum
    /// 1 byte supaya pointer selalu valid, meski `len == 0`.
    pub fn allocate_with(strategy: AllocStrategy, len: usize) -> io::Result<Self> {
        let phys_len = len.max(1);
        match strategy {
            #[cfg(unix)]
            AllocStrategy::Malloc => {
                // SAFETY: ukuran valid (>= 1); hasil dicek null di bawah
                let raw = unsafe { libc::calloc(phys_len, 1) } as *mut u8;
                let ptr = NonNull::new(raw).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::OutOfMemory, "calloc failed")
                })?;
                trace!(len, strategy = "malloc", "alokasi direct memory");
                Ok(Self::Malloc { ptr, len })
            }
            AllocStrategy::Mmap => {
                let mut map = MmapOptions::new().len(phys_len).map_anon()?;
                // SAFETY: mapping valid tidak pernah punya base pointer null
                let ptr = unsafe { NonNull::new_unchecked(map.as_mut_ptr()) };
                trace!(len, strategy = "mmap", "alokasi direct memory");
                Ok(Self::Mmap { map, ptr, len })
            }
        }
    }

    /// Panjang region dalam bytes (sesuai permintaan, bukan alokasi fisik).
    #[inline(always)]
    pub fn len(&self) -> usize {
        match self {
            #[cfg(unix)]
            Self::Malloc { len, .. } => *len,
            Self::Mmap { len, .. } => *len,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Base pointer region. Valid selama `self` hidup.
    #[inline(always)]
    pub fn base_ptr(&self) -> *mut u8 {
        match self {
            #[cfg(unix)]
            Self::Malloc { ptr, .. } => ptr.as_ptr(),
            Self::Mmap { ptr, .. } => ptr.as_ptr(),
        }
    }

    /// Strategi yang dipakai region ini.
    #[inline(always)]
    pub fn strategy(&self) -> AllocStrategy {
        match self {
            #[cfg(unix)]
            Self::Malloc { .. } => AllocStrategy::Malloc,
            Self::Mmap { .. } => AllocStrategy::Mmap,
        }
    }
}

impl Drop for DirectMemory {
    fn drop(&mut self) {
        match self {
            #[cfg(unix)]
            // SAFETY: pointer berasal dari calloc dan belum pernah di-free
            Self::Malloc { ptr, .. } => unsafe {
                libc::free(ptr.as_ptr() as *mut libc::c_void);
            },
            Self::Mmap { .. } => {} // MmapMut melepas mapping-nya sendiri
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_read_roundtrip(mem: &mut DirectMemory) {
        let ptr = mem.base_ptr();
        for i in 0..mem.len() {
            // SAFETY: i < len, region valid
            unsafe { *ptr.add(i) = i as u8 };
        }
        for i in 0..mem.len() {
            assert_eq!(unsafe { *ptr.add(i) }, i as u8);
        }
    }

    #[test]
    fn test_default_strategy_allocates() {
        let mut mem = DirectMemory::allocate(4096).unwrap();
        assert_eq!(mem.len(), 4096);
        assert_eq!(mem.strategy(), AllocStrategy::select());
        write_read_roundtrip(&mut mem);
    }

    #[test]
    fn test_mmap_strategy_allocates() {
        let mut mem = DirectMemory::allocate_with(AllocStrategy::Mmap, 4096).unwrap();
        assert_eq!(mem.strategy(), AllocStrategy::Mmap);
        write_read_roundtrip(&mut mem);
    }

    #[cfg(unix)]
    #[test]
    fn test_malloc_strategy_allocates() {
        let mut mem = DirectMemory::allocate_with(AllocStrategy::Malloc, 4096).unwrap();
        assert_eq!(mem.strategy(), AllocStrategy::Malloc);
        write_read_roundtrip(&mut mem);
    }

    #[test]
    fn test_fresh_region_is_zeroed() {
        let mem = DirectMemory::allocate(256).unwrap();
        let ptr = mem.base_ptr();
        for i in 0..256 {
            assert_eq!(unsafe { *ptr.add(i) }, 0);
        }
    }

    #[test]
    fn test_zero_length_region_is_valid() {
        let mem = DirectMemory::allocate(0).unwrap();
        assert_eq!(mem.len(), 0);
        assert!(mem.is_empty());
        assert!(!mem.base_ptr().is_null());
    }
}
