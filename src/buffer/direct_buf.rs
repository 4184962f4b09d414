//! DirectBuf: buffer raw region di atas off-heap memory
//!
//! Konstruksi lewat Allocation Strategy Selector - calloc eksplisit bila
//! platform menyediakannya, selain itu anonymous mapping.

use std::ptr;
use std::slice;

use crate::buffer::{is_out_of_bounds, MemoryBuf};
use crate::error::AccessError;
use crate::platform::{AllocStrategy, DirectMemory};

/// Buffer dengan backing off-heap. Addressable via pointer, tidak punya
/// array backing.
pub struct DirectBuf {
    mem: DirectMemory,
    max_capacity: usize,
    read_index: usize,
    write_index: usize,
}

impl DirectBuf {
    /// Alokasi dengan strategi default platform.
    pub fn allocate(initial_capacity: usize, max_capacity: usize) -> Result<Self, AccessError> {
        Self::allocate_with(AllocStrategy::select(), initial_capacity, max_capacity)
    }

    /// Alokasi dengan strategi eksplisit.
    pub fn allocate_with(
        strategy: AllocStrategy,
        initial_capacity: usize,
        max_capacity: usize,
    ) -> Result<Self, AccessError> {
        debug_assert!(initial_capacity <= max_capacity);
        let mem = DirectMemory::allocate_with(strategy, initial_capacity)?;
        Ok(Self {
            mem,
            max_capacity,
            read_index: 0,
            write_index: 0,
        })
    }

    /// Strategi alokasi yang menopang buffer ini.
    pub fn strategy(&self) -> AllocStrategy {
        self.mem.strategy()
    }
}

impl MemoryBuf for DirectBuf {
    fn capacity(&self) -> usize {
        self.mem.len()
    }

    fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    fn memory_address(&self) -> Option<*mut u8> {
        Some(self.mem.base_ptr())
    }

    fn get_byte_range(&self, index: usize, dst: &mut [u8]) -> Result<(), AccessError> {
        self.check_index(index, dst.len())?;
        // SAFETY: range source tervalidasi di atas; dst slice valid
        unsafe {
            ptr::copy_nonoverlapping(self.mem.base_ptr().add(index), dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }

    fn set_byte_range(&mut self, index: usize, src: &[u8]) -> Result<(), AccessError> {
        self.check_index(index, src.len())?;
        // SAFETY: range destinasi tervalidasi di atas; src slice valid
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.mem.base_ptr().add(index), src.len());
        }
        Ok(())
    }

    fn internal_view_mut(
        &mut self,
        index: usize,
        length: usize,
    ) -> Result<&mut [u8], AccessError> {
        self.check_index(index, length)?;
        // SAFETY: range tervalidasi; borrow &mut self menjaga eksklusivitas
        // view selama lifetime-nya
        Ok(unsafe { slice::from_raw_parts_mut(self.mem.base_ptr().add(index), length) })
    }

    fn set_readable(&mut self, read_index: usize, write_index: usize) {
        debug_assert!(read_index <= write_index);
        debug_assert!(!is_out_of_bounds(read_index, write_index - read_index, self.capacity()));
        self.read_index = read_index;
        self.write_index = write_index;
    }

    fn readable_range(&self) -> (usize, usize) {
        (self.read_index, self.write_index)
    }
}
