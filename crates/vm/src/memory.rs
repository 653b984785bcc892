//! Defines the [`Memory`] type, responsible for representing the memory of an LS-8 virtual
//! machine.
//!
//! # Layout
//!
//! The memory is a single flat array of [`MEMORY_SIZE`] bytes. Programs are loaded starting at
//! address `0` and the stack lives at the other end, growing downward from
//! [`STACK_BASE`](crate::cpu::STACK_BASE). Nothing separates the two: a program that pushes too
//! much will simply overwrite its own code.

use crate::error::Error;

/// The number of addressable cells in the memory of the virtual machine.
pub const MEMORY_SIZE: usize = 256;

/// Represents the memory of the LS-8 virtual machine.
///
/// More information on memory can be found in [module-level documentation](self).
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    /// The cells of the memory.
    cells: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates a new [`Memory`] with all cells set to zero.
    pub const fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Reads the cell at `address`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::AddressOutOfRange`] if `address` is not within `0..MEMORY_SIZE`.
    #[inline]
    pub fn read(&self, address: usize) -> Result<u8, Error> {
        self.cells
            .get(address)
            .copied()
            .ok_or(Error::AddressOutOfRange(address as isize))
    }

    /// Writes `value` to the cell at `address`.
    ///
    /// No other cell is touched.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::AddressOutOfRange`] if `address` is not within `0..MEMORY_SIZE`.
    #[inline]
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Error> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(Error::AddressOutOfRange(address as isize))?;
        *cell = value;
        Ok(())
    }

    /// Copies `image` into the memory, starting at address `0`.
    ///
    /// Cells past the end of the image are left untouched.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ProgramTooLarge`] if the image is longer than [`MEMORY_SIZE`]. In that
    /// case, the memory is not modified.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Error> {
        let dst = self
            .cells
            .get_mut(..image.len())
            .ok_or(Error::ProgramTooLarge(image.len()))?;
        dst.copy_from_slice(image);
        Ok(())
    }

    /// Returns the raw content of the memory.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.cells
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.cells.iter().filter(|&&c| c != 0).count();
        f.debug_struct("Memory")
            .field("size", &MEMORY_SIZE)
            .field("non_zero_cells", &used)
            .finish_non_exhaustive()
    }
}
