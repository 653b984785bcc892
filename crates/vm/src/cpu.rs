//! Defines the [`Cpu`] type, responsible for describing the state of the CPU.
//!
//! More information in the documentation for [`Cpu`].

use std::fmt;

use crate::error::Error;
use crate::flags::Flags;

/// The number of general purpose registers of the CPU.
pub const REGISTER_COUNT: usize = 8;

/// The index of the register reserved by convention as the **Stack Pointer**.
pub const SP: u8 = 7;

/// The initial value of the **Stack Pointer**.
///
/// The stack grows downward from this address, leaving the topmost cells of memory untouched.
pub const STACK_BASE: u8 = 0xF4;

/// The register file of the CPU.
///
/// Registers hold unsigned bytes. Arithmetic on them wraps around rather than overflowing, just
/// like it would on the hardware the instruction set was designed for.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers([u8; REGISTER_COUNT]);

impl Registers {
    /// Creates a new register file with every register set to zero.
    ///
    /// Note that the **Stack Pointer** is zero too; use [`Cpu::new`] to get a properly
    /// initialized stack.
    pub const fn new() -> Self {
        Self([0; REGISTER_COUNT])
    }

    /// Returns the value of register `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::RegisterOutOfRange`] if `index` is not within `0..REGISTER_COUNT`.
    #[inline]
    pub fn get(&self, index: u8) -> Result<u8, Error> {
        self.0
            .get(index as usize)
            .copied()
            .ok_or(Error::RegisterOutOfRange(index))
    }

    /// Sets the value of register `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::RegisterOutOfRange`] if `index` is not within `0..REGISTER_COUNT`.
    #[inline]
    pub fn set(&mut self, index: u8, value: u8) -> Result<(), Error> {
        let reg = self
            .0
            .get_mut(index as usize)
            .ok_or(Error::RegisterOutOfRange(index))?;
        *reg = value;
        Ok(())
    }

    /// Returns the current value of the **Stack Pointer**.
    #[inline(always)]
    pub const fn sp(&self) -> u8 {
        self.0[SP as usize]
    }

    /// Sets the value of the **Stack Pointer**.
    #[inline(always)]
    pub fn set_sp(&mut self, value: u8) {
        self.0[SP as usize] = value;
    }

    /// Returns the values of all registers, in order.
    #[inline(always)]
    pub const fn as_array(&self) -> &[u8; REGISTER_COUNT] {
        &self.0
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_map();
        for (i, value) in self.0.iter().enumerate() {
            list.entry(&format_args!("R{i}"), value);
        }
        list.finish()
    }
}

/// The Central Processing Unit (CPU) responsible for executing LS-8 instructions.
///
/// By itself, a [`Cpu`] is not enough to execute a program. In order to do anything useful, it
/// has to be connected to a [`Memory`](crate::memory::Memory), which is what
/// [`Machine`](crate::Machine) does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    /// The Program Counter of the CPU, pointing to the next instruction to be fetched from
    /// memory.
    ///
    /// This is wider than a byte: an instruction at the end of memory may advance it past the
    /// last addressable cell, in which case the next fetch faults.
    pub pc: usize,
    /// The general purpose registers.
    ///
    /// # Invariants
    ///
    /// Register [`SP`] always holds the address of the top of the stack. Only the stack
    /// instructions (or a program explicitly naming `R7`) modify it.
    pub registers: Registers,
    /// The condition flags, as set by the last `CMP` instruction.
    pub flags: Flags,
}

impl Default for Cpu {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Creates a new [`Cpu`] in its power-on state.
    ///
    /// Every register is zero, except the **Stack Pointer** which holds [`STACK_BASE`]. The
    /// **Program Counter** points to address `0`.
    pub fn new() -> Self {
        let mut registers = Registers::new();
        registers.set_sp(STACK_BASE);

        Self {
            pc: 0,
            registers,
            flags: Flags::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state() {
        let cpu = Cpu::new();
        assert_eq!(cpu.pc, 0);
        assert_eq!(cpu.registers.sp(), STACK_BASE);
        assert_eq!(&cpu.registers.as_array()[..7], &[0; 7]);
        assert!(cpu.flags.is_empty());
    }

    #[test]
    fn set_then_get() {
        let mut regs = Registers::new();
        regs.set(3, 42).unwrap();
        assert_eq!(regs.get(3).unwrap(), 42);
        assert_eq!(regs.get(2).unwrap(), 0);
    }

    #[test]
    fn stack_pointer_is_register_seven() {
        let mut regs = Registers::new();
        regs.set(SP, 0x80).unwrap();
        assert_eq!(regs.sp(), 0x80);

        regs.set_sp(0x40);
        assert_eq!(regs.get(7).unwrap(), 0x40);
    }

    #[test]
    fn out_of_range_register() {
        let mut regs = Registers::new();
        assert!(matches!(regs.get(8), Err(Error::RegisterOutOfRange(8))));
        assert!(matches!(
            regs.set(255, 1),
            Err(Error::RegisterOutOfRange(255))
        ));
    }

    #[test]
    fn debug_lists_named_registers() {
        let mut regs = Registers::new();
        regs.set(1, 5).unwrap();
        let s = format!("{regs:?}");
        assert!(s.starts_with("{R0: 0, R1: 5, R2: 0"), "{s}");
    }
}
