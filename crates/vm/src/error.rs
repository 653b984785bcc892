//! Defines the [`Error`] type of the crate.

use std::io;

/// An error that might occur when executing an LS-8 program.
///
/// Every variant except [`Error::ProgramTooLarge`] is fatal to a run: the [`Machine`] that
/// produced it is left in the [`State::Faulted`] state and won't dispatch any further
/// instruction.
///
/// [`Machine`]: crate::Machine
/// [`State::Faulted`]: crate::State::Faulted
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An access to memory used an address outside of `0..MEMORY_SIZE`.
    ///
    /// The address is signed because the stack pointer may attempt to move below zero.
    #[error("address {0} is out of range")]
    AddressOutOfRange(isize),
    /// An instruction named a register outside of `0..REGISTER_COUNT`.
    #[error("register R{0} is out of range")]
    RegisterOutOfRange(u8),
    /// The byte referenced by the **Program Counter** does not encode any known instruction.
    #[error("unknown instruction {0:#010b}")]
    UnknownOpcode(u8),
    /// A program image did not fit in memory.
    ///
    /// This is only ever returned when loading a program, before the machine starts running.
    #[error("program image of {0} bytes does not fit in memory")]
    ProgramTooLarge(usize),

    // Not a fault of the program itself, but the run can't continue without its output.
    //
    /// The output stream used by `PRN` failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
