//! Defines the [`Trace`] trait, used to gather information about the execution of an LS-8
//! program within the virtual machine.

use crate::cpu::Cpu;
use crate::instr::Instruction;

/// A collection of callbacks to be called during the execution of an LS-8 program.
///
/// Every callback has an empty default implementation, so implementors only need to override
/// the ones they care about.
#[allow(unused_variables)]
pub trait Trace {
    /// Called at the start of a cycle, once the three bytes at the **Program Counter** have been
    /// fetched but before they are decoded.
    ///
    /// `cpu` is the state of the CPU before the instruction runs.
    fn fetched(&mut self, cpu: &Cpu, bytes: [u8; 3]) {}

    /// Called once an instruction has been executed successfully.
    ///
    /// `cpu` is the state of the CPU after the instruction ran.
    fn executed(&mut self, instruction: &Instruction, cpu: &Cpu) {}
}

impl<T: ?Sized + Trace> Trace for &mut T {
    #[inline(always)]
    fn fetched(&mut self, cpu: &Cpu, bytes: [u8; 3]) {
        (**self).fetched(cpu, bytes)
    }

    #[inline(always)]
    fn executed(&mut self, instruction: &Instruction, cpu: &Cpu) {
        (**self).executed(instruction, cpu)
    }
}

/// An implementation of [`Trace`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;
impl Trace for NoopTrace {}
