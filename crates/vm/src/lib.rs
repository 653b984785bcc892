//! # LS-8
//!
//! A small virtual machine for the LS-8, an 8-bit instructional computer.
//!
//! The machine has 256 bytes of memory, eight general purpose registers (the last of which is
//! the **Stack Pointer**), a **Program Counter** and a condition flags register. Programs are
//! loaded at address `0` and executed until they halt or fault.
//!
//! ```
//! use ls8_vm::{Machine, State};
//! use ls8_vm::trace::NoopTrace;
//!
//! // LDI R0, 8; PRN R0; HLT
//! let mut vm = Machine::with_program(&[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]).unwrap();
//! let mut printed: Vec<u8> = Vec::new();
//!
//! assert_eq!(vm.run(&mut printed, &mut NoopTrace).unwrap(), State::Halted);
//! assert_eq!(printed, [8]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![forbid(unsafe_code)]

use num_traits::ToPrimitive;

use cpu::{Cpu, Registers};
use error::Error;
use instr::{Instruction, OpCode};
use memory::Memory;
use output::Output;
use trace::Trace;

pub mod cpu;
pub mod error;
pub mod flags;
pub mod instr;
pub mod memory;
pub mod output;
pub mod trace;

/// The execution state of a [`Machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// The machine is executing instructions.
    Running,
    /// The machine executed a `HLT` instruction.
    Halted,
    /// The machine stopped because an instruction could not be executed.
    ///
    /// The [`Error`] responsible for this was returned by the [`Machine::step`] call that
    /// caused it.
    Faulted,
}

/// Contains the full state of an LS-8 virtual machine.
///
/// # Components
///
/// The [`Machine`] is composed of two main components:
///
/// - [`Cpu`]: The central processing unit of the virtual machine, holding the registers, the
///   condition flags and the **Program Counter**.
///
/// - [`Memory`]: The memory associated with the virtual machine. Both the program and the stack
///   live here.
///
/// Multiple machines can live side by side; they share nothing.
#[derive(Debug, Clone)]
pub struct Machine {
    /// The central processing unit of the virtual machine.
    cpu: Cpu,
    /// The memory associated with the virtual machine.
    memory: Memory,
    /// Whether the machine is still running.
    state: State,
}

impl Default for Machine {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates a new [`Machine`] with zeroed memory and a CPU in its power-on state.
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(),
            state: State::Running,
        }
    }

    /// Creates a new [`Machine`] and loads `image` at address `0`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ProgramTooLarge`] if the image does not fit in memory.
    pub fn with_program(image: &[u8]) -> Result<Self, Error> {
        let mut vm = Self::new();
        vm.load(image)?;
        Ok(vm)
    }

    /// Copies `image` into memory, starting at address `0`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ProgramTooLarge`] if the image does not fit in memory.
    #[inline]
    pub fn load(&mut self, image: &[u8]) -> Result<(), Error> {
        self.memory.load(image)
    }

    /// Returns the current state of the [`Cpu`].
    #[inline(always)]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Returns the current state of the [`Cpu`], mutably.
    ///
    /// This can be used to restore a previously saved state.
    #[inline(always)]
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Returns the current state of the [`Memory`].
    #[inline(always)]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns the current state of the [`Memory`], mutably.
    #[inline(always)]
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Returns the execution [`State`] of the machine.
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Overrides the execution [`State`] of the machine.
    ///
    /// Setting it back to [`State::Running`] resumes a halted or faulted machine where it
    /// stopped.
    #[inline(always)]
    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /// Advances the virtual machine by a single step, writing printed values to `output` and
    /// tracing events using the provided [`Trace`] implementation.
    ///
    /// Returns the state of the machine once the step is over. If the machine is not
    /// [`State::Running`], nothing is executed.
    ///
    /// # Errors
    ///
    /// If the instruction can't be executed, the machine enters the [`State::Faulted`] state and
    /// the cause is returned. Effects the instruction had before failing are not rolled back.
    pub fn step<O, T>(&mut self, output: &mut O, trace: &mut T) -> Result<State, Error>
    where
        O: ?Sized + Output,
        T: ?Sized + Trace,
    {
        if self.state != State::Running {
            return Ok(self.state);
        }

        let pc = self.cpu.pc;
        match self.cycle(output, trace) {
            Ok(()) => Ok(self.state),
            Err(err) => {
                log::error!("fault at {pc:#04x}: {err}");
                self.state = State::Faulted;
                Err(err)
            }
        }
    }

    /// Runs the virtual machine until it stops.
    ///
    /// Returns [`State::Halted`] once a `HLT` instruction is executed. If the machine was
    /// already stopped, its state is returned right away.
    ///
    /// # Errors
    ///
    /// The first error raised by an instruction stops the machine and is returned.
    pub fn run<O, T>(&mut self, output: &mut O, trace: &mut T) -> Result<State, Error>
    where
        O: ?Sized + Output,
        T: ?Sized + Trace,
    {
        loop {
            match self.step(output, trace)? {
                State::Running => (),
                state => return Ok(state),
            }
        }
    }

    /// Executes a single fetch-decode-execute cycle.
    fn cycle<O, T>(&mut self, output: &mut O, trace: &mut T) -> Result<(), Error>
    where
        O: ?Sized + Output,
        T: ?Sized + Trace,
    {
        let pc = self.cpu.pc;
        let bytes = fetch(pc, &self.memory)?;
        trace.fetched(&self.cpu, bytes);

        let instruction = Instruction::decode(bytes)?;
        log::trace!("{pc:#04x}: {instruction}");

        match execute(&instruction, &mut self.cpu, &mut self.memory, output)? {
            PcUpdate::Regular => self.cpu.pc = pc + instruction.op_code.size(),
            PcUpdate::Skip => self.cpu.pc = pc + BRANCH_NOT_TAKEN,
            PcUpdate::AbsoluteJump(target) => self.cpu.pc = target as usize,
            PcUpdate::Halt => {
                log::debug!("halted at {pc:#04x}");
                self.state = State::Halted;
            }
        }

        trace.executed(&instruction, &self.cpu);

        Ok(())
    }
}

/// How far a conditional jump that is not taken moves the **Program Counter**.
const BRANCH_NOT_TAKEN: usize = 2;

/// A possible way to update the **Program Counter** after an instruction has been executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PcUpdate {
    /// The size of the instruction is added to the **Program Counter**.
    Regular,
    /// A conditional jump was not taken.
    Skip,
    /// The **Program Counter** is set to the provided address.
    AbsoluteJump(u8),
    /// The machine stops; the **Program Counter** is left untouched.
    Halt,
}

/// Fetches the three bytes starting at `pc`.
///
/// All three are read regardless of how many the instruction actually uses, which means that an
/// instruction sitting in the last two cells of memory can't be fetched.
#[inline]
fn fetch(pc: usize, memory: &Memory) -> Result<[u8; 3], Error> {
    Ok([
        memory.read(pc)?,
        memory.read(pc.wrapping_add(1))?,
        memory.read(pc.wrapping_add(2))?,
    ])
}

/// Moves the **Stack Pointer** down by one cell and returns its new value.
///
/// The **Stack Pointer** is left untouched if it would move below address `0`.
fn decrement_sp(registers: &mut Registers) -> Result<u8, Error> {
    let sp = registers
        .sp()
        .checked_sub(1)
        .ok_or(Error::AddressOutOfRange(-1))?;
    registers.set_sp(sp);
    Ok(sp)
}

/// Moves the **Stack Pointer** up by one cell.
fn increment_sp(registers: &mut Registers) -> Result<(), Error> {
    let next = registers.sp() as usize + 1;
    let sp = next
        .to_u8()
        .ok_or(Error::AddressOutOfRange(next as isize))?;
    registers.set_sp(sp);
    Ok(())
}

/// Applies the effects of `instruction`, except for the update of the **Program Counter**,
/// which is returned instead.
fn execute<O>(
    instruction: &Instruction,
    cpu: &mut Cpu,
    memory: &mut Memory,
    output: &mut O,
) -> Result<PcUpdate, Error>
where
    O: ?Sized + Output,
{
    let Instruction { op_code, a, b } = *instruction;
    let regs = &mut cpu.registers;

    match op_code {
        OpCode::Ldi => regs.set(a, b)?,
        OpCode::Prn => output.emit(regs.get(a)?)?,
        OpCode::Add => {
            let value = regs.get(a)?.wrapping_add(regs.get(b)?);
            regs.set(a, value)?;
        }
        OpCode::Mul => {
            let value = regs.get(a)?.wrapping_mul(regs.get(b)?);
            regs.set(a, value)?;
        }
        OpCode::Push => {
            // The source register is read after the stack moved, so `PUSH R7` pushes the
            // decremented stack pointer.
            let sp = decrement_sp(regs)?;
            let value = regs.get(a)?;
            memory.write(sp as usize, value)?;
        }
        OpCode::Pop => {
            let value = memory.read(regs.sp() as usize)?;
            regs.set(a, value)?;
            increment_sp(regs)?;
        }
        OpCode::Call => {
            let ret = cpu.pc + 2;
            let ret = ret.to_u8().ok_or(Error::AddressOutOfRange(ret as isize))?;
            let sp = decrement_sp(regs)?;
            memory.write(sp as usize, ret)?;
            return Ok(PcUpdate::AbsoluteJump(regs.get(a)?));
        }
        OpCode::Ret => {
            let ret = memory.read(regs.sp() as usize)?;
            increment_sp(regs)?;
            return Ok(PcUpdate::AbsoluteJump(ret));
        }
        OpCode::Cmp => {
            let (lhs, rhs) = (regs.get(a)?, regs.get(b)?);
            cpu.flags.compare(lhs, rhs);
        }
        OpCode::Jmp => return Ok(PcUpdate::AbsoluteJump(regs.get(a)?)),
        OpCode::Jeq => {
            return if cpu.flags.is_equal() {
                Ok(PcUpdate::AbsoluteJump(regs.get(a)?))
            } else {
                Ok(PcUpdate::Skip)
            };
        }
        OpCode::Jne => {
            return if cpu.flags.is_equal() {
                Ok(PcUpdate::Skip)
            } else {
                Ok(PcUpdate::AbsoluteJump(regs.get(a)?))
            };
        }
        OpCode::Hlt => return Ok(PcUpdate::Halt),
    }

    Ok(PcUpdate::Regular)
}
