//! Helpers shared by the integration tests.

#![allow(dead_code)]

use ls8_vm::error::Error;
use ls8_vm::trace::NoopTrace;
use ls8_vm::{Machine, State};

pub const HLT: u8 = 0b0000_0001;
pub const RET: u8 = 0b0001_0001;
pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;
pub const PRN: u8 = 0b0100_0111;
pub const CALL: u8 = 0b0101_0000;
pub const JMP: u8 = 0b0101_0100;
pub const JEQ: u8 = 0b0101_0101;
pub const JNE: u8 = 0b0101_0110;
pub const LDI: u8 = 0b1000_0010;
pub const ADD: u8 = 0b1010_0000;
pub const MUL: u8 = 0b1010_0010;
pub const CMP: u8 = 0b1010_0111;

/// Runs `image` to completion, returning the final machine, its printed values and the outcome.
pub fn run(image: &[u8]) -> (Machine, Vec<u8>, Result<State, Error>) {
    let mut vm = Machine::with_program(image).expect("image fits in memory");
    let mut printed = Vec::new();
    let result = vm.run(&mut printed, &mut NoopTrace);
    (vm, printed, result)
}
