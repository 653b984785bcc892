//! Defines the [`Instruction`] type, responsible for representing a single LS-8 instruction
//! along with its operand bytes.

use std::fmt;

use crate::error::Error;

/// The OP code of an instruction.
///
/// The discriminant of each variant is the byte that encodes it in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Stops the machine.
    Hlt = 0b0000_0001,
    /// Returns from a subroutine, popping the return address off the stack.
    Ret = 0b0001_0001,
    /// Pushes a register onto the stack.
    Push = 0b0100_0101,
    /// Pops the top of the stack into a register.
    Pop = 0b0100_0110,
    /// Prints the decimal value of a register.
    Prn = 0b0100_0111,
    /// Calls the subroutine whose address is held in a register.
    Call = 0b0101_0000,
    /// Jumps to the address held in a register.
    Jmp = 0b0101_0100,
    /// Jumps to the address held in a register if the `EQUAL` flag is set.
    Jeq = 0b0101_0101,
    /// Jumps to the address held in a register if the `EQUAL` flag is clear.
    Jne = 0b0101_0110,
    /// Loads an immediate value into a register.
    Ldi = 0b1000_0010,
    /// Adds two registers, storing the result in the first one.
    Add = 0b1010_0000,
    /// Multiplies two registers, storing the result in the first one.
    Mul = 0b1010_0010,
    /// Compares two registers, updating the condition flags.
    Cmp = 0b1010_0111,
}

impl OpCode {
    /// Decodes the OP code encoded by `byte`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownOpcode`] if `byte` does not encode any instruction.
    pub fn decode(byte: u8) -> Result<Self, Error> {
        match byte {
            0b0000_0001 => Ok(Self::Hlt),
            0b0001_0001 => Ok(Self::Ret),
            0b0100_0101 => Ok(Self::Push),
            0b0100_0110 => Ok(Self::Pop),
            0b0100_0111 => Ok(Self::Prn),
            0b0101_0000 => Ok(Self::Call),
            0b0101_0100 => Ok(Self::Jmp),
            0b0101_0101 => Ok(Self::Jeq),
            0b0101_0110 => Ok(Self::Jne),
            0b1000_0010 => Ok(Self::Ldi),
            0b1010_0000 => Ok(Self::Add),
            0b1010_0010 => Ok(Self::Mul),
            0b1010_0111 => Ok(Self::Cmp),
            _ => Err(Error::UnknownOpcode(byte)),
        }
    }

    /// Returns the byte encoding this OP code.
    #[inline(always)]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns the number of operand bytes following the OP code in memory.
    ///
    /// This is a property of each instruction rather than something read from the bits of the
    /// OP code.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Hlt | Self::Ret => 0,
            Self::Push
            | Self::Pop
            | Self::Prn
            | Self::Call
            | Self::Jmp
            | Self::Jeq
            | Self::Jne => 1,
            Self::Ldi | Self::Add | Self::Mul | Self::Cmp => 2,
        }
    }

    /// Returns the total size of the instruction in memory cells.
    #[inline(always)]
    pub const fn size(self) -> usize {
        1 + self.operand_count()
    }

    /// Returns the assembly mnemonic of the OP code.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Hlt => "HLT",
            Self::Ret => "RET",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Prn => "PRN",
            Self::Call => "CALL",
            Self::Jmp => "JMP",
            Self::Jeq => "JEQ",
            Self::Jne => "JNE",
            Self::Ldi => "LDI",
            Self::Add => "ADD",
            Self::Mul => "MUL",
            Self::Cmp => "CMP",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl TryFrom<u8> for OpCode {
    type Error = Error;

    #[inline(always)]
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::decode(byte)
    }
}

/// A single decoded LS-8 instruction.
///
/// Both operand bytes are always read, whether the instruction uses them or not. Their meaning
/// depends on the OP code: most of the time `a` names a register, and `b` is either another
/// register or an immediate value.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The OP code of the instruction.
    pub op_code: OpCode,
    /// The byte following the OP code.
    pub a: u8,
    /// The second byte following the OP code.
    pub b: u8,
}

impl Instruction {
    /// Decodes the instruction starting with `bytes[0]`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownOpcode`] if the first byte does not encode any instruction.
    #[inline]
    pub fn decode(bytes: [u8; 3]) -> Result<Self, Error> {
        let [op_code, a, b] = bytes;

        Ok(Self {
            op_code: OpCode::decode(op_code)?,
            a,
            b,
        })
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("op_code", &self.op_code)
            .field("a", &self.a)
            .field("b", &self.b)
            .finish()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op_code.operand_count() {
            0 => write!(f, "{}", self.op_code),
            1 => write!(f, "{} {}", self.op_code, self.a),
            _ => write!(f, "{} {}, {}", self.op_code, self.a, self.b),
        }
    }
}
