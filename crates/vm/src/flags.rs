//! Defines the [`Flags`] type, the condition register of the CPU.

use std::cmp::Ordering;

use bitflags::bitflags;

bitflags! {
    /// The outcome of the last comparison performed by the CPU.
    ///
    /// The layout matches the `FL` register of the LS-8: `00000LGE`.
    ///
    /// # Invariants
    ///
    /// After the first `CMP` instruction, exactly one flag is set. Before it, none are.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u8 {
        /// The first operand was equal to the second one.
        const EQUAL = 1 << 0;
        /// The first operand was greater than the second one.
        const GREATER = 1 << 1;
        /// The first operand was less than the second one.
        const LESS = 1 << 2;
    }
}

impl Flags {
    /// Replaces the flags with the outcome of comparing `a` with `b`.
    pub fn compare(&mut self, a: u8, b: u8) {
        *self = match a.cmp(&b) {
            Ordering::Less => Self::LESS,
            Ordering::Equal => Self::EQUAL,
            Ordering::Greater => Self::GREATER,
        };
    }

    /// Returns whether the last comparison found its operands equal.
    #[inline(always)]
    pub const fn is_equal(self) -> bool {
        self.contains(Self::EQUAL)
    }

    /// Returns whether the last comparison found its first operand smaller.
    #[inline(always)]
    pub const fn is_less(self) -> bool {
        self.contains(Self::LESS)
    }

    /// Returns whether the last comparison found its first operand larger.
    #[inline(always)]
    pub const fn is_greater(self) -> bool {
        self.contains(Self::GREATER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_sets_exactly_one_flag() {
        let mut flags = Flags::empty();

        flags.compare(3, 3);
        assert_eq!(flags, Flags::EQUAL);
        assert!(flags.is_equal() && !flags.is_less() && !flags.is_greater());

        flags.compare(1, 200);
        assert_eq!(flags, Flags::LESS);
        assert!(!flags.is_equal());

        flags.compare(255, 0);
        assert_eq!(flags, Flags::GREATER);
        assert!(flags.is_greater());
    }

    #[test]
    fn register_layout() {
        assert_eq!(Flags::EQUAL.bits(), 0b001);
        assert_eq!(Flags::GREATER.bits(), 0b010);
        assert_eq!(Flags::LESS.bits(), 0b100);
    }
}
