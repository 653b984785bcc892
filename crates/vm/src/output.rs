//! Defines the [`Output`] trait, the stream `PRN` writes to.

use std::io;

/// A sink for the values printed by the `PRN` instruction.
pub trait Output {
    /// Emits a single value.
    fn emit(&mut self, value: u8) -> io::Result<()>;
}

impl<O: ?Sized + Output> Output for &mut O {
    #[inline(always)]
    fn emit(&mut self, value: u8) -> io::Result<()> {
        (**self).emit(value)
    }
}

/// Collects the raw printed values, in order.
impl Output for Vec<u8> {
    #[inline]
    fn emit(&mut self, value: u8) -> io::Result<()> {
        self.push(value);
        Ok(())
    }
}

/// An [`Output`] writing each value in decimal on its own line.
#[derive(Debug, Default)]
pub struct LineOutput<W> {
    writer: W,
}

impl<W: io::Write> LineOutput<W> {
    /// Creates a new [`LineOutput`] writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Output for LineOutput<W> {
    fn emit(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.writer, "{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_output_is_decimal() {
        let mut out = LineOutput::new(Vec::new());
        out.emit(8).unwrap();
        out.emit(255).unwrap();
        assert_eq!(out.into_inner(), b"8\n255\n");
    }

    #[test]
    fn vec_collects_values() {
        let mut out: Vec<u8> = Vec::new();
        out.emit(1).unwrap();
        (&mut out).emit(2).unwrap();
        assert_eq!(out, [1, 2]);
    }
}
