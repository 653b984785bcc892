//! A [`Trace`] implementation printing the state of the machine before every instruction.

use std::io::Write;

use ls8_vm::cpu::Cpu;
use ls8_vm::trace::Trace;

/// Dumps the **Program Counter**, the fetched bytes and the registers, in hexadecimal, before
/// each instruction:
///
/// ```text
/// TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4
/// ```
#[derive(Debug)]
pub struct HexTracer<W> {
    writer: W,
}

impl<W: Write> HexTracer<W> {
    /// Creates a new [`HexTracer`] writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Trace for HexTracer<W> {
    fn fetched(&mut self, cpu: &Cpu, bytes: [u8; 3]) {
        let [op, a, b] = bytes;
        let mut line = format!("TRACE: {:02X} | {op:02X} {a:02X} {b:02X} |", cpu.pc);
        for reg in cpu.registers.as_array() {
            line.push_str(&format!(" {reg:02X}"));
        }

        // Tracing is best effort.
        if let Err(err) = writeln!(self.writer, "{line}") {
            log::warn!("failed to write trace: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format() {
        let mut tracer = HexTracer::new(Vec::new());
        let mut cpu = Cpu::new();
        cpu.pc = 0x1A;
        cpu.registers.set(0, 0xAB).unwrap();

        tracer.fetched(&cpu, [0x82, 0x00, 0x08]);

        let out = String::from_utf8(tracer.into_inner()).unwrap();
        assert_eq!(out, "TRACE: 1A | 82 00 08 | AB 00 00 00 00 00 00 F4\n");
    }
}
