// BRK, RTI, NOP and the jam opcodes

use crate::bus::Bus;
use crate::cpu::{flags, vectors, Cpu};

impl Cpu {
    // ========================================
    // Software Interrupt / Return
    // ========================================

    /// BRK - Software Interrupt
    ///
    /// Pushes PC + 1 (skipping the padding byte after the opcode), then P
    /// with bits 4-5 set, sets I, and loads PC from the IRQ/BRK vector at
    /// $FFFE/$FFFF. The pushed B bit is what distinguishes BRK from a
    /// hardware interrupt on the stack.
    pub fn brk(&mut self, bus: &mut Bus) {
        let return_addr = self.pc.wrapping_add(1);
        self.stack_push_u16(bus, return_addr);
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vectors::IRQ);
    }

    /// RTI - Return from Interrupt
    ///
    /// Pulls P (bits 4-5 of the in-register copy preserved), then the
    /// 16-bit return address. Unlike RTS there is no +1 adjustment.
    pub fn rti(&mut self, bus: &mut Bus) {
        let pulled = self.stack_pop(bus);
        self.status = (self.status & 0x30) | (pulled & 0xCF);
        self.pc = self.stack_pop_u16(bus);
    }

    // ========================================
    // NOP / Jam
    // ========================================

    /// NOP - No Operation
    ///
    /// Covers the official $EA and all multi-byte NOP slots; their operand
    /// bytes are consumed by the addressing pass and discarded here.
    pub fn nop(&self) {}

    /// KIL - Jam the CPU
    ///
    /// The twelve undefined opcodes that stop the hardware's instruction
    /// sequencer. The CPU halts for the rest of the emulated power cycle;
    /// subsequent cycles are no-ops.
    pub fn kil(&mut self) {
        self.halted = true;
        #[cfg(feature = "trace")]
        eprintln!("cpu jammed (KIL) at pc={:04X}", self.pc.wrapping_sub(1));
    }
}
