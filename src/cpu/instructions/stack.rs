// Push/pull instructions for the 6502 CPU

use crate::bus::Bus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    // ========================================
    // Stack Instructions
    // ========================================
    // B and the unused bit are not physical flip-flops: PHP reconstructs
    // them as set in the pushed copy, and PLP keeps the in-register bits 4-5
    // it finds rather than loading them from the stack.

    /// PHA - Push Accumulator
    pub fn pha(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.a);
    }

    /// PLA - Pull Accumulator
    ///
    /// Flags affected: Z, N
    pub fn pla(&mut self, bus: &mut Bus) {
        self.a = self.stack_pop(bus);
        self.update_zero_and_negative_flags(self.a);
    }

    /// PHP - Push Processor Status
    ///
    /// The pushed copy always carries bits 4 and 5 set (B and unused).
    pub fn php(&mut self, bus: &mut Bus) {
        let value = self.status | flags::BREAK | flags::UNUSED;
        self.stack_push(bus, value);
    }

    /// PLP - Pull Processor Status
    ///
    /// Bits 4-5 of the in-register P are preserved; the remaining six flags
    /// are loaded from the pulled byte.
    pub fn plp(&mut self, bus: &mut Bus) {
        let pulled = self.stack_pop(bus);
        self.status = (self.status & 0x30) | (pulled & 0xCF);
    }
}
