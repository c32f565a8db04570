// Shift and rotate instructions for the 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Shift Primitives
    // ========================================
    // The primitives set C from the shifted-out bit and return the shifted
    // value. They are shared with the illegal read-modify-write opcodes
    // (SLO, SRE, RLA, RRA).

    /// Shift left; C receives bit 7
    #[inline]
    pub(crate) fn asl_value(&mut self, value: u8) -> u8 {
        self.set_carry(value & 0x80 != 0);
        value << 1
    }

    /// Shift right; C receives bit 0
    #[inline]
    pub(crate) fn lsr_value(&mut self, value: u8) -> u8 {
        self.set_carry(value & 0x01 != 0);
        value >> 1
    }

    /// Rotate left through carry; the old C enters bit 0
    #[inline]
    pub(crate) fn rol_value(&mut self, value: u8) -> u8 {
        let carry_in = if self.get_carry() { 1 } else { 0 };
        self.set_carry(value & 0x80 != 0);
        (value << 1) | carry_in
    }

    /// Rotate right through carry; the old C enters bit 7
    #[inline]
    pub(crate) fn ror_value(&mut self, value: u8) -> u8 {
        let carry_in = if self.get_carry() { 0x80 } else { 0 };
        self.set_carry(value & 0x01 != 0);
        (value >> 1) | carry_in
    }

    /// Apply a shift primitive to the accumulator or to memory
    #[inline]
    fn shift_target(
        &mut self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        accumulator: bool,
        f: fn(&mut Cpu, u8) -> u8,
    ) {
        let result = if accumulator {
            let value = self.a;
            let r = f(self, value);
            self.a = r;
            r
        } else {
            let value = bus.read(addr_result.address);
            let r = f(self, value);
            bus.write(addr_result.address, r);
            r
        };
        self.update_zero_and_negative_flags(result);
    }

    // ========================================
    // Shift / Rotate Instructions
    // ========================================

    /// ASL - Arithmetic Shift Left
    ///
    /// Flags affected: C, Z, N
    pub fn asl(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_target(bus, addr_result, accumulator, Cpu::asl_value);
    }

    /// LSR - Logical Shift Right
    ///
    /// Flags affected: C, Z, N (N is always clear: bit 7 becomes 0)
    pub fn lsr(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_target(bus, addr_result, accumulator, Cpu::lsr_value);
    }

    /// ROL - Rotate Left through Carry
    ///
    /// Flags affected: C, Z, N
    pub fn rol(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_target(bus, addr_result, accumulator, Cpu::rol_value);
    }

    /// ROR - Rotate Right through Carry
    ///
    /// Flags affected: C, Z, N
    pub fn ror(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        self.shift_target(bus, addr_result, accumulator, Cpu::ror_value);
    }
}
