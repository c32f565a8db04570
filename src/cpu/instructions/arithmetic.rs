// Arithmetic instructions for the 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Add / Subtract
    // ========================================

    /// Shared core for ADC and the illegal opcodes built on it
    ///
    /// Computes A + value + C, setting C from the unsigned overflow and V
    /// from the signed rule `(~(A ^ m) & (A ^ result)) & 0x80`.
    #[inline]
    pub(crate) fn add_with_carry(&mut self, value: u8) {
        let carry = if self.get_carry() { 1u16 } else { 0 };
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        self.set_overflow((!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// ADC - Add with Carry
    ///
    /// A = A + M + C. Decimal mode is not implemented; the NES 2A03 has no
    /// BCD circuitry and D is ignored.
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.add_with_carry(value);
    }

    /// SBC - Subtract with Carry
    ///
    /// A = A - M - (1 - C), implemented as ADC of the one's complement so
    /// that C=1 afterwards means "no borrow".
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.add_with_carry(!value);
    }

    // ========================================
    // Memory Increment / Decrement
    // ========================================

    /// INC - Increment Memory
    ///
    /// Flags affected: Z, N
    pub fn inc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let result = bus.read(addr_result.address).wrapping_add(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    pub fn dec(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let result = bus.read(addr_result.address).wrapping_sub(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    // ========================================
    // Register Increment / Decrement
    // ========================================

    /// INX - Increment X
    ///
    /// Flags affected: Z, N
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y
    ///
    /// Flags affected: Z, N
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X
    ///
    /// Flags affected: Z, N
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y
    ///
    /// Flags affected: Z, N
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
