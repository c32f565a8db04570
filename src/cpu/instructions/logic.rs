// Logical instructions for the 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::{flags, Cpu};

impl Cpu {
    // ========================================
    // Bitwise Operations
    // ========================================

    /// AND - Logical AND with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn and(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// ORA - Logical OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn ora(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a |= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// EOR - Exclusive OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn eor(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a ^= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// BIT - Bit Test
    ///
    /// Z is set from A AND M, while N and V are copied straight from bits 7
    /// and 6 of the memory operand. A is not modified.
    ///
    /// Flags affected: Z, N, V
    pub fn bit(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.set_zero(self.a & value == 0);
        self.update_flag(flags::NEGATIVE, value & 0x80 != 0);
        self.update_flag(flags::OVERFLOW, value & 0x40 != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imm(value: u8) -> AddressingResult {
        AddressingResult::immediate(value)
    }

    #[test]
    fn test_and() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        cpu.a = 0b1100_1100;
        cpu.and(&mut bus, &imm(0b1010_1010));
        assert_eq!(cpu.a, 0b1000_1000);
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_and_zero() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        cpu.a = 0x0F;
        cpu.and(&mut bus, &imm(0xF0));
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_zero());
    }

    #[test]
    fn test_ora() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        cpu.a = 0x0F;
        cpu.ora(&mut bus, &imm(0xF0));
        assert_eq!(cpu.a, 0xFF);
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_eor_self_clears() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        cpu.a = 0x5A;
        cpu.eor(&mut bus, &imm(0x5A));
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_zero(), "EOR with itself clears A");
    }

    #[test]
    fn test_bit_copies_high_bits() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        bus.write(0x0020, 0xC0); // bits 7 and 6 set
        cpu.a = 0x01;
        cpu.bit(&mut bus, &AddressingResult::new(0x0020));
        assert!(cpu.get_zero(), "A & M == 0");
        assert!(cpu.get_negative(), "N copied from bit 7");
        assert!(cpu.get_overflow(), "V copied from bit 6");
    }

    #[test]
    fn test_bit_leaves_accumulator() {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        bus.write(0x0020, 0xFF);
        cpu.a = 0x42;
        cpu.bit(&mut bus, &AddressingResult::new(0x0020));
        assert_eq!(cpu.a, 0x42, "BIT never modifies A");
        assert!(!cpu.get_zero());
    }
}
