// Illegal (undocumented) NMOS 6502 instructions
//
// The stable ones combine a documented read-modify-write step with an ALU
// step and are exercised by real software and test ROMs, so they get exact
// semantics. The unstable group (XAA, AHX, SHX, SHY, TAS, LAS) depends on
// analog bus behavior; the widely documented `((addr >> 8) + 1)`
// approximation is used for the stores.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::{flags, Cpu};

impl Cpu {
    // ========================================
    // Stable Combined Instructions
    // ========================================

    /// LAX - Load A and X
    ///
    /// Flags affected: Z, N
    pub fn lax(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// SAX - Store A AND X
    ///
    /// Flags affected: none
    pub fn sax(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a & self.x);
    }

    /// DCP - Decrement then Compare
    ///
    /// DEC on memory followed by CMP against the decremented value.
    ///
    /// Flags affected: C, Z, N
    pub fn dcp(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let result = bus.read(addr_result.address).wrapping_sub(1);
        bus.write(addr_result.address, result);
        self.compare(self.a, result);
    }

    /// ISC - Increment then Subtract (a.k.a. ISB)
    ///
    /// INC on memory followed by SBC of the incremented value.
    ///
    /// Flags affected: C, Z, V, N
    pub fn isc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let result = bus.read(addr_result.address).wrapping_add(1);
        bus.write(addr_result.address, result);
        self.add_with_carry(!result);
    }

    /// SLO - Shift Left then OR
    ///
    /// Flags affected: C, Z, N
    pub fn slo(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let shifted = {
            let value = bus.read(addr_result.address);
            self.asl_value(value)
        };
        bus.write(addr_result.address, shifted);
        self.a |= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RLA - Rotate Left then AND
    ///
    /// Flags affected: C, Z, N
    pub fn rla(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let rotated = {
            let value = bus.read(addr_result.address);
            self.rol_value(value)
        };
        bus.write(addr_result.address, rotated);
        self.a &= rotated;
        self.update_zero_and_negative_flags(self.a);
    }

    /// SRE - Shift Right then EOR
    ///
    /// Flags affected: C, Z, N
    pub fn sre(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let shifted = {
            let value = bus.read(addr_result.address);
            self.lsr_value(value)
        };
        bus.write(addr_result.address, shifted);
        self.a ^= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RRA - Rotate Right then ADC
    ///
    /// Flags affected: C, Z, V, N
    pub fn rra(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let rotated = {
            let value = bus.read(addr_result.address);
            self.ror_value(value)
        };
        bus.write(addr_result.address, rotated);
        self.add_with_carry(rotated);
    }

    /// ANC - AND then copy N into C
    ///
    /// Flags affected: C, Z, N
    pub fn anc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
        self.set_carry(self.a & 0x80 != 0);
    }

    /// ALR - AND then LSR on the accumulator
    ///
    /// Flags affected: C, Z, N
    pub fn alr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        let masked = self.a & value;
        self.a = self.lsr_value(masked);
        self.update_zero_and_negative_flags(self.a);
    }

    /// ARR - AND then ROR with quirky flags
    ///
    /// After the rotate, C comes from bit 6 of the result and V from bit 6
    /// XOR bit 5. The adder is involved on hardware, hence the odd flags.
    ///
    /// Flags affected: C, Z, V, N
    pub fn arr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        let masked = self.a & value;
        let carry_in = if self.get_carry() { 0x80 } else { 0 };
        let result = (masked >> 1) | carry_in;

        self.a = result;
        self.update_zero_and_negative_flags(result);
        self.set_carry(result & 0x40 != 0);
        self.update_flag(
            flags::OVERFLOW,
            ((result >> 6) ^ (result >> 5)) & 0x01 != 0,
        );
    }

    /// AXS - (A AND X) minus immediate, into X
    ///
    /// Subtraction without borrow-in; C set when no borrow occurred.
    ///
    /// Flags affected: C, Z, N
    pub fn axs(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        let base = self.a & self.x;
        let result = base.wrapping_sub(value);
        self.set_carry(base >= value);
        self.x = result;
        self.update_zero_and_negative_flags(result);
    }

    // ========================================
    // Unstable Instructions (best effort)
    // ========================================

    /// XAA - TXA then AND immediate
    ///
    /// Flags affected: Z, N
    pub fn xaa(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = self.x & value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// AHX - store A AND X AND (high byte + 1)
    ///
    /// Flags affected: none
    pub fn ahx(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        let addr = addr_result.address;
        let value = self.a & self.x & ((addr >> 8) as u8).wrapping_add(1);
        bus.write(addr, value);
    }

    /// SHX - store X AND (high byte + 1)
    ///
    /// Flags affected: none
    pub fn shx(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        let addr = addr_result.address;
        let value = self.x & ((addr >> 8) as u8).wrapping_add(1);
        bus.write(addr, value);
    }

    /// SHY - store Y AND (high byte + 1)
    ///
    /// Flags affected: none
    pub fn shy(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        let addr = addr_result.address;
        let value = self.y & ((addr >> 8) as u8).wrapping_add(1);
        bus.write(addr, value);
    }

    /// TAS - S = A AND X, then an AHX-style store
    ///
    /// Flags affected: none
    pub fn tas(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.sp = self.a & self.x;
        let addr = addr_result.address;
        let value = self.sp & ((addr >> 8) as u8).wrapping_add(1);
        bus.write(addr, value);
    }

    /// LAS - A = X = S = S AND memory
    ///
    /// Flags affected: Z, N
    pub fn las(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result) & self.sp;
        self.a = value;
        self.x = value;
        self.sp = value;
        self.update_zero_and_negative_flags(value);
    }
}
