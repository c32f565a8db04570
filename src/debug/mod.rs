// Debug module - instruction disassembly
//
// Backs the CPU's nestest-style trace output and is handy in tests. All
// reads go through side-effect-free bus peeks so disassembling never
// disturbs PPU latches or controller shift registers.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::OPCODE_TABLE;

/// Disassemble the instruction at `addr` into assembler syntax
///
/// Operands are rendered the way the instruction encodes them; branch
/// targets are resolved to absolute addresses.
pub fn disassemble_instruction(bus: &Bus, addr: u16) -> String {
    let opcode = bus.peek(addr);
    let info = &OPCODE_TABLE[opcode as usize];
    let name = info.mnemonic.name();

    let operand8 = bus.peek(addr.wrapping_add(1));
    let operand16 = {
        let lo = bus.peek(addr.wrapping_add(1)) as u16;
        let hi = bus.peek(addr.wrapping_add(2)) as u16;
        (hi << 8) | lo
    };

    match info.mode {
        AddressingMode::Implied => name.to_string(),
        AddressingMode::Accumulator => format!("{} a", name),
        AddressingMode::Immediate => format!("{} #${:02x}", name, operand8),
        AddressingMode::ZeroPage => format!("{} ${:02x}", name, operand8),
        AddressingMode::ZeroPageX => format!("{} ${:02x}, x", name, operand8),
        AddressingMode::ZeroPageY => format!("{} ${:02x}, y", name, operand8),
        AddressingMode::Relative => {
            // Resolve the signed offset against the following instruction
            let target = addr
                .wrapping_add(2)
                .wrapping_add(operand8 as i8 as u16);
            format!("{} ${:04x}", name, target)
        }
        AddressingMode::Absolute => format!("{} ${:04x}", name, operand16),
        AddressingMode::AbsoluteX => format!("{} ${:04x}, x", name, operand16),
        AddressingMode::AbsoluteY => format!("{} ${:04x}, y", name, operand16),
        AddressingMode::Indirect => format!("{} (${:04x})", name, operand16),
        AddressingMode::IndexedIndirect => format!("{} (${:02x}, x)", name, operand8),
        AddressingMode::IndirectIndexed => format!("{} (${:02x}), y", name, operand8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus_with_bytes(bytes: &[u8]) -> Bus {
        let mut bus = Bus::new();
        for (i, &b) in bytes.iter().enumerate() {
            bus.write(0x0200 + i as u16, b);
        }
        bus
    }

    #[test]
    fn test_disassemble_immediate() {
        let bus = bus_with_bytes(&[0xA9, 0x42]);
        assert_eq!(disassemble_instruction(&bus, 0x0200), "lda #$42");
    }

    #[test]
    fn test_disassemble_implied_and_accumulator() {
        let bus = bus_with_bytes(&[0xEA, 0x0A]);
        assert_eq!(disassemble_instruction(&bus, 0x0200), "nop");
        assert_eq!(disassemble_instruction(&bus, 0x0201), "asl a");
    }

    #[test]
    fn test_disassemble_absolute_indexed() {
        let bus = bus_with_bytes(&[0xBD, 0x34, 0x12]);
        assert_eq!(disassemble_instruction(&bus, 0x0200), "lda $1234, x");
    }

    #[test]
    fn test_disassemble_indirect_modes() {
        let bus = bus_with_bytes(&[0x6C, 0xFF, 0x10, 0xA1, 0x40, 0xB1, 0x40]);
        assert_eq!(disassemble_instruction(&bus, 0x0200), "jmp ($10ff)");
        assert_eq!(disassemble_instruction(&bus, 0x0203), "lda ($40, x)");
        assert_eq!(disassemble_instruction(&bus, 0x0205), "lda ($40), y");
    }

    #[test]
    fn test_disassemble_branch_resolves_target() {
        // BNE -4 at $0200 lands on $01FE
        let bus = bus_with_bytes(&[0xD0, 0xFC]);
        assert_eq!(disassemble_instruction(&bus, 0x0200), "bne $01fe");
    }

    #[test]
    fn test_disassemble_illegal_opcode() {
        let bus = bus_with_bytes(&[0xA7, 0x10]);
        assert_eq!(disassemble_instruction(&bus, 0x0200), "lax $10");
    }
}
