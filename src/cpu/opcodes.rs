// Opcode table for the 6502 CPU
//
// Every one of the 256 opcode slots is populated, official and illegal
// alike, so a fetched byte always lands on a valid entry. Each entry tags
// the mnemonic with its addressing mode, instruction length, and base cycle
// count; the executor matches exhaustively on the mnemonic.

use crate::cpu::addressing::AddressingMode;
use crate::cpu::addressing::AddressingMode::*;

/// Instruction mnemonics, official and illegal
///
/// Illegal opcodes that combine a read-modify-write step with an ALU step
/// (SLO, RLA, ...) get their own variants; the multi-byte NOP slots all map
/// to `Nop` and consume their operands through the addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    // Official instructions
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    // Stable illegal instructions
    Lax, Sax, Dcp, Isc, Slo, Rla, Sre, Rra, Anc, Alr, Arr, Axs,
    // Unstable illegal instructions (best-effort value patterns)
    Xaa, Ahx, Shx, Shy, Tas, Las,
    // Jam: the CPU halts until the next power cycle
    Kil,
}

impl Mnemonic {
    /// Lowercase mnemonic text used by the disassembler and trace output
    pub fn name(&self) -> &'static str {
        match self {
            Mnemonic::Adc => "adc", Mnemonic::And => "and", Mnemonic::Asl => "asl",
            Mnemonic::Bcc => "bcc", Mnemonic::Bcs => "bcs", Mnemonic::Beq => "beq",
            Mnemonic::Bit => "bit", Mnemonic::Bmi => "bmi", Mnemonic::Bne => "bne",
            Mnemonic::Bpl => "bpl", Mnemonic::Brk => "brk", Mnemonic::Bvc => "bvc",
            Mnemonic::Bvs => "bvs", Mnemonic::Clc => "clc", Mnemonic::Cld => "cld",
            Mnemonic::Cli => "cli", Mnemonic::Clv => "clv", Mnemonic::Cmp => "cmp",
            Mnemonic::Cpx => "cpx", Mnemonic::Cpy => "cpy", Mnemonic::Dec => "dec",
            Mnemonic::Dex => "dex", Mnemonic::Dey => "dey", Mnemonic::Eor => "eor",
            Mnemonic::Inc => "inc", Mnemonic::Inx => "inx", Mnemonic::Iny => "iny",
            Mnemonic::Jmp => "jmp", Mnemonic::Jsr => "jsr", Mnemonic::Lda => "lda",
            Mnemonic::Ldx => "ldx", Mnemonic::Ldy => "ldy", Mnemonic::Lsr => "lsr",
            Mnemonic::Nop => "nop", Mnemonic::Ora => "ora", Mnemonic::Pha => "pha",
            Mnemonic::Php => "php", Mnemonic::Pla => "pla", Mnemonic::Plp => "plp",
            Mnemonic::Rol => "rol", Mnemonic::Ror => "ror", Mnemonic::Rti => "rti",
            Mnemonic::Rts => "rts", Mnemonic::Sbc => "sbc", Mnemonic::Sec => "sec",
            Mnemonic::Sed => "sed", Mnemonic::Sei => "sei", Mnemonic::Sta => "sta",
            Mnemonic::Stx => "stx", Mnemonic::Sty => "sty", Mnemonic::Tax => "tax",
            Mnemonic::Tay => "tay", Mnemonic::Tsx => "tsx", Mnemonic::Txa => "txa",
            Mnemonic::Txs => "txs", Mnemonic::Tya => "tya", Mnemonic::Lax => "lax",
            Mnemonic::Sax => "sax", Mnemonic::Dcp => "dcp", Mnemonic::Isc => "isc",
            Mnemonic::Slo => "slo", Mnemonic::Rla => "rla", Mnemonic::Sre => "sre",
            Mnemonic::Rra => "rra", Mnemonic::Anc => "anc", Mnemonic::Alr => "alr",
            Mnemonic::Arr => "arr", Mnemonic::Axs => "axs", Mnemonic::Xaa => "xaa",
            Mnemonic::Ahx => "ahx", Mnemonic::Shx => "shx", Mnemonic::Shy => "shy",
            Mnemonic::Tas => "tas", Mnemonic::Las => "las", Mnemonic::Kil => "kil",
        }
    }
}

/// One dispatch-table entry
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Instruction mnemonic
    pub mnemonic: Mnemonic,
    /// Addressing mode
    pub mode: AddressingMode,
    /// Instruction length in bytes (opcode + operands)
    pub bytes: u8,
    /// Base cycle count
    pub cycles: u8,
    /// Whether a page cross during address calculation adds a cycle
    pub page_cycle: bool,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, bytes: u8, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        bytes,
        cycles,
        page_cycle: false,
    }
}

/// Entry whose cycle count grows by one on a page cross
const fn op_pg(mnemonic: Mnemonic, mode: AddressingMode, bytes: u8, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        bytes,
        cycles,
        page_cycle: true,
    }
}

use Mnemonic::*;

/// The full 256-entry dispatch table, indexed by opcode
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    /* 0x00 */ op(Brk, Implied, 1, 7),
    /* 0x01 */ op(Ora, IndexedIndirect, 2, 6),
    /* 0x02 */ op(Kil, Implied, 1, 2),
    /* 0x03 */ op(Slo, IndexedIndirect, 2, 8),
    /* 0x04 */ op(Nop, ZeroPage, 2, 3),
    /* 0x05 */ op(Ora, ZeroPage, 2, 3),
    /* 0x06 */ op(Asl, ZeroPage, 2, 5),
    /* 0x07 */ op(Slo, ZeroPage, 2, 5),
    /* 0x08 */ op(Php, Implied, 1, 3),
    /* 0x09 */ op(Ora, Immediate, 2, 2),
    /* 0x0A */ op(Asl, Accumulator, 1, 2),
    /* 0x0B */ op(Anc, Immediate, 2, 2),
    /* 0x0C */ op(Nop, Absolute, 3, 4),
    /* 0x0D */ op(Ora, Absolute, 3, 4),
    /* 0x0E */ op(Asl, Absolute, 3, 6),
    /* 0x0F */ op(Slo, Absolute, 3, 6),
    /* 0x10 */ op(Bpl, Relative, 2, 2),
    /* 0x11 */ op_pg(Ora, IndirectIndexed, 2, 5),
    /* 0x12 */ op(Kil, Implied, 1, 2),
    /* 0x13 */ op(Slo, IndirectIndexed, 2, 8),
    /* 0x14 */ op(Nop, ZeroPageX, 2, 4),
    /* 0x15 */ op(Ora, ZeroPageX, 2, 4),
    /* 0x16 */ op(Asl, ZeroPageX, 2, 6),
    /* 0x17 */ op(Slo, ZeroPageX, 2, 6),
    /* 0x18 */ op(Clc, Implied, 1, 2),
    /* 0x19 */ op_pg(Ora, AbsoluteY, 3, 4),
    /* 0x1A */ op(Nop, Implied, 1, 2),
    /* 0x1B */ op(Slo, AbsoluteY, 3, 7),
    /* 0x1C */ op_pg(Nop, AbsoluteX, 3, 4),
    /* 0x1D */ op_pg(Ora, AbsoluteX, 3, 4),
    /* 0x1E */ op(Asl, AbsoluteX, 3, 7),
    /* 0x1F */ op(Slo, AbsoluteX, 3, 7),
    /* 0x20 */ op(Jsr, Absolute, 3, 6),
    /* 0x21 */ op(And, IndexedIndirect, 2, 6),
    /* 0x22 */ op(Kil, Implied, 1, 2),
    /* 0x23 */ op(Rla, IndexedIndirect, 2, 8),
    /* 0x24 */ op(Bit, ZeroPage, 2, 3),
    /* 0x25 */ op(And, ZeroPage, 2, 3),
    /* 0x26 */ op(Rol, ZeroPage, 2, 5),
    /* 0x27 */ op(Rla, ZeroPage, 2, 5),
    /* 0x28 */ op(Plp, Implied, 1, 4),
    /* 0x29 */ op(And, Immediate, 2, 2),
    /* 0x2A */ op(Rol, Accumulator, 1, 2),
    /* 0x2B */ op(Anc, Immediate, 2, 2),
    /* 0x2C */ op(Bit, Absolute, 3, 4),
    /* 0x2D */ op(And, Absolute, 3, 4),
    /* 0x2E */ op(Rol, Absolute, 3, 6),
    /* 0x2F */ op(Rla, Absolute, 3, 6),
    /* 0x30 */ op(Bmi, Relative, 2, 2),
    /* 0x31 */ op_pg(And, IndirectIndexed, 2, 5),
    /* 0x32 */ op(Kil, Implied, 1, 2),
    /* 0x33 */ op(Rla, IndirectIndexed, 2, 8),
    /* 0x34 */ op(Nop, ZeroPageX, 2, 4),
    /* 0x35 */ op(And, ZeroPageX, 2, 4),
    /* 0x36 */ op(Rol, ZeroPageX, 2, 6),
    /* 0x37 */ op(Rla, ZeroPageX, 2, 6),
    /* 0x38 */ op(Sec, Implied, 1, 2),
    /* 0x39 */ op_pg(And, AbsoluteY, 3, 4),
    /* 0x3A */ op(Nop, Implied, 1, 2),
    /* 0x3B */ op(Rla, AbsoluteY, 3, 7),
    /* 0x3C */ op_pg(Nop, AbsoluteX, 3, 4),
    /* 0x3D */ op_pg(And, AbsoluteX, 3, 4),
    /* 0x3E */ op(Rol, AbsoluteX, 3, 7),
    /* 0x3F */ op(Rla, AbsoluteX, 3, 7),
    /* 0x40 */ op(Rti, Implied, 1, 6),
    /* 0x41 */ op(Eor, IndexedIndirect, 2, 6),
    /* 0x42 */ op(Kil, Implied, 1, 2),
    /* 0x43 */ op(Sre, IndexedIndirect, 2, 8),
    /* 0x44 */ op(Nop, ZeroPage, 2, 3),
    /* 0x45 */ op(Eor, ZeroPage, 2, 3),
    /* 0x46 */ op(Lsr, ZeroPage, 2, 5),
    /* 0x47 */ op(Sre, ZeroPage, 2, 5),
    /* 0x48 */ op(Pha, Implied, 1, 3),
    /* 0x49 */ op(Eor, Immediate, 2, 2),
    /* 0x4A */ op(Lsr, Accumulator, 1, 2),
    /* 0x4B */ op(Alr, Immediate, 2, 2),
    /* 0x4C */ op(Jmp, Absolute, 3, 3),
    /* 0x4D */ op(Eor, Absolute, 3, 4),
    /* 0x4E */ op(Lsr, Absolute, 3, 6),
    /* 0x4F */ op(Sre, Absolute, 3, 6),
    /* 0x50 */ op(Bvc, Relative, 2, 2),
    /* 0x51 */ op_pg(Eor, IndirectIndexed, 2, 5),
    /* 0x52 */ op(Kil, Implied, 1, 2),
    /* 0x53 */ op(Sre, IndirectIndexed, 2, 8),
    /* 0x54 */ op(Nop, ZeroPageX, 2, 4),
    /* 0x55 */ op(Eor, ZeroPageX, 2, 4),
    /* 0x56 */ op(Lsr, ZeroPageX, 2, 6),
    /* 0x57 */ op(Sre, ZeroPageX, 2, 6),
    /* 0x58 */ op(Cli, Implied, 1, 2),
    /* 0x59 */ op_pg(Eor, AbsoluteY, 3, 4),
    /* 0x5A */ op(Nop, Implied, 1, 2),
    /* 0x5B */ op(Sre, AbsoluteY, 3, 7),
    /* 0x5C */ op_pg(Nop, AbsoluteX, 3, 4),
    /* 0x5D */ op_pg(Eor, AbsoluteX, 3, 4),
    /* 0x5E */ op(Lsr, AbsoluteX, 3, 7),
    /* 0x5F */ op(Sre, AbsoluteX, 3, 7),
    /* 0x60 */ op(Rts, Implied, 1, 6),
    /* 0x61 */ op(Adc, IndexedIndirect, 2, 6),
    /* 0x62 */ op(Kil, Implied, 1, 2),
    /* 0x63 */ op(Rra, IndexedIndirect, 2, 8),
    /* 0x64 */ op(Nop, ZeroPage, 2, 3),
    /* 0x65 */ op(Adc, ZeroPage, 2, 3),
    /* 0x66 */ op(Ror, ZeroPage, 2, 5),
    /* 0x67 */ op(Rra, ZeroPage, 2, 5),
    /* 0x68 */ op(Pla, Implied, 1, 4),
    /* 0x69 */ op(Adc, Immediate, 2, 2),
    /* 0x6A */ op(Ror, Accumulator, 1, 2),
    /* 0x6B */ op(Arr, Immediate, 2, 2),
    /* 0x6C */ op(Jmp, Indirect, 3, 5),
    /* 0x6D */ op(Adc, Absolute, 3, 4),
    /* 0x6E */ op(Ror, Absolute, 3, 6),
    /* 0x6F */ op(Rra, Absolute, 3, 6),
    /* 0x70 */ op(Bvs, Relative, 2, 2),
    /* 0x71 */ op_pg(Adc, IndirectIndexed, 2, 5),
    /* 0x72 */ op(Kil, Implied, 1, 2),
    /* 0x73 */ op(Rra, IndirectIndexed, 2, 8),
    /* 0x74 */ op(Nop, ZeroPageX, 2, 4),
    /* 0x75 */ op(Adc, ZeroPageX, 2, 4),
    /* 0x76 */ op(Ror, ZeroPageX, 2, 6),
    /* 0x77 */ op(Rra, ZeroPageX, 2, 6),
    /* 0x78 */ op(Sei, Implied, 1, 2),
    /* 0x79 */ op_pg(Adc, AbsoluteY, 3, 4),
    /* 0x7A */ op(Nop, Implied, 1, 2),
    /* 0x7B */ op(Rra, AbsoluteY, 3, 7),
    /* 0x7C */ op_pg(Nop, AbsoluteX, 3, 4),
    /* 0x7D */ op_pg(Adc, AbsoluteX, 3, 4),
    /* 0x7E */ op(Ror, AbsoluteX, 3, 7),
    /* 0x7F */ op(Rra, AbsoluteX, 3, 7),
    /* 0x80 */ op(Nop, Immediate, 2, 2),
    /* 0x81 */ op(Sta, IndexedIndirect, 2, 6),
    /* 0x82 */ op(Nop, Immediate, 2, 2),
    /* 0x83 */ op(Sax, IndexedIndirect, 2, 6),
    /* 0x84 */ op(Sty, ZeroPage, 2, 3),
    /* 0x85 */ op(Sta, ZeroPage, 2, 3),
    /* 0x86 */ op(Stx, ZeroPage, 2, 3),
    /* 0x87 */ op(Sax, ZeroPage, 2, 3),
    /* 0x88 */ op(Dey, Implied, 1, 2),
    /* 0x89 */ op(Nop, Immediate, 2, 2),
    /* 0x8A */ op(Txa, Implied, 1, 2),
    /* 0x8B */ op(Xaa, Immediate, 2, 2),
    /* 0x8C */ op(Sty, Absolute, 3, 4),
    /* 0x8D */ op(Sta, Absolute, 3, 4),
    /* 0x8E */ op(Stx, Absolute, 3, 4),
    /* 0x8F */ op(Sax, Absolute, 3, 4),
    /* 0x90 */ op(Bcc, Relative, 2, 2),
    /* 0x91 */ op(Sta, IndirectIndexed, 2, 6),
    /* 0x92 */ op(Kil, Implied, 1, 2),
    /* 0x93 */ op(Ahx, IndirectIndexed, 2, 6),
    /* 0x94 */ op(Sty, ZeroPageX, 2, 4),
    /* 0x95 */ op(Sta, ZeroPageX, 2, 4),
    /* 0x96 */ op(Stx, ZeroPageY, 2, 4),
    /* 0x97 */ op(Sax, ZeroPageY, 2, 4),
    /* 0x98 */ op(Tya, Implied, 1, 2),
    /* 0x99 */ op(Sta, AbsoluteY, 3, 5),
    /* 0x9A */ op(Txs, Implied, 1, 2),
    /* 0x9B */ op(Tas, AbsoluteY, 3, 5),
    /* 0x9C */ op(Shy, AbsoluteX, 3, 5),
    /* 0x9D */ op(Sta, AbsoluteX, 3, 5),
    /* 0x9E */ op(Shx, AbsoluteY, 3, 5),
    /* 0x9F */ op(Ahx, AbsoluteY, 3, 5),
    /* 0xA0 */ op(Ldy, Immediate, 2, 2),
    /* 0xA1 */ op(Lda, IndexedIndirect, 2, 6),
    /* 0xA2 */ op(Ldx, Immediate, 2, 2),
    /* 0xA3 */ op(Lax, IndexedIndirect, 2, 6),
    /* 0xA4 */ op(Ldy, ZeroPage, 2, 3),
    /* 0xA5 */ op(Lda, ZeroPage, 2, 3),
    /* 0xA6 */ op(Ldx, ZeroPage, 2, 3),
    /* 0xA7 */ op(Lax, ZeroPage, 2, 3),
    /* 0xA8 */ op(Tay, Implied, 1, 2),
    /* 0xA9 */ op(Lda, Immediate, 2, 2),
    /* 0xAA */ op(Tax, Implied, 1, 2),
    /* 0xAB */ op(Lax, Immediate, 2, 2),
    /* 0xAC */ op(Ldy, Absolute, 3, 4),
    /* 0xAD */ op(Lda, Absolute, 3, 4),
    /* 0xAE */ op(Ldx, Absolute, 3, 4),
    /* 0xAF */ op(Lax, Absolute, 3, 4),
    /* 0xB0 */ op(Bcs, Relative, 2, 2),
    /* 0xB1 */ op_pg(Lda, IndirectIndexed, 2, 5),
    /* 0xB2 */ op(Kil, Implied, 1, 2),
    /* 0xB3 */ op_pg(Lax, IndirectIndexed, 2, 5),
    /* 0xB4 */ op(Ldy, ZeroPageX, 2, 4),
    /* 0xB5 */ op(Lda, ZeroPageX, 2, 4),
    /* 0xB6 */ op(Ldx, ZeroPageY, 2, 4),
    /* 0xB7 */ op(Lax, ZeroPageY, 2, 4),
    /* 0xB8 */ op(Clv, Implied, 1, 2),
    /* 0xB9 */ op_pg(Lda, AbsoluteY, 3, 4),
    /* 0xBA */ op(Tsx, Implied, 1, 2),
    /* 0xBB */ op_pg(Las, AbsoluteY, 3, 4),
    /* 0xBC */ op_pg(Ldy, AbsoluteX, 3, 4),
    /* 0xBD */ op_pg(Lda, AbsoluteX, 3, 4),
    /* 0xBE */ op_pg(Ldx, AbsoluteY, 3, 4),
    /* 0xBF */ op_pg(Lax, AbsoluteY, 3, 4),
    /* 0xC0 */ op(Cpy, Immediate, 2, 2),
    /* 0xC1 */ op(Cmp, IndexedIndirect, 2, 6),
    /* 0xC2 */ op(Nop, Immediate, 2, 2),
    /* 0xC3 */ op(Dcp, IndexedIndirect, 2, 8),
    /* 0xC4 */ op(Cpy, ZeroPage, 2, 3),
    /* 0xC5 */ op(Cmp, ZeroPage, 2, 3),
    /* 0xC6 */ op(Dec, ZeroPage, 2, 5),
    /* 0xC7 */ op(Dcp, ZeroPage, 2, 5),
    /* 0xC8 */ op(Iny, Implied, 1, 2),
    /* 0xC9 */ op(Cmp, Immediate, 2, 2),
    /* 0xCA */ op(Dex, Implied, 1, 2),
    /* 0xCB */ op(Axs, Immediate, 2, 2),
    /* 0xCC */ op(Cpy, Absolute, 3, 4),
    /* 0xCD */ op(Cmp, Absolute, 3, 4),
    /* 0xCE */ op(Dec, Absolute, 3, 6),
    /* 0xCF */ op(Dcp, Absolute, 3, 6),
    /* 0xD0 */ op(Bne, Relative, 2, 2),
    /* 0xD1 */ op_pg(Cmp, IndirectIndexed, 2, 5),
    /* 0xD2 */ op(Kil, Implied, 1, 2),
    /* 0xD3 */ op(Dcp, IndirectIndexed, 2, 8),
    /* 0xD4 */ op(Nop, ZeroPageX, 2, 4),
    /* 0xD5 */ op(Cmp, ZeroPageX, 2, 4),
    /* 0xD6 */ op(Dec, ZeroPageX, 2, 6),
    /* 0xD7 */ op(Dcp, ZeroPageX, 2, 6),
    /* 0xD8 */ op(Cld, Implied, 1, 2),
    /* 0xD9 */ op_pg(Cmp, AbsoluteY, 3, 4),
    /* 0xDA */ op(Nop, Implied, 1, 2),
    /* 0xDB */ op(Dcp, AbsoluteY, 3, 7),
    /* 0xDC */ op_pg(Nop, AbsoluteX, 3, 4),
    /* 0xDD */ op_pg(Cmp, AbsoluteX, 3, 4),
    /* 0xDE */ op(Dec, AbsoluteX, 3, 7),
    /* 0xDF */ op(Dcp, AbsoluteX, 3, 7),
    /* 0xE0 */ op(Cpx, Immediate, 2, 2),
    /* 0xE1 */ op(Sbc, IndexedIndirect, 2, 6),
    /* 0xE2 */ op(Nop, Immediate, 2, 2),
    /* 0xE3 */ op(Isc, IndexedIndirect, 2, 8),
    /* 0xE4 */ op(Cpx, ZeroPage, 2, 3),
    /* 0xE5 */ op(Sbc, ZeroPage, 2, 3),
    /* 0xE6 */ op(Inc, ZeroPage, 2, 5),
    /* 0xE7 */ op(Isc, ZeroPage, 2, 5),
    /* 0xE8 */ op(Inx, Implied, 1, 2),
    /* 0xE9 */ op(Sbc, Immediate, 2, 2),
    /* 0xEA */ op(Nop, Implied, 1, 2),
    /* 0xEB */ op(Sbc, Immediate, 2, 2),
    /* 0xEC */ op(Cpx, Absolute, 3, 4),
    /* 0xED */ op(Sbc, Absolute, 3, 4),
    /* 0xEE */ op(Inc, Absolute, 3, 6),
    /* 0xEF */ op(Isc, Absolute, 3, 6),
    /* 0xF0 */ op(Beq, Relative, 2, 2),
    /* 0xF1 */ op_pg(Sbc, IndirectIndexed, 2, 5),
    /* 0xF2 */ op(Kil, Implied, 1, 2),
    /* 0xF3 */ op(Isc, IndirectIndexed, 2, 8),
    /* 0xF4 */ op(Nop, ZeroPageX, 2, 4),
    /* 0xF5 */ op(Sbc, ZeroPageX, 2, 4),
    /* 0xF6 */ op(Inc, ZeroPageX, 2, 6),
    /* 0xF7 */ op(Isc, ZeroPageX, 2, 6),
    /* 0xF8 */ op(Sed, Implied, 1, 2),
    /* 0xF9 */ op_pg(Sbc, AbsoluteY, 3, 4),
    /* 0xFA */ op(Nop, Implied, 1, 2),
    /* 0xFB */ op(Isc, AbsoluteY, 3, 7),
    /* 0xFC */ op_pg(Nop, AbsoluteX, 3, 4),
    /* 0xFD */ op_pg(Sbc, AbsoluteX, 3, 4),
    /* 0xFE */ op(Inc, AbsoluteX, 3, 7),
    /* 0xFF */ op(Isc, AbsoluteX, 3, 7),
];
