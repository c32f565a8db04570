// CPU decode/execute step and trace formatting

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, AddressingResult};
use crate::cpu::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::cpu::Cpu;

impl Cpu {
    /// Fetch, decode, and execute one instruction
    ///
    /// Returns the whole-instruction cycle cost: the table's base count,
    /// plus one for a page cross on the modes that pay it, plus whatever a
    /// taken branch adds.
    pub fn step(&mut self, bus: &mut Bus) -> u8 {
        let opcode = bus.read(self.pc);
        let info = &OPCODE_TABLE[opcode as usize];
        self.pc = self.pc.wrapping_add(1);

        let addr_result = match info.mode {
            AddressingMode::Implied => self.addr_implied(),
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(bus),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        };

        let extra_cycles = self.execute_instruction(info.mnemonic, info.mode, &addr_result, bus);

        let mut cycles = info.cycles;
        if info.page_cycle && addr_result.page_crossed {
            cycles += 1;
        }
        cycles + extra_cycles
    }

    /// Execute one decoded instruction
    ///
    /// The match is exhaustive over the mnemonic set, and the table maps
    /// all 256 opcodes onto it, so every fetched byte lands here.
    /// Returns the extra cycles of taken branches.
    fn execute_instruction(
        &mut self,
        mnemonic: Mnemonic,
        mode: AddressingMode,
        addr_result: &AddressingResult,
        bus: &mut Bus,
    ) -> u8 {
        let accumulator = mode == AddressingMode::Accumulator;
        match mnemonic {
            // Loads and stores
            Mnemonic::Lda => self.lda(bus, addr_result),
            Mnemonic::Ldx => self.ldx(bus, addr_result),
            Mnemonic::Ldy => self.ldy(bus, addr_result),
            Mnemonic::Sta => self.sta(bus, addr_result),
            Mnemonic::Stx => self.stx(bus, addr_result),
            Mnemonic::Sty => self.sty(bus, addr_result),

            // Transfers
            Mnemonic::Tax => self.tax(),
            Mnemonic::Tay => self.tay(),
            Mnemonic::Txa => self.txa(),
            Mnemonic::Tya => self.tya(),
            Mnemonic::Tsx => self.tsx(),
            Mnemonic::Txs => self.txs(),

            // Arithmetic
            Mnemonic::Adc => self.adc(bus, addr_result),
            Mnemonic::Sbc => self.sbc(bus, addr_result),
            Mnemonic::Inc => self.inc(bus, addr_result),
            Mnemonic::Dec => self.dec(bus, addr_result),
            Mnemonic::Inx => self.inx(),
            Mnemonic::Iny => self.iny(),
            Mnemonic::Dex => self.dex(),
            Mnemonic::Dey => self.dey(),

            // Logic
            Mnemonic::And => self.and(bus, addr_result),
            Mnemonic::Ora => self.ora(bus, addr_result),
            Mnemonic::Eor => self.eor(bus, addr_result),
            Mnemonic::Bit => self.bit(bus, addr_result),

            // Shifts and rotates
            Mnemonic::Asl => self.asl(bus, addr_result, accumulator),
            Mnemonic::Lsr => self.lsr(bus, addr_result, accumulator),
            Mnemonic::Rol => self.rol(bus, addr_result, accumulator),
            Mnemonic::Ror => self.ror(bus, addr_result, accumulator),

            // Compares
            Mnemonic::Cmp => self.cmp(bus, addr_result),
            Mnemonic::Cpx => self.cpx(bus, addr_result),
            Mnemonic::Cpy => self.cpy(bus, addr_result),

            // Branches: the only handlers that add cycles
            Mnemonic::Bpl => return self.bpl(addr_result),
            Mnemonic::Bmi => return self.bmi(addr_result),
            Mnemonic::Bvc => return self.bvc(addr_result),
            Mnemonic::Bvs => return self.bvs(addr_result),
            Mnemonic::Bcc => return self.bcc(addr_result),
            Mnemonic::Bcs => return self.bcs(addr_result),
            Mnemonic::Bne => return self.bne(addr_result),
            Mnemonic::Beq => return self.beq(addr_result),

            // Jumps and subroutines
            Mnemonic::Jmp => self.jmp(addr_result),
            Mnemonic::Jsr => self.jsr(bus, addr_result),
            Mnemonic::Rts => self.rts(bus),

            // Stack
            Mnemonic::Pha => self.pha(bus),
            Mnemonic::Pla => self.pla(bus),
            Mnemonic::Php => self.php(bus),
            Mnemonic::Plp => self.plp(bus),

            // Flags
            Mnemonic::Clc => self.clc(),
            Mnemonic::Sec => self.sec(),
            Mnemonic::Cli => self.cli(),
            Mnemonic::Sei => self.sei(),
            Mnemonic::Clv => self.clv(),
            Mnemonic::Cld => self.cld(),
            Mnemonic::Sed => self.sed(),

            // Interrupt-related and NOP
            Mnemonic::Brk => self.brk(bus),
            Mnemonic::Rti => self.rti(bus),
            Mnemonic::Nop => self.nop(),
            Mnemonic::Kil => self.kil(),

            // Stable illegal instructions
            Mnemonic::Lax => self.lax(bus, addr_result),
            Mnemonic::Sax => self.sax(bus, addr_result),
            Mnemonic::Dcp => self.dcp(bus, addr_result),
            Mnemonic::Isc => self.isc(bus, addr_result),
            Mnemonic::Slo => self.slo(bus, addr_result),
            Mnemonic::Rla => self.rla(bus, addr_result),
            Mnemonic::Sre => self.sre(bus, addr_result),
            Mnemonic::Rra => self.rra(bus, addr_result),
            Mnemonic::Anc => self.anc(bus, addr_result),
            Mnemonic::Alr => self.alr(bus, addr_result),
            Mnemonic::Arr => self.arr(bus, addr_result),
            Mnemonic::Axs => self.axs(bus, addr_result),

            // Unstable illegal instructions
            Mnemonic::Xaa => self.xaa(bus, addr_result),
            Mnemonic::Ahx => self.ahx(bus, addr_result),
            Mnemonic::Shx => self.shx(bus, addr_result),
            Mnemonic::Shy => self.shy(bus, addr_result),
            Mnemonic::Tas => self.tas(bus, addr_result),
            Mnemonic::Las => self.las(bus, addr_result),
        }
        0
    }

    /// Format the instruction at PC as a nestest-style trace line
    ///
    /// Format: `PC  OP OP OP  mnemonic operand  A:XX X:XX Y:XX P:XX SP:XX CYC:N`
    /// Uses side-effect-free bus peeks so tracing never perturbs the
    /// machine.
    pub fn trace(&self, bus: &Bus) -> String {
        let pc = self.pc;
        let opcode = bus.peek(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let byte2 = bus.peek(pc.wrapping_add(1));
        let byte3 = bus.peek(pc.wrapping_add(2));
        let hex_bytes = match info.bytes {
            1 => format!("{:02X}      ", opcode),
            2 => format!("{:02X} {:02X}   ", opcode, byte2),
            _ => format!("{:02X} {:02X} {:02X}", opcode, byte2, byte3),
        };

        let disassembly = crate::debug::disassemble_instruction(bus, pc);

        format!(
            "{:04X}  {}  {:<14}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }
}
