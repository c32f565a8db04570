// CPU module - 6502 (2A03) processor implementation
//
// The CPU is clocked at master-clock rate through `tick()`: a prescaler
// divides the master clock down to CPU cycles (12:1 NTSC, 16:1 PAL), and
// each CPU cycle either burns down the cost of the instruction in flight or
// enters the decode loop. Pending control signals are serviced at the
// decode boundary in fixed priority order: RESET, then NMI, then IRQ, then
// a normal opcode fetch.

pub mod addressing;
pub mod execute;
pub mod instructions;
pub mod opcodes;

use crate::bus::Bus;

/// Processor Status Flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
///
/// Bit 5 always reads back as 1. B is not a physical flip-flop: it only
/// exists in copies of P pushed on the stack, distinguishing BRK/PHP pushes
/// (B=1) from interrupt pushes (B=0).
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL: u8 = 0b0000_1000;
    pub const BREAK: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000;
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;
}

/// Interrupt vector addresses
///
/// 16-bit little-endian pointers at the top of the address space.
pub mod vectors {
    /// NMI vector ($FFFA-$FFFB), taken when the picture unit enters vblank
    pub const NMI: u16 = 0xFFFA;

    /// RESET vector ($FFFC-$FFFD), taken at power-on and on reset
    pub const RESET: u16 = 0xFFFC;

    /// IRQ/BRK vector ($FFFE-$FFFF), shared by hardware IRQ and BRK
    pub const IRQ: u16 = 0xFFFE;
}

/// Master-clock ticks per CPU cycle on NTSC machines
pub const NTSC_CLOCK_DIVIDER: u8 = 12;

/// Master-clock ticks per CPU cycle on PAL machines
pub const PAL_CLOCK_DIVIDER: u8 = 16;

/// 6502 CPU state
pub struct Cpu {
    // Architectural registers
    pub a: u8,      // Accumulator
    pub x: u8,      // Index Register X
    pub y: u8,      // Index Register Y
    pub sp: u8,     // Stack Pointer (offset into page $0100)
    pub pc: u16,    // Program Counter
    pub status: u8, // Processor Status flags

    /// Pending-RESET latch; set at power-on and by the reset line
    pub pending_reset: bool,
    /// Pending-NMI latch; set by the picture unit, cleared when serviced
    pub pending_nmi: bool,
    /// Pending-IRQ latch; honored only while I is clear
    pub pending_irq: bool,
    /// Set when a KIL opcode jammed the CPU; cleared only by reset
    pub halted: bool,

    /// Master-clock ticks counted toward the next CPU cycle
    prescaler: u8,
    /// Master-clock ticks per CPU cycle (12 NTSC, 16 PAL)
    clock_divider: u8,
    /// Remaining cycles of the instruction in flight; while nonzero a CPU
    /// cycle consumes one instead of fetching
    pub instr_delay: u32,

    /// Total CPU cycles executed (trace/diagnostics)
    pub cycles: u64,
}

impl Cpu {
    /// Create a CPU in the power-on state
    ///
    /// Power-on values per the 2A03: S = 0xFD, P = 0x34 (I, B, unused). The
    /// reset latch is asserted so the very first CPU cycle runs the RESET
    /// sequence and loads PC from $FFFC/$FFFD before any opcode fetch.
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: flags::INTERRUPT_DISABLE | flags::BREAK | flags::UNUSED,
            pending_reset: true,
            pending_nmi: false,
            pending_irq: false,
            halted: false,
            prescaler: 0,
            clock_divider: NTSC_CLOCK_DIVIDER,
            instr_delay: 0,
            cycles: 0,
        }
    }

    /// Select the master-clock divide ratio (12 NTSC, 16 PAL)
    pub fn set_clock_divider(&mut self, divider: u8) {
        self.clock_divider = divider;
    }

    // ========================================
    // Clocking
    // ========================================

    /// Advance one master-clock tick
    ///
    /// Counts the prescaler up; every `clock_divider` ticks one CPU cycle
    /// runs and the prescaler restarts.
    pub fn tick(&mut self, bus: &mut Bus) {
        self.prescaler += 1;
        if self.prescaler < self.clock_divider {
            return;
        }
        self.prescaler = 0;
        self.cycle(bus);
    }

    /// Run one CPU cycle
    ///
    /// Consumes `instr_delay` first; at the decode boundary services the
    /// pending control signals in priority order before fetching.
    pub fn cycle(&mut self, bus: &mut Bus) {
        if self.halted {
            return;
        }
        self.cycles = self.cycles.wrapping_add(1);
        if self.instr_delay > 0 {
            self.instr_delay -= 1;
            return;
        }

        if self.pending_reset {
            self.pending_reset = false;
            self.service_reset(bus);
        } else if self.pending_nmi {
            self.pending_nmi = false;
            self.service_nmi(bus);
        } else if self.pending_irq && !self.get_interrupt_disable() {
            self.pending_irq = false;
            self.service_irq(bus);
        } else {
            let cost = self.step(bus);
            // This cycle paid for the first of them
            self.instr_delay = cost.saturating_sub(1) as u32;
        }
    }

    // ========================================
    // Control Signals
    // ========================================

    /// Assert the reset line; serviced at the next decode boundary
    pub fn assert_reset(&mut self) {
        self.pending_reset = true;
        self.halted = false;
        self.instr_delay = 0;
    }

    /// Assert NMI (edge); serviced at the next decode boundary
    pub fn assert_nmi(&mut self) {
        self.pending_nmi = true;
    }

    /// Assert IRQ (level); serviced while I is clear
    pub fn assert_irq(&mut self) {
        self.pending_irq = true;
    }

    /// RESET sequence
    ///
    /// The hardware performs three phantom stack writes; only the S
    /// decrement is architectural. No flags besides I change and no memory
    /// is written.
    fn service_reset(&mut self, bus: &mut Bus) {
        self.sp = self.sp.wrapping_sub(3);
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vectors::RESET);
        self.instr_delay = 6; // 7 cycles including this one
    }

    /// NMI sequence: push PC and P (B clear), set I, load the NMI vector
    fn service_nmi(&mut self, bus: &mut Bus) {
        self.stack_push_u16(bus, self.pc);
        let pushed = (self.status & !flags::BREAK) | flags::UNUSED;
        self.stack_push(bus, pushed);
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vectors::NMI);
        self.instr_delay = 6;
    }

    /// IRQ sequence: identical to NMI but through the IRQ/BRK vector
    fn service_irq(&mut self, bus: &mut Bus) {
        self.stack_push_u16(bus, self.pc);
        let pushed = (self.status & !flags::BREAK) | flags::UNUSED;
        self.stack_push(bus, pushed);
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vectors::IRQ);
        self.instr_delay = 6;
    }

    // ========================================
    // Status Flag Helpers
    // ========================================

    /// Get the value of a specific flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Update a flag based on a condition
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    #[inline]
    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    #[inline]
    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    #[inline]
    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }

    #[inline]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    #[inline]
    pub fn get_decimal(&self) -> bool {
        self.get_flag(flags::DECIMAL)
    }

    #[inline]
    pub fn set_decimal(&mut self, value: bool) {
        self.update_flag(flags::DECIMAL, value);
    }

    #[inline]
    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }

    #[inline]
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    #[inline]
    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }

    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    /// Set Z and N from a result value
    ///
    /// The common tail of loads, transfers, and ALU operations.
    #[inline]
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative((value & 0x80) != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
