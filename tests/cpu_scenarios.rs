// Machine-level CPU scenarios
//
// Each test boots a small NROM image and steps the master clock just far
// enough to observe the architectural effect under test. The cycle counts
// follow the opcode table: RESET takes 7 CPU cycles, then each instruction
// its base cost.

mod common;

use common::{build_nrom, cpu_cycles};
use nes_emu::Emulator;

#[test]
fn reset_vector_load() {
    // PRG offsets $3FFC/$3FFD hold 0x34, 0x12; PC must come out as 0x1234
    let rom = build_nrom(&[], 0x1234, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(1));
    assert_eq!(
        emulator.cpu().pc,
        0x1234,
        "the reset sequence runs before any opcode fetch"
    );
}

#[test]
fn adc_carry_and_overflow() {
    // LDA #$50; ADC #$50 -> A=0xA0 with N and V set, C and Z clear
    let rom = build_nrom(&[0xA9, 0x50, 0x69, 0x50], 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(7 + 2 + 2));
    let cpu = emulator.cpu();
    assert_eq!(cpu.a, 0xA0);
    assert!(cpu.get_negative(), "N set");
    assert!(cpu.get_overflow(), "V set: positive + positive gave negative");
    assert!(!cpu.get_carry(), "C clear: no unsigned overflow");
    assert!(!cpu.get_zero(), "Z clear");
}

#[test]
fn adc_unsigned_boundary() {
    // LDA #$FF; SEC; ADC #$00 -> A=0x00 with C and Z set
    let rom = build_nrom(&[0xA9, 0xFF, 0x38, 0x69, 0x00], 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(7 + 2 + 2 + 2));
    let cpu = emulator.cpu();
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.get_carry(), "C set: wrapped past 0xFF");
    assert!(cpu.get_zero(), "Z set");
    assert!(!cpu.get_negative());
    assert!(!cpu.get_overflow());
}

#[test]
fn cmp_ordering() {
    // LDA #$40; CMP #$40; CMP #$41
    let rom = build_nrom(
        &[0xA9, 0x40, 0xC9, 0x40, 0xC9, 0x41],
        0x8000,
        0x8000,
        0x8000,
    );
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(7 + 2 + 2));
    {
        let cpu = emulator.cpu();
        assert!(cpu.get_zero(), "equal: Z set");
        assert!(cpu.get_carry(), "equal: C set");
        assert!(!cpu.get_negative());
    }

    emulator.run_ticks(cpu_cycles(2));
    let cpu = emulator.cpu();
    assert!(!cpu.get_zero(), "A < M: Z clear");
    assert!(!cpu.get_carry(), "A < M: C clear");
    assert!(cpu.get_negative(), "difference 0xFF has bit 7 set");
}

#[test]
fn jsr_rts_stack_discipline() {
    // LDX #$FD; TXS; JSR $8009; NOPs; RTS at $8009
    let program = [
        0xA2, 0xFD, // $8000 LDX #$FD
        0x9A, // $8002 TXS
        0x20, 0x09, 0x80, // $8003 JSR $8009
        0xEA, 0xEA, 0xEA, // $8006 NOPs
        0x60, // $8009 RTS
    ];
    let rom = build_nrom(&program, 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    // Through the JSR (7 reset + 2 + 2 + 6)
    emulator.run_ticks(cpu_cycles(17));
    assert_eq!(emulator.cpu().pc, 0x8009, "inside the subroutine");
    assert_eq!(emulator.cpu().sp, 0xFB, "two return bytes pushed");
    assert_eq!(
        emulator.bus().peek(0x01FD),
        0x80,
        "return address high byte"
    );
    assert_eq!(
        emulator.bus().peek(0x01FC),
        0x05,
        "return address low byte is the JSR's last byte"
    );

    // Through the RTS
    emulator.run_ticks(cpu_cycles(6));
    assert_eq!(
        emulator.cpu().pc,
        0x8006,
        "RTS lands on the instruction after the JSR"
    );
    assert_eq!(emulator.cpu().sp, 0xFD, "stack balanced");
}

#[test]
fn indirect_jmp_page_boundary_bug() {
    // Build the pointer bytes in work RAM, then JMP ($10FF). The high
    // byte must come from $1000, not $1100.
    let program = [
        0xA9, 0x34, // LDA #$34
        0x8D, 0xFF, 0x10, // STA $10FF
        0xA9, 0x12, // LDA #$12
        0x8D, 0x00, 0x10, // STA $1000
        0xA9, 0xAB, // LDA #$AB
        0x8D, 0x00, 0x11, // STA $1100
        0x6C, 0xFF, 0x10, // JMP ($10FF)
    ];
    let rom = build_nrom(&program, 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    // 7 reset + 3 x (2 + 4) + JMP's execute cycle
    emulator.run_ticks(cpu_cycles(7 + 18 + 1));
    assert_eq!(
        emulator.cpu().pc,
        0x1234,
        "JMP ($10FF) wraps the pointer read within the page"
    );
}

#[test]
fn zero_page_x_wraps_within_page() {
    // Store a marker at $0000, then read it through $FF,X with X=1
    let program = [
        0xA9, 0x77, // LDA #$77
        0x85, 0x00, // STA $00
        0xA2, 0x01, // LDX #$01
        0xB5, 0xFF, // LDA $FF,X -> reads $00
    ];
    let rom = build_nrom(&program, 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(7 + 2 + 3 + 2 + 4));
    assert_eq!(
        emulator.cpu().a,
        0x77,
        "$FF + 1 wraps to $00, not $0100"
    );
}

#[test]
fn php_pushes_bits_4_and_5_set() {
    // LDX #$FD; TXS; PHP; PLA -> A carries the pushed P copy
    let program = [0xA2, 0xFD, 0x9A, 0x08, 0x68];
    let rom = build_nrom(&program, 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(7 + 2 + 2 + 3 + 4));
    assert_eq!(
        emulator.cpu().a & 0x30,
        0x30,
        "bit 5 and B are always set in a pushed P copy"
    );
    assert_eq!(emulator.cpu().sp, 0xFD, "push then pull balances S");
}

#[test]
fn branch_taken_backwards() {
    // SEC; BCS -2 loops onto itself: PC must stay inside the two-byte loop
    let program = [
        0x38, // $8000 SEC
        0xB0, 0xFE, // $8001 BCS -2 -> $8001
    ];
    let rom = build_nrom(&program, 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(64));
    let pc = emulator.cpu().pc;
    assert!(
        (0x8001..=0x8003).contains(&pc),
        "the backward branch pins execution to the loop, pc={:04X}",
        pc
    );
}

#[test]
fn wram_mirror_visible_to_program() {
    // Write through the $0800 mirror, read back at the base address
    let program = [
        0xA9, 0x5A, // LDA #$5A
        0x8D, 0x42, 0x08, // STA $0842
        0xAD, 0x42, 0x00, // LDA $0042
    ];
    let rom = build_nrom(&program, 0x8000, 0x8000, 0x8000);
    let mut emulator = Emulator::new(&rom).unwrap();

    emulator.run_ticks(cpu_cycles(7 + 2 + 4 + 4));
    assert_eq!(emulator.cpu().a, 0x5A, "mirror write reaches the base");
    assert_eq!(emulator.bus().peek(0x0042), 0x5A);
}
