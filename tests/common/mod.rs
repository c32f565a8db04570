// Shared helpers for machine-level tests
//
// Builds iNES images in memory so the tests need no ROM files on disk.

/// Build a single-bank NROM image
///
/// `program` is placed at $8000 (the start of PRG-ROM), the reset vector
/// points at `reset`, and the NMI/IRQ vectors at `nmi`/`irq`. The rest of
/// the bank is NOP-filled and an 8KB CHR bank of zeroes is appended.
pub fn build_nrom(program: &[u8], reset: u16, nmi: u16, irq: u16) -> Vec<u8> {
    let mut rom = vec![0x4E, 0x45, 0x53, 0x1A, 1, 1, 0, 0];
    rom.resize(16, 0);

    let mut prg = vec![0xEA; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    prg[0x3FFA] = (nmi & 0xFF) as u8;
    prg[0x3FFB] = (nmi >> 8) as u8;
    prg[0x3FFC] = (reset & 0xFF) as u8;
    prg[0x3FFD] = (reset >> 8) as u8;
    prg[0x3FFE] = (irq & 0xFF) as u8;
    prg[0x3FFF] = (irq >> 8) as u8;
    rom.extend(prg);

    rom.extend(std::iter::repeat(0).take(8 * 1024));
    rom
}

/// Master ticks equivalent to `cycles` NTSC CPU cycles
pub fn cpu_cycles(cycles: u32) -> u32 {
    cycles * 12
}
