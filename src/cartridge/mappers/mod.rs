// Mappers module - cartridge bank-switching hardware
//
// Each NES cartridge carries board logic that decides which ROM banks are
// visible in which address windows. Only two boards are supported: NROM
// (mapper 0) and MMC1 (mapper 1). With exactly two variants the dispatch is
// a tagged enum rather than a trait object; each variant carries only the
// state it needs.

mod mapper0;
mod mapper1;

use super::{Cartridge, Mirroring};
pub use mapper0::Mapper0;
pub use mapper1::Mapper1;

/// Error type for mapper creation
#[derive(Debug)]
pub enum MapperError {
    /// The cartridge names a mapper number this crate does not implement
    UnsupportedMapper(u8),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(num) => {
                write!(f, "Mapper {} is not supported", num)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Cartridge mapper dispatch
///
/// The mapper owns the ROM payload and serves two address spaces: the CPU
/// side (PRG-ROM, PRG-RAM, bank registers) and the PPU side (pattern
/// tables). The bus intercepts everything below $4020 before it reaches the
/// CPU-side entry points.
pub enum Mapper {
    /// Mapper 0 (NROM): static PRG/CHR mapping
    Nrom(Mapper0),
    /// Mapper 1 (MMC1): serial shift register, switchable banks
    Mmc1(Mapper1),
}

impl Mapper {
    /// Build the mapper named by the cartridge header
    ///
    /// # Errors
    /// Returns `MapperError::UnsupportedMapper` for any mapper number other
    /// than 0 or 1.
    pub fn new(cartridge: Cartridge) -> Result<Self, MapperError> {
        match cartridge.mapper {
            0 => Ok(Mapper::Nrom(Mapper0::new(cartridge))),
            1 => Ok(Mapper::Mmc1(Mapper1::new(cartridge))),
            num => Err(MapperError::UnsupportedMapper(num)),
        }
    }

    /// Read from the CPU address space (valid for $4020-$FFFF)
    pub fn cpu_read(&self, addr: u16) -> u8 {
        match self {
            Mapper::Nrom(m) => m.cpu_read(addr),
            Mapper::Mmc1(m) => m.cpu_read(addr),
        }
    }

    /// Write to the CPU address space (valid for $4020-$FFFF)
    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        match self {
            Mapper::Nrom(m) => m.cpu_write(addr, value),
            Mapper::Mmc1(m) => m.cpu_write(addr, value),
        }
    }

    /// Read from the PPU address space (pattern tables, $0000-$1FFF)
    pub fn ppu_read(&self, addr: u16) -> u8 {
        match self {
            Mapper::Nrom(m) => m.ppu_read(addr),
            Mapper::Mmc1(m) => m.ppu_read(addr),
        }
    }

    /// Write to the PPU address space (CHR-RAM boards only)
    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        match self {
            Mapper::Nrom(m) => m.ppu_write(addr, value),
            Mapper::Mmc1(m) => m.ppu_write(addr, value),
        }
    }

    /// Current nametable mirroring
    ///
    /// NROM mirroring is fixed by the header; MMC1 can change it at runtime.
    pub fn mirroring(&self) -> Mirroring {
        match self {
            Mapper::Nrom(m) => m.mirroring(),
            Mapper::Mmc1(m) => m.mirroring(),
        }
    }
}
