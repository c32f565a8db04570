// Cartridge module - iNES ROM loading and mapper dispatch
//
// This module parses iNES-format ROM images and exposes the cartridge
// contents (PRG-ROM, CHR-ROM/RAM, mapper number, mirroring) to the rest of
// the system.
//
// # iNES Layout
//
// ```text
// Bytes 0-3:  Magic "NES\x1A" (4E 45 53 1A)
// Byte  4:    PRG-ROM bank count (16KB units)
// Byte  5:    CHR-ROM bank count (8KB units, 0 = 8KB CHR-RAM)
// Byte  6:    Flags - bits 0,3: mirroring, bit 1: battery, bit 2: trainer,
//             bits 4-7: mapper number low nibble
// Byte  7:    Flags - bits 4-7: mapper number high nibble
// Bytes 8-15: iNES 2.0 fields or zero padding
// Body:       optional 512-byte trainer, PRG-ROM, CHR-ROM
// ```

pub mod mappers;

use std::fs;
use std::path::Path;

/// Size of the iNES header in bytes
const HEADER_SIZE: usize = 16;

/// Size of the optional trainer block in bytes
const TRAINER_SIZE: usize = 512;

/// Size of one PRG-ROM bank (16KB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// Size of one CHR bank (8KB)
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Error type for iNES parsing failures
///
/// All variants are hard construction failures: a cartridge is either parsed
/// completely or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum INesError {
    /// The first four bytes are not "NES\x1A"
    InvalidMagic,
    /// The blob is shorter than the 16-byte header
    TruncatedHeader,
    /// The blob ends before the PRG/CHR data announced by the header
    TruncatedData {
        expected: usize,
        actual: usize,
    },
    /// Filesystem error while reading a ROM file
    Io(String),
}

impl std::fmt::Display for INesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            INesError::InvalidMagic => write!(f, "invalid iNES magic"),
            INesError::TruncatedHeader => write!(f, "iNES header is truncated"),
            INesError::TruncatedData { expected, actual } => {
                write!(
                    f,
                    "iNES body is truncated: expected {} bytes, got {}",
                    expected, actual
                )
            }
            INesError::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

impl std::error::Error for INesError {}

/// Nametable mirroring arrangement
///
/// Determined by the cartridge header for fixed-mirroring boards and by the
/// mapper at runtime for boards like MMC1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000=$2400, $2800=$2C00
    Horizontal,
    /// $2000=$2800, $2400=$2C00
    Vertical,
    /// All four nametables share the first table
    SingleScreenLower,
    /// All four nametables share the second table
    SingleScreenUpper,
    /// Four independent nametables (cartridge-supplied VRAM)
    FourScreen,
}

/// Parsed iNES header fields
#[derive(Debug, Clone, Copy)]
pub struct INesHeader {
    /// PRG-ROM bank count (16KB units)
    pub prg_banks: u8,
    /// CHR-ROM bank count (8KB units, 0 means the board carries CHR-RAM)
    pub chr_banks: u8,
    /// Mapper number assembled from the flag nibbles
    pub mapper: u8,
    /// Nametable mirroring from flags 6
    pub mirroring: Mirroring,
    /// Battery-backed PRG-RAM present (flags 6 bit 1)
    pub has_battery: bool,
    /// 512-byte trainer present (flags 6 bit 2)
    pub has_trainer: bool,
}

impl INesHeader {
    /// Parse the 16-byte iNES header
    ///
    /// # Errors
    /// Returns `INesError::TruncatedHeader` if fewer than 16 bytes are given,
    /// `INesError::InvalidMagic` if the magic does not match.
    pub fn parse(data: &[u8]) -> Result<Self, INesError> {
        if data.len() < HEADER_SIZE {
            return Err(INesError::TruncatedHeader);
        }
        if &data[0..4] != b"NES\x1A" {
            return Err(INesError::InvalidMagic);
        }

        let flags6 = data[6];
        let flags7 = data[7];

        // Bit 3 (four-screen) overrides bit 0 (vertical/horizontal)
        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(INesHeader {
            prg_banks: data[4],
            chr_banks: data[5],
            mapper: (flags7 & 0xF0) | (flags6 >> 4),
            mirroring,
            has_battery: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
        })
    }
}

/// A loaded cartridge: header fields plus the ROM payload
///
/// The cartridge owns the raw PRG and CHR data. Banking decisions live in the
/// mapper built from it (see [`mappers::Mapper`]).
pub struct Cartridge {
    /// PRG-ROM data (`prg_banks` * 16KB)
    pub prg_rom: Vec<u8>,
    /// CHR-ROM data, or 8KB of zeroed CHR-RAM when the header announces none
    pub chr_rom: Vec<u8>,
    /// Whether `chr_rom` is writable CHR-RAM
    pub chr_is_ram: bool,
    /// Mapper number from the header
    pub mapper: u8,
    /// Nametable mirroring from the header
    pub mirroring: Mirroring,
    /// Battery-backed PRG-RAM present
    pub has_battery: bool,
}

impl Cartridge {
    /// Parse a cartridge from an in-memory iNES blob
    ///
    /// The optional 512-byte trainer is skipped; it is not needed for
    /// emulation of any board this crate supports.
    ///
    /// # Errors
    /// Returns an `INesError` if the magic is wrong or the blob is shorter
    /// than the header announces.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, INesError> {
        let header = INesHeader::parse(data)?;

        let prg_size = header.prg_banks as usize * PRG_BANK_SIZE;
        let chr_size = header.chr_banks as usize * CHR_BANK_SIZE;
        let body_start = if header.has_trainer {
            HEADER_SIZE + TRAINER_SIZE
        } else {
            HEADER_SIZE
        };

        let expected = body_start + prg_size + chr_size;
        if data.len() < expected {
            return Err(INesError::TruncatedData {
                expected,
                actual: data.len(),
            });
        }

        let prg_rom = data[body_start..body_start + prg_size].to_vec();

        // A CHR bank count of zero means the board has 8KB of CHR-RAM
        let (chr_rom, chr_is_ram) = if chr_size == 0 {
            (vec![0u8; CHR_BANK_SIZE], true)
        } else {
            let chr_start = body_start + prg_size;
            (data[chr_start..chr_start + chr_size].to_vec(), false)
        };

        Ok(Cartridge {
            prg_rom,
            chr_rom,
            chr_is_ram,
            mapper: header.mapper,
            mirroring: header.mirroring,
            has_battery: header.has_battery,
        })
    }

    /// Load a cartridge from an iNES file on disk
    ///
    /// # Errors
    /// Returns `INesError::Io` on filesystem errors, otherwise the same
    /// errors as [`Cartridge::from_ines_bytes`].
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, INesError> {
        let data = fs::read(path).map_err(|e| INesError::Io(e.to_string()))?;
        Self::from_ines_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal iNES image: header + filled PRG + filled CHR
    fn build_ines(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, flags6, flags7];
        data.resize(HEADER_SIZE, 0);
        data.extend(std::iter::repeat(0xAA).take(prg_banks as usize * PRG_BANK_SIZE));
        data.extend(std::iter::repeat(0xBB).take(chr_banks as usize * CHR_BANK_SIZE));
        data
    }

    #[test]
    fn test_parse_minimal_rom() {
        let data = build_ines(1, 1, 0x00, 0x00);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse should succeed");

        assert_eq!(cart.prg_rom.len(), PRG_BANK_SIZE, "one 16KB PRG bank");
        assert_eq!(cart.chr_rom.len(), CHR_BANK_SIZE, "one 8KB CHR bank");
        assert!(!cart.chr_is_ram, "CHR should be ROM");
        assert_eq!(cart.mapper, 0, "mapper 0");
        assert_eq!(cart.mirroring, Mirroring::Horizontal);
        assert!(!cart.has_battery);
    }

    #[test]
    fn test_invalid_magic() {
        let mut data = build_ines(1, 1, 0x00, 0x00);
        data[0] = 0x4D;
        assert!(
            matches!(
                Cartridge::from_ines_bytes(&data),
                Err(INesError::InvalidMagic)
            ),
            "a wrong magic must be rejected"
        );
    }

    #[test]
    fn test_truncated_header() {
        let data = vec![0x4E, 0x45, 0x53, 0x1A, 0x01];
        assert!(matches!(
            Cartridge::from_ines_bytes(&data),
            Err(INesError::TruncatedHeader)
        ));
    }

    #[test]
    fn test_truncated_body() {
        let mut data = build_ines(2, 1, 0x00, 0x00);
        data.truncate(HEADER_SIZE + PRG_BANK_SIZE); // half the announced PRG
        assert!(
            matches!(
                Cartridge::from_ines_bytes(&data),
                Err(INesError::TruncatedData { .. })
            ),
            "a short body must be rejected"
        );
    }

    #[test]
    fn test_mapper_number_nibbles() {
        // flags6 high nibble = 1, flags7 high nibble = 4 -> mapper 0x41
        let data = build_ines(1, 1, 0x10, 0x40);
        let cart = Cartridge::from_ines_bytes(&data).unwrap();
        assert_eq!(cart.mapper, 0x41, "mapper number assembled from nibbles");
    }

    #[test]
    fn test_mirroring_flags() {
        let vertical = Cartridge::from_ines_bytes(&build_ines(1, 1, 0x01, 0)).unwrap();
        assert_eq!(vertical.mirroring, Mirroring::Vertical);

        let four_screen = Cartridge::from_ines_bytes(&build_ines(1, 1, 0x09, 0)).unwrap();
        assert_eq!(
            four_screen.mirroring,
            Mirroring::FourScreen,
            "four-screen bit overrides vertical"
        );
    }

    #[test]
    fn test_trainer_is_skipped() {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, 1, 0, 0x04, 0x00];
        data.resize(HEADER_SIZE, 0);
        data.extend(std::iter::repeat(0xEE).take(TRAINER_SIZE));
        data.extend(std::iter::repeat(0x11).take(PRG_BANK_SIZE));

        let cart = Cartridge::from_ines_bytes(&data).unwrap();
        assert_eq!(cart.prg_rom[0], 0x11, "PRG must start after the trainer");
    }

    #[test]
    fn test_chr_ram_allocation() {
        let data = build_ines(1, 0, 0x00, 0x00);
        let cart = Cartridge::from_ines_bytes(&data).unwrap();
        assert_eq!(cart.chr_rom.len(), CHR_BANK_SIZE, "8KB CHR-RAM allocated");
        assert!(cart.chr_is_ram, "zero CHR banks means CHR-RAM");
    }

    #[test]
    fn test_battery_flag() {
        let cart = Cartridge::from_ines_bytes(&build_ines(1, 1, 0x02, 0)).unwrap();
        assert!(cart.has_battery);
    }
}
