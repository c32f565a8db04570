// Video memory access - nametable and palette mirroring

use super::Ppu;
use crate::cartridge::mappers::Mapper;
use crate::cartridge::Mirroring;

/// Size of one nametable (32x30 tiles plus the attribute table)
pub(super) const NAMETABLE_SIZE: usize = 0x0400;

impl Ppu {
    /// Map a nametable address ($2000-$2FFF) to physical VRAM
    ///
    /// The console has 2KB of VRAM behind a 4KB address window; the
    /// cartridge decides which pairs of logical tables share storage.
    pub(super) fn mirror_nametable_addr(&self, addr: u16) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let physical = match self.mirroring {
            // $2000=$2400, $2800=$2C00
            Mirroring::Horizontal => table / 2,
            // $2000=$2800, $2400=$2C00
            Mirroring::Vertical => table % 2,
            Mirroring::SingleScreenLower => 0,
            Mirroring::SingleScreenUpper => 1,
            // True four-screen needs cartridge VRAM; fall back to horizontal
            Mirroring::FourScreen => table / 2,
        };

        physical * NAMETABLE_SIZE + offset
    }

    /// Map a palette address ($3F00-$3FFF) to the 32-byte palette RAM
    ///
    /// Entries $10/$14/$18/$1C alias $00/$04/$08/$0C: sprite palette slot
    /// zero is the shared backdrop color.
    pub(super) fn mirror_palette_addr(&self, addr: u16) -> usize {
        let index = (addr & 0x001F) as usize;
        if index >= 0x10 && index % 4 == 0 {
            index - 0x10
        } else {
            index
        }
    }

    /// Read a byte of video memory
    ///
    /// $0000-$1FFF pattern tables come from the mapper; $2000-$3EFF is
    /// nametable VRAM (with the $3000 mirror); $3F00-$3FFF is palette RAM.
    pub(crate) fn read_vram(&self, mapper: Option<&Mapper>, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => mapper.map_or(0, |m| m.ppu_read(addr)),
            0x2000..=0x3EFF => self.nametables[self.mirror_nametable_addr(addr)],
            _ => self.palette_ram[self.mirror_palette_addr(addr)],
        }
    }

    /// Write a byte of video memory
    pub(crate) fn write_vram(&mut self, mapper: Option<&mut Mapper>, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => {
                if let Some(m) = mapper {
                    m.ppu_write(addr, value);
                }
            }
            0x2000..=0x3EFF => {
                let index = self.mirror_nametable_addr(addr);
                self.nametables[index] = value;
            }
            _ => {
                let index = self.mirror_palette_addr(addr);
                self.palette_ram[index] = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_mirroring() {
        let ppu = Ppu::new(Mirroring::Horizontal);
        assert_eq!(
            ppu.mirror_nametable_addr(0x2000),
            ppu.mirror_nametable_addr(0x2400),
            "$2000 and $2400 share storage"
        );
        assert_eq!(
            ppu.mirror_nametable_addr(0x2800),
            ppu.mirror_nametable_addr(0x2C00),
            "$2800 and $2C00 share storage"
        );
        assert_ne!(
            ppu.mirror_nametable_addr(0x2000),
            ppu.mirror_nametable_addr(0x2800)
        );
    }

    #[test]
    fn test_vertical_mirroring() {
        let ppu = Ppu::new(Mirroring::Vertical);
        assert_eq!(
            ppu.mirror_nametable_addr(0x2000),
            ppu.mirror_nametable_addr(0x2800)
        );
        assert_eq!(
            ppu.mirror_nametable_addr(0x2400),
            ppu.mirror_nametable_addr(0x2C00)
        );
        assert_ne!(
            ppu.mirror_nametable_addr(0x2000),
            ppu.mirror_nametable_addr(0x2400)
        );
    }

    #[test]
    fn test_nametable_3000_mirror() {
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        ppu.write_vram(None, 0x2005, 0x42);
        assert_eq!(
            ppu.read_vram(None, 0x3005),
            0x42,
            "$3000-$3EFF mirrors the nametables"
        );
    }

    #[test]
    fn test_palette_mirroring() {
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        ppu.write_vram(None, 0x3F00, 0x21);
        assert_eq!(ppu.read_vram(None, 0x3F20), 0x21, "palette repeats every 32");
        ppu.write_vram(None, 0x3F10, 0x13);
        assert_eq!(
            ppu.read_vram(None, 0x3F00),
            0x13,
            "$3F10 aliases the backdrop entry"
        );
    }

    #[test]
    fn test_pattern_space_without_mapper_reads_zero() {
        let ppu = Ppu::new(Mirroring::Horizontal);
        assert_eq!(ppu.read_vram(None, 0x1000), 0);
    }
}
