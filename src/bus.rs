// Bus module - CPU-side address decoding
//
// The bus owns work RAM and routes every CPU access to one of: WRAM, the
// video-unit register file, the audio/input register file, or the
// cartridge mapper. Every 16-bit address maps somewhere; unimplemented
// reads return 0 and stray writes are dropped, as on the real machine.
//
// # CPU Memory Map
//
// ```text
// $0000-$1FFF: 2KB work RAM, mirrored every $0800
// $2000-$3FFF: video-unit registers, mirrored every 8 bytes
// $4000-$4013: audio-unit registers
// $4014:       sprite DMA port
// $4015:       audio-unit status
// $4016-$4017: controller ports (writes to $4017 reach the audio unit)
// $4018-$FFFF: cartridge mapper
// ```

use crate::apu::Apu;
use crate::cartridge::mappers::Mapper;
use crate::input::ControllerPort;
use crate::ppu::Ppu;

/// Work RAM size (2KB)
const WRAM_SIZE: usize = 2048;

/// Mask applied to addresses in the WRAM mirror window
const WRAM_MIRROR_MASK: u16 = 0x07FF;

/// Main system bus
pub struct Bus {
    /// 2KB work RAM, mirrored four times through $0000-$1FFF
    wram: [u8; WRAM_SIZE],
    /// Picture unit (register file + video-side memories)
    pub ppu: Ppu,
    /// Audio unit register stub
    pub apu: Apu,
    /// Controller latch at $4016/$4017
    pub controllers: ControllerPort,
    /// Cartridge mapper; absent on a bare bus (unit tests)
    mapper: Option<Mapper>,
}

impl Bus {
    /// Create a bus with no cartridge attached
    ///
    /// Mapper space reads as 0 and drops writes. Used by CPU-level tests
    /// that run programs out of work RAM.
    pub fn new() -> Self {
        Bus {
            wram: [0; WRAM_SIZE],
            ppu: Ppu::new(crate::cartridge::Mirroring::Horizontal),
            apu: Apu::new(),
            controllers: ControllerPort::new(),
            mapper: None,
        }
    }

    /// Create a bus wired to a cartridge mapper
    pub fn with_mapper(mapper: Mapper) -> Self {
        let mut bus = Self::new();
        bus.ppu.set_mirroring(mapper.mirroring());
        bus.mapper = Some(mapper);
        bus
    }

    /// Read a byte
    ///
    /// Reads of the video register file and the controller ports have side
    /// effects and therefore require `&mut self`; use [`Bus::peek`] for
    /// diagnostics.
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.wram[(addr & WRAM_MIRROR_MASK) as usize],
            0x2000..=0x3FFF => {
                let register = addr & 0x0007;
                self.ppu.read_register(self.mapper.as_ref(), register)
            }
            0x4014 => 0, // DMA port is write-only
            0x4016 => self.controllers.read(0),
            0x4017 => self.controllers.read(1),
            0x4000..=0x4015 => self.apu.read_register(addr - 0x4000),
            _ => self.mapper.as_ref().map_or(0, |m| m.cpu_read(addr)),
        }
    }

    /// Read a byte without side effects
    ///
    /// Register files with read side effects answer 0; WRAM and mapper
    /// space answer normally. Used by the disassembler and trace output.
    pub fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.wram[(addr & WRAM_MIRROR_MASK) as usize],
            0x2000..=0x4017 => 0,
            _ => self.mapper.as_ref().map_or(0, |m| m.cpu_read(addr)),
        }
    }

    /// Write a byte
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.wram[(addr & WRAM_MIRROR_MASK) as usize] = value,
            0x2000..=0x3FFF => {
                let register = addr & 0x0007;
                self.ppu
                    .write_register(self.mapper.as_mut(), register, value);
            }
            0x4014 => self.sprite_dma(value),
            0x4016 => self.controllers.write(value),
            0x4000..=0x4017 => self.apu.write_register(addr - 0x4000, value),
            _ => {
                if let Some(mapper) = self.mapper.as_mut() {
                    mapper.cpu_write(addr, value);
                }
            }
        }
    }

    /// Read a little-endian 16-bit word
    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Write a little-endian 16-bit word
    pub fn write_u16(&mut self, addr: u16, value: u16) {
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Sprite DMA ($4014): copy one 256-byte page into sprite RAM
    ///
    /// The copy lands at the current sprite cursor and wraps within OAM.
    /// The 513-cycle CPU stall of the real DMA unit is not modelled.
    fn sprite_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for i in 0..256u16 {
            let value = self.peek(base + i);
            let dest = self.ppu.oam_addr.wrapping_add(i as u8);
            self.ppu.oam[dest as usize] = value;
        }
    }

    /// Advance the picture unit by one master-clock tick
    ///
    /// Keeps the unit's mirroring in sync with the mapper, which can
    /// change it at runtime (MMC1).
    pub fn tick_ppu(&mut self) {
        if let Some(mapper) = self.mapper.as_ref() {
            self.ppu.set_mirroring(mapper.mirroring());
        }
        self.ppu.tick(self.mapper.as_ref());
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{Cartridge, Mirroring};

    fn nrom_bus() -> Bus {
        let mut prg = vec![0; 16 * 1024];
        prg[0] = 0x42; // visible at $8000 and $C000
        let cart = Cartridge {
            prg_rom: prg,
            chr_rom: vec![0; 8 * 1024],
            chr_is_ram: true,
            mapper: 0,
            mirroring: Mirroring::Vertical,
            has_battery: false,
        };
        Bus::with_mapper(Mapper::new(cart).unwrap())
    }

    // ========================================
    // Work RAM
    // ========================================

    #[test]
    fn test_wram_read_write() {
        let mut bus = Bus::new();
        bus.write(0x0000, 0x42);
        assert_eq!(bus.read(0x0000), 0x42);
    }

    #[test]
    fn test_wram_mirroring_law() {
        let mut bus = Bus::new();
        bus.write(0x0123, 0xAB);
        assert_eq!(bus.read(0x0123), 0xAB, "base");
        assert_eq!(bus.read(0x0923), 0xAB, "first mirror");
        assert_eq!(bus.read(0x1123), 0xAB, "second mirror");
        assert_eq!(bus.read(0x1923), 0xAB, "third mirror");

        bus.write(0x1F00, 0xCD);
        assert_eq!(bus.read(0x0700), 0xCD, "mirror writes reach the base");
    }

    // ========================================
    // Video register window
    // ========================================

    #[test]
    fn test_video_register_mirroring() {
        let mut bus = Bus::new();
        // $2006 and its mirror at $3FFE drive the same address latch
        bus.write(0x2006, 0x21);
        bus.write(0x3FFE, 0x08);
        assert_eq!(bus.ppu.v, 0x2108, "mirrored writes hit the same register");
    }

    #[test]
    fn test_video_status_read_through_mirror() {
        let mut bus = Bus::new();
        bus.ppu.ppustatus = 0x80;
        let status = bus.read(0x3FFA); // mirror of $2002
        assert_eq!(status, 0x80);
        assert_eq!(bus.ppu.ppustatus & 0x80, 0, "read side effect applied");
    }

    #[test]
    fn test_video_memory_through_data_port() {
        let mut bus = nrom_bus();
        bus.write(0x2006, 0x20);
        bus.write(0x2006, 0x00);
        bus.write(0x2007, 0x99);
        assert_eq!(
            bus.ppu.read_vram(None, 0x2000),
            0x99,
            "data port writes reach nametable VRAM"
        );
    }

    // ========================================
    // Audio / input window
    // ========================================

    #[test]
    fn test_apu_status_and_stub_reads() {
        let mut bus = Bus::new();
        bus.write(0x4015, 0x1F);
        assert_eq!(bus.read(0x4015), 0x1F, "$4015 reads back channel enables");
        assert_eq!(bus.read(0x4000), 0, "other audio registers read 0");
    }

    #[test]
    fn test_controller_strobe_and_read() {
        let mut bus = Bus::new();
        bus.controllers.set_buttons(0, crate::input::buttons::A);
        bus.write(0x4016, 1);
        bus.write(0x4016, 0);
        assert_eq!(bus.read(0x4016) & 1, 1, "A reads out first");
        assert_eq!(bus.read(0x4016) & 1, 0, "B not held");
    }

    #[test]
    fn test_sprite_dma_copies_a_page() {
        let mut bus = Bus::new();
        for i in 0..256u16 {
            bus.write(0x0300 + i, i as u8);
        }
        bus.write(0x4014, 0x03);
        assert_eq!(bus.ppu.oam[0x00], 0x00);
        assert_eq!(bus.ppu.oam[0x80], 0x80);
        assert_eq!(bus.ppu.oam[0xFF], 0xFF);
    }

    #[test]
    fn test_sprite_dma_respects_cursor() {
        let mut bus = Bus::new();
        bus.write(0x0300, 0xAA);
        bus.write(0x2003, 0x10); // sprite cursor
        bus.write(0x4014, 0x03);
        assert_eq!(bus.ppu.oam[0x10], 0xAA, "copy starts at the cursor");
    }

    // ========================================
    // Mapper window
    // ========================================

    #[test]
    fn test_mapper_read_and_mirror() {
        let mut bus = nrom_bus();
        assert_eq!(bus.read(0x8000), 0x42);
        assert_eq!(bus.read(0xC000), 0x42, "16KB image mirrors");
    }

    #[test]
    fn test_bare_bus_mapper_space_reads_zero() {
        let mut bus = Bus::new();
        assert_eq!(bus.read(0x8000), 0);
        bus.write(0x8000, 0xFF); // dropped
        assert_eq!(bus.read(0x8000), 0);
    }

    #[test]
    fn test_interrupt_vectors_via_u16_helpers() {
        let mut bus = Bus::new();
        bus.write_u16(0x0100, 0x1234);
        assert_eq!(bus.read_u16(0x0100), 0x1234);
        assert_eq!(bus.read(0x0100), 0x34, "low byte first");
        assert_eq!(bus.read(0x0101), 0x12);
    }

    #[test]
    fn test_peek_has_no_side_effects() {
        let mut bus = Bus::new();
        bus.ppu.ppustatus = 0x80;
        let _ = bus.peek(0x2002);
        assert_eq!(bus.ppu.ppustatus & 0x80, 0x80, "peek must not clear vblank");
    }
}
