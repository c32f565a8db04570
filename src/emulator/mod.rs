// Emulator module - machine construction and the frame loop
//
// The emulator owns every component and is the only place that ticks them.
// One `run_frame` call advances the master clock by a fixed number of
// ticks (the region decides how many); within each tick the CPU is clocked
// first and the picture unit second, and an NMI raised by the picture unit
// is forwarded so the CPU observes it at its next decode boundary.

mod config;

pub use config::{EmulatorConfig, Region};

use crate::bus::Bus;
use crate::cartridge::mappers::Mapper;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Required size of the video output buffer (256 x 240 RGBA)
pub const VIDEO_BUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

/// Samples written into the audio output buffer per frame (mono i16)
pub const AUDIO_SAMPLES_PER_FRAME: usize = 960;

/// The emulated machine
pub struct Emulator {
    /// 6502 CPU
    cpu: Cpu,
    /// Bus holding every other component
    bus: Bus,
    /// Region and persistence settings
    config: EmulatorConfig,
    /// Master-clock ticks toward the next audio-unit cycle
    apu_prescaler: u8,
}

impl Emulator {
    /// Build a machine around an iNES ROM image
    ///
    /// Parses the image, constructs the mapper it names, and asserts the
    /// power-on reset so the first CPU cycle of the first frame runs the
    /// RESET sequence.
    ///
    /// # Errors
    /// `INesError` for a malformed image, `MapperError` for an
    /// unsupported mapper number.
    pub fn new(rom: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(rom, EmulatorConfig::default())
    }

    /// Build a machine with explicit configuration
    pub fn with_config(
        rom: &[u8],
        config: EmulatorConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let cartridge = Cartridge::from_ines_bytes(rom)?;
        let mapper = Mapper::new(cartridge)?;

        let mut emulator = Emulator {
            cpu: Cpu::new(),
            bus: Bus::with_mapper(mapper),
            config,
            apu_prescaler: 0,
        };
        emulator.apply_region();
        Ok(emulator)
    }

    /// Push the region's divide ratios into the clocked units
    fn apply_region(&mut self) {
        let region = self.config.region;
        self.cpu.set_clock_divider(region.cpu_divider());
        self.bus.ppu.set_clock_divider(region.ppu_divider());
    }

    /// Run one emulated frame
    ///
    /// * `video_out` - 256 x 240 x 4 bytes, filled with RGBA pixels
    /// * `audio_out` - 960 mono i16 samples
    /// * `joypad` - player-one buttons: right=0, left=1, up=2, down=3,
    ///   A=4, B=5, select=6, start=7
    pub fn run_frame(&mut self, video_out: &mut [u8], audio_out: &mut [i16], joypad: u8) {
        self.bus.controllers.set_buttons(0, joypad);
        self.run_ticks(self.config.region.master_clocks_per_frame());
        self.bus.ppu.render_rgba(video_out);
        self.bus.apu.fill_samples(audio_out);
    }

    /// Advance the master clock by `ticks`
    ///
    /// Within a tick the CPU runs before the picture unit, and control
    /// signals raised during the tick are latched for the CPU's next
    /// decode cycle.
    pub fn run_ticks(&mut self, ticks: u32) {
        let cpu_divider = self.config.region.cpu_divider();
        for _ in 0..ticks {
            self.cpu.tick(&mut self.bus);
            self.bus.tick_ppu();
            if self.bus.ppu.take_nmi() {
                self.cpu.assert_nmi();
            }

            // The audio unit steps at CPU-cycle rate
            self.apu_prescaler += 1;
            if self.apu_prescaler == cpu_divider {
                self.apu_prescaler = 0;
                self.bus.apu.tick();
                if self.bus.apu.take_irq() {
                    self.cpu.assert_irq();
                }
            }
        }
    }

    /// Press the reset button
    pub fn reset(&mut self) {
        self.cpu.assert_reset();
    }

    /// Whether a KIL opcode has jammed the CPU this power cycle
    pub fn is_halted(&self) -> bool {
        self.cpu.halted
    }

    /// Get a reference to the CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Get a reference to the bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get a mutable reference to the bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Get the active configuration
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Replace the configuration and reapply the clock ratios
    pub fn set_config(&mut self, config: EmulatorConfig) {
        self.config = config;
        self.apply_region();
    }
}
