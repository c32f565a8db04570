// Configuration management
//
// Emulator settings with TOML persistence. The region selection fixes the
// number of master-clock ticks per frame and the divide ratios of both
// clocked units.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file path
const CONFIG_FILE: &str = "nes_emu.toml";

/// Television region, which decides the machine's clock ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Region {
    /// 60Hz machine: 357,954 master ticks per frame, CPU /12, PPU /4
    #[default]
    Ntsc,
    /// 50Hz machine: 532,034 master ticks per frame, CPU /16, PPU /5
    Pal,
}

impl Region {
    /// Master-clock ticks in one emulated frame
    pub fn master_clocks_per_frame(self) -> u32 {
        match self {
            Region::Ntsc => 357_954,
            Region::Pal => 532_034,
        }
    }

    /// Master-clock ticks per CPU cycle
    pub fn cpu_divider(self) -> u8 {
        match self {
            Region::Ntsc => crate::cpu::NTSC_CLOCK_DIVIDER,
            Region::Pal => crate::cpu::PAL_CLOCK_DIVIDER,
        }
    }

    /// Master-clock ticks per picture-unit dot
    pub fn ppu_divider(self) -> u8 {
        match self {
            Region::Ntsc => crate::ppu::NTSC_CLOCK_DIVIDER,
            Region::Pal => crate::ppu::PAL_CLOCK_DIVIDER,
        }
    }
}

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Television region
    pub region: Region,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            region: Region::Ntsc,
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration from the default file, falling back to the
    /// defaults when the file is missing or malformed
    pub fn load_or_default() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load the configuration from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Persist the configuration to the default file
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Persist the configuration to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)
    }
}
