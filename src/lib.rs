// NES Emulator Core Library
// Cycle-driven 6502 interpreter with the bus, mapper, and clocking fabric
// needed to run iNES ROM images one frame at a time.

// Public modules
pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debug;
pub mod emulator;
pub mod input;
pub mod ppu;

// Re-export main types for convenience
pub use apu::Apu;
pub use bus::Bus;
pub use cartridge::mappers::{Mapper, MapperError};
pub use cartridge::{Cartridge, INesError, Mirroring};
pub use cpu::Cpu;
pub use debug::disassemble_instruction;
pub use emulator::{Emulator, EmulatorConfig, Region};
pub use input::ControllerPort;
pub use ppu::Ppu;
