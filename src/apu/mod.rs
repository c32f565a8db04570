// APU module - the audio unit as an opaque clocked collaborator
//
// Sample synthesis is out of scope for the core; the register file is
// latched so software can program it, the frame counter raises its IRQ at
// the documented rate, and the sample output is silence.

/// CPU cycles between frame-counter steps (NTSC, four-step sequence)
const FRAME_COUNTER_PERIOD: u32 = 7457;

/// Audio unit state
pub struct Apu {
    /// Latched register file at $4000-$4017
    registers: [u8; 0x18],
    /// Channel-enable bits from the last $4015 write
    channel_enable: u8,
    /// CPU cycles toward the next frame-counter step
    frame_counter: u32,
    /// Step within the 4/5-step sequence
    sequence_step: u8,
    /// Five-step mode selected by $4017 bit 7
    five_step_mode: bool,
    /// IRQ inhibit from $4017 bit 6
    irq_inhibit: bool,
    /// Latched frame IRQ, consumed by the machine loop
    irq_pending: bool,
}

impl Apu {
    /// Create an audio unit in the power-on state
    pub fn new() -> Self {
        Apu {
            registers: [0; 0x18],
            channel_enable: 0,
            frame_counter: 0,
            sequence_step: 0,
            five_step_mode: false,
            irq_inhibit: false,
            irq_pending: false,
        }
    }

    /// Read a register ($4000-$4017, offset already computed by the bus)
    ///
    /// Only $4015 is readable; it reports the channel-enable bits and the
    /// frame-IRQ flag, clearing the flag as on hardware.
    pub fn read_register(&mut self, offset: u16) -> u8 {
        if offset == 0x15 {
            let mut status = self.channel_enable & 0x1F;
            if self.irq_pending {
                status |= 0x40;
            }
            self.irq_pending = false;
            status
        } else {
            0
        }
    }

    /// The latched value of a register, for diagnostics
    pub fn register(&self, offset: u16) -> u8 {
        self.registers[offset as usize]
    }

    /// Write a register ($4000-$4017)
    pub fn write_register(&mut self, offset: u16, value: u8) {
        self.registers[offset as usize] = value;
        match offset {
            0x15 => {
                self.channel_enable = value & 0x1F;
            }
            0x17 => {
                // Frame counter: bit 7 selects the five-step sequence,
                // bit 6 inhibits (and clears) the frame IRQ
                self.five_step_mode = value & 0x80 != 0;
                self.irq_inhibit = value & 0x40 != 0;
                if self.irq_inhibit {
                    self.irq_pending = false;
                }
                self.frame_counter = 0;
                self.sequence_step = 0;
            }
            _ => {}
        }
    }

    /// Advance one CPU cycle
    ///
    /// Only the frame counter is modelled; the four-step sequence latches
    /// the frame IRQ on its final step unless inhibited.
    pub fn tick(&mut self) {
        self.frame_counter += 1;
        if self.frame_counter < FRAME_COUNTER_PERIOD {
            return;
        }
        self.frame_counter = 0;
        let steps = if self.five_step_mode { 5 } else { 4 };
        self.sequence_step = (self.sequence_step + 1) % steps;
        if !self.five_step_mode && self.sequence_step == 0 && !self.irq_inhibit {
            self.irq_pending = true;
        }
    }

    /// Consume the pending frame IRQ
    pub fn take_irq(&mut self) -> bool {
        let pending = self.irq_pending;
        self.irq_pending = false;
        pending
    }

    /// Fill a sample buffer for one frame
    ///
    /// Synthesis is out of scope; the output is silence.
    pub fn fill_samples(&self, out: &mut [i16]) {
        out.fill(0);
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}
