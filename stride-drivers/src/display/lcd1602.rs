//! HD44780 16x2 character LCD behind a PCF8574 I/O expander
//!
//! The controller runs in 4-bit mode. Each expander write sets the data
//! nibble on P4..P7 together with the control lines:
//!
//! ```text
//! P7 P6 P5 P4 | P3 | P2 | P1 | P0
//!  D7 .. D4   | BL | EN | RW | RS
//! ```
//!
//! A nibble is latched by pulsing EN high then low.

use embedded_hal::delay::DelayNs;
use stride_core::bus::SharedBus;
use stride_core::config::DisplayConfig;
use stride_core::traits::{CharacterDisplay, DisplayError};
use stride_hal::bus::BusController;

/// Expander bit driving the backlight transistor
const BACKLIGHT: u8 = 0x08;
/// Expander bit wired to EN
const ENABLE: u8 = 0x04;
/// Expander bit wired to RS
const REGISTER_SELECT: u8 = 0x01;

/// HD44780 instructions
pub mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Display off, cursor off, blink off
    pub const DISPLAY_OFF: u8 = 0x08;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Display on, cursor off, blink on
    pub const DISPLAY_ON_BLINK: u8 = 0x0D;
    /// 4-bit interface, 2 lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x2C;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
    /// DDRAM offset of the second row
    pub const ROW_OFFSET: u8 = 0x40;
}

/// Wake-up sequence: two 8-bit resets, switch to 4-bit, then configure
const INIT_SEQUENCE: [u8; 6] = [
    0x33,
    0x32,
    cmd::FUNCTION_SET,
    cmd::DISPLAY_OFF,
    cmd::CLEAR_DISPLAY,
    cmd::DISPLAY_ON,
];

/// Columns addressable in one DDRAM row
const DDRAM_ROW_LEN: u8 = 40;

const POWER_UP_DELAY_MS: u32 = 50;
const NIBBLE_DELAY_US: u32 = 50;
const CLEAR_DELAY_US: u32 = 2_000;

/// 16x2 LCD on a shared bus
pub struct Lcd1602<'a, C, D> {
    bus: SharedBus<'a, C>,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<'a, C: BusController, D: DelayNs> Lcd1602<'a, C, D> {
    /// Create a driver for the expander at `address`
    pub fn new(bus: SharedBus<'a, C>, delay: D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address,
            backlight: true,
        }
    }

    /// Find the expander at the primary or alternate address
    pub fn detect(
        bus: SharedBus<'a, C>,
        delay: D,
        config: &DisplayConfig,
    ) -> Result<Self, DisplayError> {
        let address = [config.address, config.alt_address]
            .into_iter()
            .find(|&address| bus.probe(address).is_ok())
            .ok_or(DisplayError::NotFound)?;

        Ok(Self::new(bus, delay, address))
    }

    /// Expander address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Run the 4-bit initialisation sequence and switch the display on
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(POWER_UP_DELAY_MS);
        for command in INIT_SEQUENCE {
            self.command(command)?;
        }
        self.delay.delay_us(CLEAR_DELAY_US);
        Ok(())
    }

    fn expander_write(&mut self, data: u8) -> Result<(), DisplayError> {
        let backlight = if self.backlight { BACKLIGHT } else { 0 };
        self.bus.write_byte(self.address, data | backlight)?;
        Ok(())
    }

    /// Latch the low nibble of `nibble` on D7..D4
    fn write4(&mut self, nibble: u8, rs: bool) -> Result<(), DisplayError> {
        let data = (nibble << 4) & 0xF0;
        let control = if rs { REGISTER_SELECT } else { 0 };

        self.expander_write(data | control | ENABLE)?;
        self.expander_write(data | control)?;
        self.delay.delay_us(NIBBLE_DELAY_US);
        Ok(())
    }

    fn write8(&mut self, byte: u8, rs: bool) -> Result<(), DisplayError> {
        self.write4(byte >> 4, rs)?;
        self.write4(byte & 0x0F, rs)
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.write8(command, false)
    }
}

impl<C: BusController, D: DelayNs> CharacterDisplay for Lcd1602<'_, C, D> {
    const COLS: u8 = 16;
    const ROWS: u8 = 2;

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(CLEAR_DELAY_US);
        Ok(())
    }

    /// Rows past the last one land on the last row
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= DDRAM_ROW_LEN {
            return Err(DisplayError::OutOfBounds);
        }
        let row = row.min(Self::ROWS - 1);
        self.command(cmd::SET_DDRAM_ADDR + col + cmd::ROW_OFFSET * row)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            self.write8(byte, true)?;
        }
        Ok(())
    }

    fn backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.expander_write(0x00)
    }

    fn blink_on(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::DISPLAY_ON_BLINK)
    }

    fn blink_off(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::DISPLAY_ON)
    }
}
