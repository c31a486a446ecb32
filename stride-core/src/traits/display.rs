//! Character display trait
//!
//! The status screens only need text placement and a few mode switches.
//! How a display encodes them on the wire is up to the driver.

use crate::bus::BusError;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed
    Bus(BusError),
    /// No display answered at any known address
    NotFound,
    /// Cursor position outside the display
    OutOfBounds,
}

impl From<BusError> for DisplayError {
    fn from(e: BusError) -> Self {
        DisplayError::Bus(e)
    }
}

/// Trait for text displays with a cursor
pub trait CharacterDisplay {
    /// Number of columns
    const COLS: u8;

    /// Number of rows
    const ROWS: u8;

    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write text at the cursor
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Switch the backlight
    fn backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Show a blinking block at the cursor
    fn blink_on(&mut self) -> Result<(), DisplayError>;

    /// Hide the blinking block
    fn blink_off(&mut self) -> Result<(), DisplayError>;

    /// Write text at a position
    fn print_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        self.print(text)
    }
}
