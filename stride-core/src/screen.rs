//! Status screens for the 16x2 character display

use core::fmt::Write;
use heapless::String;

use crate::counters::StepCounts;
use crate::traits::{CharacterDisplay, DisplayError};

/// Longest counters line: "Walk: 4294967295 Run: 4294967295"
pub const COUNTS_LINE_CAPACITY: usize = 40;

/// Text shown while the counters are being cleared
pub const RESET_BANNER: &str = "Reseting steps..";

/// Screens the firmware can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Idle prompt shown at boot and after a reset
    Welcome,
    /// Live step counts
    Counters(StepCounts),
    /// Reset in progress; drawn over the current bottom row
    Resetting,
    /// The accelerometer stopped answering
    SensorFault(StepCounts),
}

impl Screen {
    /// Draw this screen
    pub fn render<D: CharacterDisplay>(&self, display: &mut D) -> Result<(), DisplayError> {
        match self {
            Screen::Welcome => {
                display.clear()?;
                display.blink_off()?;
                display.print_at(0, 0, "Start moving")?;
                display.print_at(0, 1, "to count steps")
            }
            Screen::Counters(counts) => {
                display.clear()?;
                display.print_at(0, 0, "S9 = RESET")?;
                display.set_cursor(0, 1)?;
                display.blink_on()?;
                display.print_at(0, 1, &counts_line(counts))
            }
            Screen::Resetting => display.print_at(0, 1, RESET_BANNER),
            Screen::SensorFault(counts) => {
                display.clear()?;
                display.blink_off()?;
                display.print_at(0, 0, "Sensor error")?;
                display.print_at(0, 1, &counts_line(counts))
            }
        }
    }
}

/// Reset banner deadline
///
/// The banner stays up for a fixed time after a reset while sampling
/// carries on. Times are milliseconds on any monotonic clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetBanner {
    until_ms: Option<u64>,
}

impl ResetBanner {
    pub const fn new() -> Self {
        Self { until_ms: None }
    }

    /// Show the banner from `now_ms`; a reset during the banner restarts it
    pub fn start(&mut self, now_ms: u64, duration_ms: u32) -> Screen {
        self.until_ms = Some(now_ms.saturating_add(duration_ms as u64));
        Screen::Resetting
    }

    /// When the welcome screen is due
    pub fn deadline(&self) -> Option<u64> {
        self.until_ms
    }

    pub fn is_showing(&self) -> bool {
        self.until_ms.is_some()
    }

    /// The welcome screen, once the banner has been up long enough
    pub fn expire(&mut self, now_ms: u64) -> Option<Screen> {
        match self.until_ms {
            Some(until) if now_ms >= until => {
                self.until_ms = None;
                Some(Screen::Welcome)
            }
            _ => None,
        }
    }
}

/// "Walk: W Run: R"
pub fn counts_line(counts: &StepCounts) -> String<COUNTS_LINE_CAPACITY> {
    let mut line = String::new();
    // Two u32 values always fit
    let _ = write!(line, "Walk: {} Run: {}", counts.walk, counts.run);
    line
}
