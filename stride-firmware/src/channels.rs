//! Inter-task communication
//!
//! Static state shared between Embassy tasks. Only `bus_task` touches the
//! bus; every other task changes the counters and asks it for screen
//! updates through [`DISPLAY_REQUESTS`].

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use stride_core::counters::StepCounters;
use stride_core::dispatch::DisplayRequest;
use stride_core::serial::ReadyLine;

/// Channel capacity for display requests
const DISPLAY_REQUEST_SIZE: usize = 4;

/// Walk and run counts
pub static COUNTERS: StepCounters = StepCounters::new();

/// Screen updates for the bus owner (serial commands, reset button)
pub static DISPLAY_REQUESTS: Channel<CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_SIZE> =
    Channel::new();

/// Most recent line received on the serial link
pub static RX_LINE: ReadyLine = ReadyLine::new();
