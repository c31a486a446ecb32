//! Command dispatch for bytes arriving on the serial link
//!
//! The dispatcher runs in the receive path. It frames tokens with its own
//! 16-byte buffer, applies recognised commands to the shared counters and
//! tells the caller which screen update to request from the bus owner. It
//! never touches the bus itself.

use stride_protocol::{CarriageReturn, Command, CommandError, LineError, LineFramer, Overflow};

use crate::counters::{StepCounters, StepKind};

/// Capacity of the command framing buffer, sentinel slot included
pub const COMMAND_CAPACITY: usize = 16;

/// Screen update requested from the task that owns the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayRequest {
    /// Redraw the counters
    Refresh,
    /// Show the reset banner, then the welcome screen
    Reset,
}

/// Why a completed token had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Token overflowed the framing buffer
    Line(LineError),
    /// Token is not a command
    Command(CommandError),
}

impl From<LineError> for DispatchError {
    fn from(e: LineError) -> Self {
        DispatchError::Line(e)
    }
}

impl From<CommandError> for DispatchError {
    fn from(e: CommandError) -> Self {
        DispatchError::Command(e)
    }
}

/// Result of a completed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// The command applied, or why nothing was applied
    pub result: Result<Command, DispatchError>,
    /// Screen update to enqueue
    pub request: DisplayRequest,
}

/// Frames command tokens and applies them
pub struct Dispatcher {
    framer: LineFramer<COMMAND_CAPACITY>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub const fn new() -> Self {
        Self {
            framer: LineFramer::new(Overflow::Discard, CarriageReturn::Terminate),
        }
    }

    /// Feed one received byte
    ///
    /// Returns `None` while a token is being assembled and for empty tokens
    /// (such as the `\n` of a `\r\n` pair). Every other terminator yields a
    /// [`Dispatch`]; a display refresh is requested whether or not the token
    /// matched.
    pub fn on_byte(&mut self, byte: u8, counters: &StepCounters) -> Option<Dispatch> {
        let result = match self.framer.feed(byte) {
            Ok(None) => return None,
            Ok(Some(line)) if line.is_empty() => return None,
            Ok(Some(line)) => Command::parse(line.as_bytes()).map_err(DispatchError::from),
            Err(e) => Err(e.into()),
        };

        let request = match result {
            Ok(command) => apply(command, counters),
            Err(_) => DisplayRequest::Refresh,
        };

        Some(Dispatch { result, request })
    }

    /// Bytes held for the token in progress
    pub fn pending(&self) -> usize {
        self.framer.cursor()
    }
}

fn apply(command: Command, counters: &StepCounters) -> DisplayRequest {
    match command {
        Command::IncrementWalk => {
            counters.increment(StepKind::Walk);
            DisplayRequest::Refresh
        }
        Command::IncrementRun => {
            counters.increment(StepKind::Run);
            DisplayRequest::Refresh
        }
        Command::Reset => {
            counters.reset_all();
            DisplayRequest::Reset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::StepCounts;

    fn feed(dispatcher: &mut Dispatcher, counters: &StepCounters, bytes: &[u8]) -> std::vec::Vec<Dispatch> {
        bytes
            .iter()
            .filter_map(|&b| dispatcher.on_byte(b, counters))
            .collect()
    }

    #[test]
    fn test_walk_and_run() {
        let counters = StepCounters::new();
        let mut dispatcher = Dispatcher::new();

        let out = feed(&mut dispatcher, &counters, b"WALK++\nRUN++\nWALK++\n");
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].result, Ok(Command::IncrementRun));
        assert!(out.iter().all(|d| d.request == DisplayRequest::Refresh));
        assert_eq!(counters.snapshot(), StepCounts { walk: 2, run: 1 });
    }

    #[test]
    fn test_unknown_token_still_refreshes() {
        let counters = StepCounters::new();
        let mut dispatcher = Dispatcher::new();

        let out = feed(&mut dispatcher, &counters, b"walk++\n");
        assert_eq!(
            out,
            [Dispatch {
                result: Err(DispatchError::Command(CommandError::Unknown)),
                request: DisplayRequest::Refresh,
            }]
        );
        assert_eq!(counters.snapshot(), StepCounts::default());
    }

    #[test]
    fn test_crlf_yields_one_dispatch() {
        let counters = StepCounters::new();
        let mut dispatcher = Dispatcher::new();

        let out = feed(&mut dispatcher, &counters, b"RUN++\r\n");
        assert_eq!(out.len(), 1);
        assert_eq!(counters.snapshot().run, 1);
    }

    #[test]
    fn test_overflow_drops_token() {
        let counters = StepCounters::new();
        let mut dispatcher = Dispatcher::new();

        let out = feed(&mut dispatcher, &counters, b"0123456789ABCDEFWALK++\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].result, Err(DispatchError::Line(LineError::Truncated)));
        assert_eq!(counters.snapshot(), StepCounts::default());
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_reset_command() {
        let counters = StepCounters::new();
        let mut dispatcher = Dispatcher::new();

        let out = feed(&mut dispatcher, &counters, b"WALK++\nRUN++\nRESET\n");
        assert_eq!(out[2].request, DisplayRequest::Reset);
        assert_eq!(counters.snapshot(), StepCounts::default());
    }

    #[test]
    fn test_partial_token_pending() {
        let counters = StepCounters::new();
        let mut dispatcher = Dispatcher::new();

        assert!(feed(&mut dispatcher, &counters, b"WAL").is_empty());
        assert_eq!(dispatcher.pending(), 3);
    }
}
