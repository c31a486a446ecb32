//! Line framing for the serial link.
//!
//! A [`LineFramer`] accumulates bytes delivered one at a time (typically from
//! a receive interrupt) until a terminator arrives, then hands the finished
//! line over in one piece.
//!
//! Buffer capacity is `N` bytes with one slot reserved for the terminating
//! sentinel, so a line holds at most `N - 1` characters. What happens to
//! bytes beyond that depends on the [`Overflow`] policy.

use heapless::Vec;

/// Line feed, the line terminator
pub const LF: u8 = b'\n';

/// Carriage return
pub const CR: u8 = b'\r';

/// Errors reported while framing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// The line exceeded the buffer and was discarded
    Truncated,
}

/// What to do with bytes that arrive once the buffer is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Overflow {
    /// Drop the excess bytes and deliver the line marked truncated
    Truncate,
    /// Reset the cursor, ignore everything up to the next terminator and
    /// report [`LineError::Truncated`] instead of a line
    Discard,
}

/// How a carriage return is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CarriageReturn {
    /// `\r` is skipped; only `\n` ends a line
    Ignore,
    /// `\r` ends a line just like `\n`
    Terminate,
}

/// A completed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<const N: usize> {
    bytes: Vec<u8, N>,
    truncated: bool,
}

impl<const N: usize> Line<N> {
    /// Raw bytes of the line, without terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line as text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if bytes were dropped because the line did not fit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for Line<N> {
    fn format(&self, f: defmt::Formatter) {
        match self.as_str() {
            Some(text) => defmt::write!(f, "{=str}", text),
            None => defmt::write!(f, "{=[u8]}", self.as_bytes()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramerState {
    /// Appending bytes to the buffer
    Filling,
    /// Buffer overflowed since the last terminator
    Overflowed,
}

/// Incremental line assembler
#[derive(Debug, Clone)]
pub struct LineFramer<const N: usize> {
    buffer: Vec<u8, N>,
    state: FramerState,
    overflow: Overflow,
    carriage_return: CarriageReturn,
}

impl<const N: usize> LineFramer<N> {
    /// Longest line that fits, one slot short of the buffer for the sentinel
    pub const MAX_LINE_LEN: usize = N - 1;

    /// Create a new framer
    pub const fn new(overflow: Overflow, carriage_return: CarriageReturn) -> Self {
        Self {
            buffer: Vec::new(),
            state: FramerState::Filling,
            overflow,
            carriage_return,
        }
    }

    /// Current write position
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = FramerState::Filling;
    }

    /// Feed a single byte to the framer
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` when a discarded
    /// over-long line has just been terminated.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line<N>>, LineError> {
        match byte {
            LF => self.terminate(),
            CR => match self.carriage_return {
                CarriageReturn::Ignore => Ok(None),
                CarriageReturn::Terminate => self.terminate(),
            },
            _ => {
                self.append(byte);
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes to the framer
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line<N>>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn append(&mut self, byte: u8) {
        match (self.state, self.overflow) {
            (FramerState::Overflowed, Overflow::Discard) => {}
            _ if self.buffer.len() < Self::MAX_LINE_LEN => {
                // Bounded by MAX_LINE_LEN < N
                let _ = self.buffer.push(byte);
            }
            (_, Overflow::Truncate) => self.state = FramerState::Overflowed,
            (_, Overflow::Discard) => {
                self.buffer.clear();
                self.state = FramerState::Overflowed;
            }
        }
    }

    fn terminate(&mut self) -> Result<Option<Line<N>>, LineError> {
        let overflowed = self.state == FramerState::Overflowed;
        let bytes = core::mem::take(&mut self.buffer);
        self.state = FramerState::Filling;

        if overflowed && self.overflow == Overflow::Discard {
            return Err(LineError::Truncated);
        }

        Ok(Some(Line {
            bytes,
            truncated: overflowed,
        }))
    }
}
