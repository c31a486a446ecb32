//! Received-line handoff
//!
//! The receive path feeds bytes into a [`LineReceiver`] as they arrive. When
//! a `\n` completes a line it is published on a [`ReadyLine`], where a
//! consumer task picks it up. Only one line is held: a newer line replaces
//! one that has not been collected yet.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use stride_protocol::{CarriageReturn, Line, LineFramer, Overflow};

/// Receive line buffer size; lines hold at most 31 characters
pub const RX_LINE_CAPACITY: usize = 32;

/// Single-slot mailbox for completed lines
pub struct ReadyLine<const N: usize = RX_LINE_CAPACITY> {
    signal: Signal<CriticalSectionRawMutex, Line<N>>,
}

impl<const N: usize> Default for ReadyLine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ReadyLine<N> {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Wait for the next completed line and take it
    pub async fn receive_line(&self) -> Line<N> {
        self.signal.wait().await
    }

    /// Take a completed line if one is ready
    pub fn try_receive_line(&self) -> Option<Line<N>> {
        self.signal.try_take()
    }

    /// True if a line is waiting to be collected
    pub fn is_ready(&self) -> bool {
        self.signal.signaled()
    }

    fn publish(&self, line: Line<N>) {
        self.signal.signal(line);
    }
}

/// Producer side, owned by the receive path
///
/// `\r` is ignored. Bytes that arrive once the line is full are dropped
/// and the delivered line is marked truncated.
pub struct LineReceiver<'a, const N: usize = RX_LINE_CAPACITY> {
    framer: LineFramer<N>,
    ready: &'a ReadyLine<N>,
}

impl<'a, const N: usize> LineReceiver<'a, N> {
    pub const fn new(ready: &'a ReadyLine<N>) -> Self {
        Self {
            framer: LineFramer::new(Overflow::Truncate, CarriageReturn::Ignore),
            ready,
        }
    }

    /// Feed one received byte; returns true when it completed a line
    pub fn on_byte(&mut self, byte: u8) -> bool {
        match self.framer.feed(byte) {
            Ok(Some(line)) => {
                self.ready.publish(line);
                true
            }
            // Truncate mode never reports an error
            Ok(None) | Err(_) => false,
        }
    }

    /// Bytes held for the line in progress
    pub fn pending(&self) -> usize {
        self.framer.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_line_handoff() {
        let ready: ReadyLine = ReadyLine::new();
        let mut rx = LineReceiver::new(&ready);

        for &b in b"hello\r" {
            assert!(!rx.on_byte(b));
        }
        assert!(!ready.is_ready());
        assert!(rx.on_byte(b'\n'));
        assert!(ready.is_ready());

        let line = block_on(ready.receive_line());
        assert_eq!(line.as_str(), Some("hello"));
        assert!(!ready.is_ready());
        assert_eq!(rx.pending(), 0);
    }

    #[test]
    fn test_try_receive_empty() {
        let ready: ReadyLine = ReadyLine::new();
        assert!(ready.try_receive_line().is_none());
    }

    #[test]
    fn test_overflow_truncates() {
        let ready: ReadyLine<8> = ReadyLine::new();
        let mut rx = LineReceiver::new(&ready);

        for &b in b"0123456789\n" {
            rx.on_byte(b);
        }
        let line = ready.try_receive_line().unwrap();
        assert_eq!(line.as_bytes(), b"0123456");
        assert!(line.is_truncated());
    }

    #[test]
    fn test_newer_line_replaces_unread() {
        let ready: ReadyLine = ReadyLine::new();
        let mut rx = LineReceiver::new(&ready);

        for &b in b"first\nsecond\n" {
            rx.on_byte(b);
        }
        let line = ready.try_receive_line().unwrap();
        assert_eq!(line.as_str(), Some("second"));
        assert!(ready.try_receive_line().is_none());
    }

    #[test]
    fn test_empty_line_is_delivered() {
        let ready: ReadyLine = ReadyLine::new();
        let mut rx = LineReceiver::new(&ready);

        assert!(rx.on_byte(b'\n'));
        assert!(ready.try_receive_line().unwrap().is_empty());
    }
}
