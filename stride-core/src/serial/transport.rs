//! Blocking serial transmitter

use stride_hal::uart::UartTx;
use stride_protocol::{format_sample, SAMPLE_HEADER};

use crate::motion::MotionSample;

/// Terminator appended by [`SerialTransport::transmit_line`]
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Errors from the transmit path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError<E> {
    /// The transmitter rejected a write
    Uart(E),
    /// The sample did not fit the line buffer
    Format,
}

/// Line-oriented wrapper around a blocking transmitter
///
/// Every call returns once the transmitter has taken all of its bytes.
/// Nothing is buffered here.
pub struct SerialTransport<T> {
    tx: T,
}

impl<T: UartTx> SerialTransport<T> {
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    /// Send one byte
    pub fn transmit_byte(&mut self, byte: u8) -> Result<(), TransmitError<T::Error>> {
        self.tx.write_byte(byte).map_err(TransmitError::Uart)
    }

    /// Send a string as-is
    pub fn transmit_str(&mut self, s: &str) -> Result<(), TransmitError<T::Error>> {
        self.tx
            .write_blocking(s.as_bytes())
            .map_err(TransmitError::Uart)
    }

    /// Send a string followed by `\r\n`
    pub fn transmit_line(&mut self, s: &str) -> Result<(), TransmitError<T::Error>> {
        self.transmit_str(s)?;
        self.tx
            .write_blocking(LINE_ENDING)
            .map_err(TransmitError::Uart)
    }

    /// Send the column header that precedes the sample stream
    pub fn transmit_header(&mut self) -> Result<(), TransmitError<T::Error>> {
        self.transmit_line(SAMPLE_HEADER)
    }

    /// Send one sample as a formatted line
    pub fn transmit_sample(&mut self, sample: &MotionSample) -> Result<(), TransmitError<T::Error>> {
        let line = format_sample(sample.x, sample.y, sample.z).map_err(|_| TransmitError::Format)?;
        self.transmit_line(&line)
    }

    /// Wait until every queued byte has left the transmitter
    pub fn flush(&mut self) -> Result<(), TransmitError<T::Error>> {
        self.tx.flush().map_err(TransmitError::Uart)
    }

    pub fn inner(&self) -> &T {
        &self.tx
    }
}
