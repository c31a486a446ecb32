//! Serial transport
//!
//! Blocking transmit of bytes, strings and sample lines, and line-oriented
//! receive handed from the receive path to a waiting consumer.

pub mod receiver;
pub mod transport;

pub use receiver::{LineReceiver, ReadyLine, RX_LINE_CAPACITY};
pub use transport::{SerialTransport, TransmitError, LINE_ENDING};
