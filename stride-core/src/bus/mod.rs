//! Bus transaction engine
//!
//! Performs addressed register I/O over the shared 2-wire bus with explicit
//! protocol framing:
//!
//! ```text
//! Idle → Start → AddressPhase → RegisterPhase → [Restart → ReadPhase] → Stop → Idle
//! ```
//!
//! The engine is not re-entrant. It must have exactly one owner; other
//! execution contexts ask that owner for work instead of touching the bus.

pub mod engine;
pub mod shared;
pub mod transaction;

pub use engine::BusEngine;
pub use shared::SharedBus;
pub use transaction::{Address, BusError, Direction, Phase, PollCounter};
