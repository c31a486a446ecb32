//! Transaction building blocks: addresses, phases, errors and the byte
//! timeout counter.

/// Errors returned by bus transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Byte-complete flag not observed within the poll limit
    Timeout,
    /// Peripheral withheld the acknowledge bit
    Nack,
    /// Address does not fit in 7 bits
    InvalidAddress,
    /// Block transfer of zero bytes
    EmptyTransfer,
    /// Engine already borrowed for another transaction
    Busy,
}

/// Transfer direction, encoded in bit 0 of the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Write = 0,
    Read = 1,
}

/// 7-bit peripheral address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    /// Largest valid 7-bit address
    pub const MAX: u8 = 0x7F;

    /// Validate a 7-bit address
    pub const fn new(raw: u8) -> Result<Self, BusError> {
        if raw > Self::MAX {
            Err(BusError::InvalidAddress)
        } else {
            Ok(Self(raw))
        }
    }

    /// Address byte sent after a (repeated) start
    ///
    /// The address is shifted left by one and the direction occupies bit 0.
    pub const fn header(self, direction: Direction) -> u8 {
        (self.0 << 1) | direction as u8
    }
}

impl TryFrom<u8> for Address {
    type Error = BusError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Address::new(raw)
    }
}

/// Position of the engine within a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No transaction in flight
    Idle,
    /// Start condition issued
    Start,
    /// Address byte being sent
    AddressPhase,
    /// Register byte being sent
    RegisterPhase,
    /// Data byte being sent (writes)
    DataPhase,
    /// Repeated start with the read header being sent
    Restart,
    /// Clocking data bytes in
    ReadPhase,
    /// Stop condition issued
    Stop,
}

impl Phase {
    /// Check if a transaction is in flight
    pub fn is_busy(&self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

/// Bounded poll counter for one byte transfer
///
/// Counts polls of the byte-complete flag. Once `limit` polls have been
/// spent the wait is abandoned with [`BusError::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCounter {
    polls: u16,
    limit: u16,
}

impl PollCounter {
    pub const fn new(limit: u16) -> Self {
        Self { polls: 0, limit }
    }

    /// Spend one poll; returns false once the budget is exhausted
    pub fn tick(&mut self) -> bool {
        if self.polls >= self.limit {
            return false;
        }
        self.polls += 1;
        true
    }

    /// Polls spent so far
    pub fn polls(&self) -> u16 {
        self.polls
    }
}
