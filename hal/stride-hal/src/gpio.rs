//! GPIO pin abstractions
//!
//! The bit-banged bus drives its two lines through these traits.

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Open-drain line that can be released and sampled
///
/// Releasing lets the external pull-up take the line high unless another
/// device holds it low.
pub trait OpenDrainPin: InputPin {
    /// Drive the line low
    fn drive_low(&mut self);

    /// Stop driving and let the pull-up take over
    fn release(&mut self);
}
