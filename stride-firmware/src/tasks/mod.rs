//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod bus;
pub mod button;
pub mod console;
pub mod serial_rx;

pub use bus::bus_task;
pub use button::button_task;
pub use console::console_task;
pub use serial_rx::serial_rx_task;
