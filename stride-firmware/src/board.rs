//! RP2040 bindings for the hardware traits
//!
//! Pin assignments (Pico-style board):
//!
//! | Signal        | GPIO |
//! |---------------|------|
//! | UART0 TX      | 0    |
//! | UART0 RX      | 1    |
//! | Bus SDA       | 4    |
//! | Bus SCL       | 5    |
//! | Reset button  | 9    |

use embassy_rp::gpio::{Flex, Pull};
use embassy_rp::uart::{BufferedUartTx, Error as UartError};
use embassy_time::Delay;
use embedded_io::Write;

use stride_drivers::bus::BitBangBus;
use stride_hal::gpio::{InputPin, OpenDrainPin};
use stride_hal::uart::UartTx;

/// The bus controller the firmware runs on
pub type Bus = BitBangBus<OpenDrain, Delay>;

/// GPIO used as an open-drain line
///
/// The output latch is held low; driving the line enables the output and
/// releasing it switches back to input so the pull-up takes over.
pub struct OpenDrain {
    pin: Flex<'static>,
}

impl OpenDrain {
    pub fn new(mut pin: Flex<'static>) -> Self {
        // Internal pull-up as a fallback for boards without external ones
        pin.set_pull(Pull::Up);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }
}

impl InputPin for OpenDrain {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl OpenDrainPin for OpenDrain {
    fn drive_low(&mut self) {
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }
}

/// Blocking transmitter over the interrupt-driven UART
///
/// Writes wait only while the transmit ring buffer is full.
pub struct SerialTx {
    tx: BufferedUartTx,
}

impl SerialTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for SerialTx {
    type Error = UartError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.tx)
    }
}
