//! Stride - Step Counter Firmware
//!
//! Main firmware binary for RP2040-based boards. Samples an MMA8451Q
//! accelerometer, streams readings over UART0, counts walk and run steps
//! and shows them on a 16x2 LCD. Counts reset from a button or a serial
//! command.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stride_core::config::{parse_config, StrideConfig};
use stride_drivers::bus::BitBangBus;

use crate::board::OpenDrain;

/// Embedded configuration (compiled into firmware)
/// Edit stride.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../stride.toml");

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stride firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Serial link
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config.serial.baudrate;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.serial.baudrate);

    // Sensor and display bus
    let sda = OpenDrain::new(Flex::new(p.PIN_4));
    let scl = OpenDrain::new(Flex::new(p.PIN_5));
    let bus = BitBangBus::new(scl, sda, Delay);

    // Reset button, active low
    let button = Input::new(p.PIN_9, Pull::Up);

    spawner.spawn(tasks::bus_task(bus, tx, config)).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::console_task()).unwrap();
    spawner
        .spawn(tasks::button_task(button, config.button))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// stride.toml is checked at build time, so a failure here means the
/// on-device parser and the build check disagree.
fn load_config() -> StrideConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            StrideConfig::default()
        }
    }
}
