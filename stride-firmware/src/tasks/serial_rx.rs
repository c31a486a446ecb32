//! Serial receive task
//!
//! Bytes arrive through the interrupt-driven buffered UART. Each byte feeds
//! both the command dispatcher and the line receiver.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use stride_core::dispatch::{Dispatch, DispatchError, Dispatcher};
use stride_core::serial::LineReceiver;

use crate::channels::{COUNTERS, DISPLAY_REQUESTS, RX_LINE};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut dispatcher = Dispatcher::new();
    let mut receiver = LineReceiver::new(&RX_LINE);
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    receiver.on_byte(byte);
                    if let Some(dispatch) = dispatcher.on_byte(byte, &COUNTERS) {
                        handle_dispatch(dispatch);
                    }
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn handle_dispatch(dispatch: Dispatch) {
    match dispatch.result {
        Ok(command) => debug!("Command: {:?}", command),
        Err(DispatchError::Line(e)) => warn!("Command dropped: {:?}", e),
        Err(DispatchError::Command(e)) => warn!("Unrecognised command: {:?}", e),
    }

    if DISPLAY_REQUESTS.try_send(dispatch.request).is_err() {
        warn!("Display request queue full, dropping {:?}", dispatch.request);
    }
}
