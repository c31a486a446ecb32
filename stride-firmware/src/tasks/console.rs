//! Received-line consumer
//!
//! Waits for complete lines from the serial receive path and logs them.

use defmt::*;

use crate::channels::RX_LINE;

#[embassy_executor::task]
pub async fn console_task() {
    info!("Console task started");

    loop {
        let line = RX_LINE.receive_line().await;
        if line.is_truncated() {
            warn!("RX line truncated: {}", line);
        } else {
            debug!("RX line: {}", line);
        }
    }
}
