//! Reset button task
//!
//! The button pulls its input low. A press resets both counters and asks
//! the bus owner for the reset screen.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use stride_core::config::ButtonConfig;
use stride_core::dispatch::DisplayRequest;

use crate::channels::{COUNTERS, DISPLAY_REQUESTS};

/// Button task
///
/// After a falling edge the input must still be low once `debounce_ms` has
/// passed. The task then waits for release, so one press resets once.
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, config: ButtonConfig) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(config.debounce_ms as u64).await;

        if button.is_high() {
            trace!("Button bounce ignored");
            continue;
        }

        info!("Reset button pressed");
        COUNTERS.reset_all();
        if DISPLAY_REQUESTS.try_send(DisplayRequest::Reset).is_err() {
            warn!("Display request queue full, dropping reset screen");
        }

        button.wait_for_high().await;
        Timer::after_millis(config.debounce_ms as u64).await;
    }
}
