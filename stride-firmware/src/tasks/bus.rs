//! Bus owner task
//!
//! The only task that runs bus transactions. It samples the accelerometer
//! on a fixed cadence, streams each sample over the serial link and draws
//! every screen. Other tasks reach the display through `DISPLAY_REQUESTS`.
//! The reset banner is a deadline in the same `select3`, so sampling runs
//! at its normal period while the banner is up.

use core::cell::RefCell;

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};

use stride_core::bus::{BusEngine, SharedBus};
use stride_core::config::StrideConfig;
use stride_core::dispatch::DisplayRequest;
use stride_core::motion::{Acquisition, StepClassifier};
use stride_core::screen::{ResetBanner, Screen};
use stride_core::serial::SerialTransport;
use stride_core::traits::Accelerometer;
use stride_drivers::display::Lcd1602;
use stride_drivers::sensor::Mma8451;

use crate::board::{Bus, SerialTx};
use crate::channels::{COUNTERS, DISPLAY_REQUESTS};

type Display<'a> = Lcd1602<'a, Bus, Delay>;

/// Bus task - sampling loop and display owner
#[embassy_executor::task]
pub async fn bus_task(bus: Bus, tx: BufferedUartTx, config: StrideConfig) {
    info!("Bus task started");

    let engine = RefCell::new(BusEngine::new(bus, config.bus));
    let shared = SharedBus::new(&engine);

    let mut serial = SerialTransport::new(SerialTx::new(tx));
    let mut display = init_display(shared, &config);
    let mut sensor = Mma8451::new(shared, &config.sensor);
    let mut sensor_ready = init_sensor(&mut sensor);
    let mut acquisition = Acquisition::new(StepClassifier::new(&config.classifier));
    let mut faulted = false;
    let mut banner = ResetBanner::new();

    show(&mut display, Screen::Welcome);

    if let Err(e) = serial.transmit_header().and_then(|()| serial.flush()) {
        warn!("Failed to send sample header: {:?}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(config.sampling.period_ms as u64));

    loop {
        let event = select3(
            ticker.next(),
            DISPLAY_REQUESTS.receive(),
            banner_expiry(banner.deadline()),
        )
        .await;

        match event {
            Either3::First(()) => {
                if !sensor_ready {
                    sensor_ready = init_sensor(&mut sensor);
                    if !sensor_ready {
                        show_fault(&mut display, &mut faulted);
                        continue;
                    }
                }

                match acquisition.run_cycle(&mut sensor, &COUNTERS) {
                    Ok(cycle) => {
                        if let Err(e) = serial.transmit_sample(&cycle.sample) {
                            warn!("Failed to send sample: {:?}", e);
                        }

                        if let Some(kind) = cycle.step {
                            debug!("{:?} step at {} g", kind, cycle.magnitude);
                        }
                        if (cycle.step.is_some() || faulted) && !banner.is_showing() {
                            faulted = false;
                            show(&mut display, Screen::Counters(cycle.counts));
                        }
                    }
                    Err(e) => {
                        warn!("Sample skipped: {:?}", e);
                        sensor_ready = false;
                        show_fault(&mut display, &mut faulted);
                    }
                }
            }

            Either3::Second(DisplayRequest::Refresh) => {
                if !banner.is_showing() {
                    show(&mut display, Screen::Counters(COUNTERS.snapshot()));
                }
            }

            Either3::Second(DisplayRequest::Reset) => {
                let screen = banner.start(Instant::now().as_millis(), config.display.reset_banner_ms);
                show(&mut display, screen);
            }

            Either3::Third(()) => {
                if let Some(screen) = banner.expire(Instant::now().as_millis()) {
                    show(&mut display, screen);
                }
            }
        }
    }
}

/// Resolves when the reset banner is due to come down
async fn banner_expiry(deadline: Option<u64>) {
    match deadline {
        Some(ms) => Timer::at(Instant::from_millis(ms)).await,
        None => core::future::pending().await,
    }
}

/// Detect and initialise the LCD
///
/// The firmware keeps counting without a display.
fn init_display<'a>(bus: SharedBus<'a, Bus>, config: &StrideConfig) -> Option<Display<'a>> {
    let mut lcd = match Lcd1602::detect(bus, Delay, &config.display) {
        Ok(lcd) => lcd,
        Err(e) => {
            warn!("No display found: {:?}", e);
            return None;
        }
    };

    match lcd.init() {
        Ok(()) => {
            info!("Display initialized at {=u8:#x}", lcd.address());
            Some(lcd)
        }
        Err(e) => {
            warn!("Display init failed: {:?}", e);
            None
        }
    }
}

fn init_sensor(sensor: &mut Mma8451<'_, Bus>) -> bool {
    match sensor.init() {
        Ok(()) => {
            info!("Accelerometer initialized ({:?})", sensor.range());
            true
        }
        Err(e) => {
            warn!("Accelerometer init failed: {:?}", e);
            false
        }
    }
}

/// Draw the fault screen once per fault
fn show_fault(display: &mut Option<Display<'_>>, faulted: &mut bool) {
    if !*faulted {
        *faulted = true;
        show(display, Screen::SensorFault(COUNTERS.snapshot()));
    }
}

fn show(display: &mut Option<Display<'_>>, screen: Screen) {
    let Some(lcd) = display.as_mut() else {
        return;
    };

    if let Err(e) = screen.render(lcd) {
        warn!("Failed to draw {:?}: {:?}", screen, e);
    }
}
