//! Firmware entry point.
//!
//! Composition root only: bring up the ESP-IDF runtime, construct the
//! adapters, load the persisted schedule, then run the fixed-period
//! control loop. All decisions live in [`aquactl::app::service::AppService`];
//! this file wires ports to adapters and keeps time.
//!
//! ```text
//!  GpioAdapter   SystemClock   NvsStorage   LogEventSink
//!  (In+Actuator) (ClockPort)   (StoragePort) (EventSink)
//!  ──────────────── Port Trait Boundary ────────────────
//!            AppService (gestures · schedule · fsm)
//! ```

use anyhow::Result;
use log::{info, warn};

use aquactl::adapters::gpio::GpioAdapter;
use aquactl::adapters::log_sink::LogEventSink;
use aquactl::adapters::nvs::NvsStorage;
use aquactl::adapters::time::SystemClock;
use aquactl::app::ports::ClockPort;
use aquactl::app::service::AppService;
use aquactl::drivers::hw;
use aquactl::error::Error;
use aquactl::store::ConfigStore;

/// Control loop period. Short enough for the 50 ms button debounce to
/// see every edge of interest.
const CONTROL_TICK_MS: u32 = 50;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("aquactl v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals and storage ────────────────────────────
    hw::init_gpio().map_err(Error::from)?;

    #[cfg(target_os = "espidf")]
    NvsStorage::init_flash().map_err(Error::from)?;
    let mut storage = NvsStorage::new();

    // ── 3. Load the persisted schedule ────────────────────────
    let store = ConfigStore::load(&mut storage);

    // ── 4. Construct adapters and the service ─────────────────
    let mut clock = SystemClock::new();
    let mut gpio = GpioAdapter::new();
    let mut sink = LogEventSink;

    let mut app = AppService::new(store);
    app.start(&mut sink);

    info!("entering control loop ({} ms tick)", CONTROL_TICK_MS);

    // ── 5. Control loop ───────────────────────────────────────
    let mut clock_was_set = true;
    loop {
        let now = clock.now();
        match (now.is_some(), clock_was_set) {
            (false, true) => warn!("wall clock unset, schedule suspended until it is"),
            (true, false) => info!("wall clock set, schedule active"),
            _ => {}
        }
        clock_was_set = now.is_some();

        let now_ms = clock.millis();
        app.run_cycle(now, now_ms, &mut gpio, &mut storage, &mut sink);

        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(CONTROL_TICK_MS);
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(u64::from(CONTROL_TICK_MS)));
    }
}
