//! # TickOS Example Firmware
//!
//! Demonstrates the tick-driven scheduler with three periodic tasks on a
//! 1 kHz tick:
//!
//! | Task | Rate | Interval | Priority | Behavior |
//! |------|------|----------|----------|----------|
//! | `sensor_sample` | 100 Hz | 10 ticks | 0 | Fast control-loop input |
//! | `telemetry` | 10 Hz | 100 ticks | 1 | Reports the latest sample |
//! | `heartbeat` | 2 Hz | 500 ticks | 2 | Toggles a status flag |
//!
//! Every 100th tick both `sensor_sample` and `telemetry` are due;
//! `sensor_sample` runs first, so telemetry always reports a fresh value.
//!
//! On the embedded target SysTick drives `kernel::update()`. On a host
//! build the same tasks run in a simulated one-second polling loop.

#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_main)]

use tickos::config::TICK_HZ;
use tickos::kernel;

// ---------------------------------------------------------------------------
// Task entry points
// ---------------------------------------------------------------------------

mod tasks {
    use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    pub static SAMPLES: AtomicU32 = AtomicU32::new(0);
    pub static REPORTS: AtomicU32 = AtomicU32::new(0);
    pub static BEATS: AtomicU32 = AtomicU32::new(0);
    pub static LED_ON: AtomicBool = AtomicBool::new(false);

    static LAST_SAMPLE: AtomicU32 = AtomicU32::new(0);

    /// **Sensor Sample** (100 Hz, priority 0)
    ///
    /// Stands in for an ADC read; produces a slowly ramping value.
    pub fn sensor_sample() {
        let n = SAMPLES.fetch_add(1, Ordering::Relaxed) + 1;
        LAST_SAMPLE.store(n.wrapping_mul(7) % 4096, Ordering::Relaxed);
    }

    /// **Telemetry** (10 Hz, priority 1)
    pub fn telemetry() {
        REPORTS.fetch_add(1, Ordering::Relaxed);
        tickos::log_debug!("telemetry: sample={}", LAST_SAMPLE.load(Ordering::Relaxed));
    }

    /// **Heartbeat** (2 Hz, priority 2)
    pub fn heartbeat() {
        BEATS.fetch_add(1, Ordering::Relaxed);
        LED_ON.fetch_xor(true, Ordering::Relaxed);
    }
}

/// Initialize the kernel and register the demo tasks.
fn setup() {
    kernel::init(TICK_HZ);

    let registrations: [(&str, u32, fn(), u8); 3] = [
        ("sensor_sample", 100, tasks::sensor_sample, 0),
        ("telemetry", 10, tasks::telemetry, 1),
        ("heartbeat", 2, tasks::heartbeat, 2),
    ];
    for (name, frequency_hz, callback, priority) in registrations {
        match kernel::add_task(frequency_hz, Some(callback), priority) {
            Ok(id) => tickos::log_info!("{} registered as task {}", name, id.index()),
            Err(error) => tickos::log_warn!("{} not registered: {}", name, error),
        }
    }
}

// ---------------------------------------------------------------------------
// Embedded entry point
// ---------------------------------------------------------------------------

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod firmware {
    use cortex_m_rt::entry;
    use panic_halt as _;

    use tickos::kernel;

    /// Firmware entry point. Registers the tasks and hands control to
    /// SysTick. Does not return.
    #[entry]
    fn main() -> ! {
        let cp = cortex_m::Peripherals::take().unwrap();

        super::setup();

        kernel::start(cp)
    }
}

// ---------------------------------------------------------------------------
// Host simulation
// ---------------------------------------------------------------------------

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {
    use core::sync::atomic::Ordering;

    setup();

    let mut dispatched = 0;
    for _ in 0..TICK_HZ {
        dispatched += kernel::update();
    }

    println!("simulated {} ticks at {} Hz, {} dispatches", TICK_HZ, TICK_HZ, dispatched);
    println!("  sensor_sample: {}", tasks::SAMPLES.load(Ordering::Relaxed));
    println!("  telemetry:     {}", tasks::REPORTS.load(Ordering::Relaxed));
    println!("  heartbeat:     {}", tasks::BEATS.load(Ordering::Relaxed));
}
