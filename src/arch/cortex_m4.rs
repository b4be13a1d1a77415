//! # Cortex-M4 Port Layer
//!
//! SysTick is the scheduler's tick source. Each SysTick exception runs
//! one `kernel::update()`, so every task callback executes in handler
//! mode with the SysTick priority.
//!
//! ## Interrupt Latency
//!
//! `kernel::update()` holds the kernel's critical section for the whole
//! dispatch, and `critical-section-single-core` implements that with
//! `cpsid i`. Every callback therefore runs with all interrupts masked:
//! a slow callback delays every ISR, not only the scheduler. Keep
//! callbacks short. SysTick is set to the lowest priority (0xFF) so it
//! never preempts another handler on entry.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{scb::SystemHandler, SCB, SYST};

use crate::arch::systick_reload;
use crate::config::SYSTEM_CLOCK_HZ;
use crate::kernel;

// ---------------------------------------------------------------------------
// SysTick configuration
// ---------------------------------------------------------------------------

/// Configure SysTick to fire at `tick_hz` using the processor clock.
///
/// Once enabled, each tick dispatches the due tasks with interrupts
/// masked until the last callback returns.
///
/// # Parameters
/// - `syst`: Mutable reference to the SysTick peripheral
/// - `scb`: System control block, used to set the SysTick priority
/// - `tick_hz`: interrupt rate, normally the kernel's tick frequency
pub fn configure_systick(syst: &mut SYST, scb: &mut SCB, tick_hz: u32) {
    // Safety: called once during start-up, before SysTick is enabled, so
    // no priority-based critical section can be broken.
    unsafe {
        scb.set_priority(SystemHandler::SysTick, 0xFF);
    }

    syst.set_reload(systick_reload(SYSTEM_CLOCK_HZ, tick_hz));
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_counter();
    syst.enable_interrupt();
}

// ---------------------------------------------------------------------------
// SysTick handler
// ---------------------------------------------------------------------------

/// SysTick exception handler: scheduler tick entry point.
///
/// Called at the configured tick rate. Runs every task that is due on
/// this tick before returning.
#[no_mangle]
pub extern "C" fn SysTick() {
    kernel::update();
}
