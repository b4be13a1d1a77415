//! # Kernel
//!
//! The single global scheduler instance and the public API around it.
//!
//! Interrupt handlers cannot receive a scheduler handle, so the kernel
//! owns one `Scheduler<'static>` behind a critical-section mutex and
//! exposes it through [`with`]. Everything else in this module is a thin
//! wrapper over that accessor.
//!
//! ## Startup Sequence
//!
//! ```text
//! reset_handler (cortex-m-rt)
//!   └─► main()
//!         ├─► kernel::init(TICK_HZ)   ← Empty task table
//!         ├─► kernel::add_task()      ← Register tasks (×N)
//!         └─► kernel::start()         ← Start SysTick (no return)
//!               └─► SysTick ──► kernel::update() every tick
//! ```
//!
//! Registration belongs to the startup phase. A callback that calls back
//! into the kernel while `update()` is dispatching is rejected with
//! [`SchedulerError::Busy`] instead of aliasing the task table.

use core::cell::RefCell;

use crate::config::TICK_HZ;
use crate::error::{Result, SchedulerError};
use crate::scheduler::Scheduler;
use crate::sync::{self, Mutex};
use crate::task::{Callback, TaskId};
use crate::log_warn;

// ---------------------------------------------------------------------------
// Global scheduler instance
// ---------------------------------------------------------------------------

/// Global scheduler instance. Only reachable through [`with`].
static SCHEDULER: Mutex<RefCell<Scheduler<'static>>> =
    Mutex::new(RefCell::new(Scheduler::new(TICK_HZ)));

/// Run `f` with exclusive access to the global scheduler.
///
/// Returns `None` if the scheduler is already borrowed, which only happens
/// when called from inside a task dispatched by [`update`]. `f` runs inside
/// the critical section, with interrupts masked on Cortex-M.
pub fn with<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Scheduler<'static>) -> R,
{
    sync::critical_section(|cs| {
        let mut scheduler = SCHEDULER.borrow(cs).try_borrow_mut().ok()?;
        Some(f(&mut scheduler))
    })
}

// ---------------------------------------------------------------------------
// Kernel API
// ---------------------------------------------------------------------------

/// Initialize the kernel with the rate `update()` will be called at.
///
/// Discards every registered task. Must be called from the main thread
/// before the tick source is started.
pub fn init(tick_frequency_hz: u32) {
    if with(|scheduler| scheduler.init(tick_frequency_hz)).is_none() {
        log_warn!("kernel init ignored: called from a running task");
    }
}

/// Register a periodic function with the global scheduler.
///
/// # Returns
/// - `Ok(task_id)`: the task's slot index
/// - `Err(_)`: invalid frequency, missing callback, full table, or
///   [`SchedulerError::Busy`] when called from a running task
///
/// # Example
/// ```ignore
/// kernel::init(1000);
/// kernel::add_task(10, Some(blink_led), 1).unwrap();
/// ```
pub fn add_task(frequency_hz: u32, callback: Option<fn()>, priority: u8) -> Result<TaskId> {
    with(|scheduler| scheduler.add_task(frequency_hz, callback.map(Callback::Fn), priority))
        .unwrap_or(Err(SchedulerError::Busy))
}

/// Advance the global scheduler by one tick.
///
/// Called from the SysTick handler (or a polling loop) at the rate given
/// to [`init`]. Returns the number of tasks dispatched; a re-entrant call
/// dispatches nothing.
///
/// Callbacks run inside the kernel's critical section; on Cortex-M all
/// interrupts stay masked until the last due callback returns.
pub fn update() -> usize {
    match with(|scheduler| scheduler.update()) {
        Some(dispatched) => dispatched,
        None => {
            log_warn!("kernel update ignored: re-entrant tick");
            0
        }
    }
}

/// Tick rate the kernel was initialized with.
///
/// Returns `None` when called from a running task, where the scheduler
/// is already borrowed by [`update`].
pub fn tick_frequency_hz() -> Option<u32> {
    with(|scheduler| scheduler.tick_frequency_hz())
}

/// Start the SysTick tick source. **Does not return.**
///
/// Programs SysTick at the kernel's tick rate and sleeps between
/// interrupts; all task work happens inside the SysTick handler.
///
/// # Preconditions
/// - `init()` must have been called and tasks registered.
/// - Must be called from the main thread (not from an ISR).
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub fn start(mut core_peripherals: cortex_m::Peripherals) -> ! {
    crate::arch::cortex_m4::configure_systick(
        &mut core_peripherals.SYST,
        &mut core_peripherals.SCB,
        tick_frequency_hz().unwrap_or(TICK_HZ),
    );

    loop {
        cortex_m::asm::wfi();
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
