//! # Architecture Abstraction Layer
//!
//! Hardware tick sources for the scheduler. The Cortex-M4 port is only
//! compiled for bare-metal ARM targets; the reload arithmetic below is
//! portable so it can be checked on the host.

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod cortex_m4;

/// Largest value the 24-bit SysTick reload register accepts.
pub const SYSTICK_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// SysTick reload value for a `tick_hz` interrupt from a `clock_hz` core
/// clock, clamped to the register's range. A zero `tick_hz` is treated as
/// the slowest possible tick.
pub const fn systick_reload(clock_hz: u32, tick_hz: u32) -> u32 {
    if tick_hz == 0 {
        return SYSTICK_MAX_RELOAD;
    }
    let cycles = clock_hz / tick_hz;
    if cycles == 0 {
        0
    } else if cycles - 1 > SYSTICK_MAX_RELOAD {
        SYSTICK_MAX_RELOAD
    } else {
        cycles - 1
    }
}
