//! # TickOS Configuration
//!
//! Compile-time constants governing the scheduler and system behavior.
//! All limits are fixed at compile time; no dynamic allocation.

/// Maximum number of tasks the scheduler can hold simultaneously.
/// This bounds the slot table and the per-tick ready list, both of
/// which live inline in the scheduler (or on the stack during `update`).
pub const MAX_TASKS: usize = 10;

/// Default SysTick frequency in Hz used by the firmware bring-up.
/// Every task frequency must be in `1..=TICK_HZ`.
pub const TICK_HZ: u32 = 1000;

/// System clock frequency in Hz (default for STM32F4 at 16 MHz HSI).
/// Only used to compute the SysTick reload value.
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;
