//! # Synchronization Primitives
//!
//! Interrupt-safe critical section abstraction. On Cortex-M the
//! implementation comes from `cortex-m`'s `critical-section-single-core`
//! feature (interrupts masked); on host builds from `critical-section`'s
//! `std` feature (a global reentrant lock).

pub use ::critical_section::{CriticalSection, Mutex};

/// Execute a closure within a critical section.
///
/// Nesting is allowed: an inner call inside an outer critical section
/// simply runs the closure.
///
/// # Usage
/// ```ignore
/// sync::critical_section(|cs| {
///     // Access shared state safely
/// });
/// ```
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(CriticalSection<'_>) -> R,
{
    ::critical_section::with(f)
}
