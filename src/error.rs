//! # Scheduler Errors
//!
//! Every way a registration can be rejected. All variants leave the
//! scheduler untouched; the caller decides whether a failure is fatal.

use core::fmt;

/// Result type for scheduler operations.
pub type Result<T> = core::result::Result<T, SchedulerError>;

/// Reasons a task registration was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Requested frequency is zero or exceeds the tick frequency.
    InvalidFrequency,
    /// No callback was supplied.
    MissingCallback,
    /// Every slot is already occupied.
    CapacityExhausted,
    /// The global scheduler is already borrowed, i.e. the call came from
    /// inside a callback dispatched by `kernel::update`.
    Busy,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::InvalidFrequency => {
                write!(f, "task frequency must be in 1..=tick frequency")
            }
            SchedulerError::MissingCallback => write!(f, "task callback is missing"),
            SchedulerError::CapacityExhausted => write!(f, "task table is full"),
            SchedulerError::Busy => write!(f, "scheduler is busy dispatching tasks"),
        }
    }
}
