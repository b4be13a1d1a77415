//! Logging abstraction
//!
//! Unified logging macros that work across targets:
//! - Embedded (`defmt` feature): forwards to `defmt`
//! - Host (`std` feature or tests): `println!`
//! - Otherwise: no-op, arguments are still type-checked
//!
//! Format strings must stay within the common subset of `defmt` and
//! `core::fmt` (plain `{}` placeholders).

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);
        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::println!("[INFO] {}", ::core::format_args!($($arg)*));
        #[cfg(all(not(feature = "defmt"), not(any(test, feature = "std"))))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::println!("[WARN] {}", ::core::format_args!($($arg)*));
        #[cfg(all(not(feature = "defmt"), not(any(test, feature = "std"))))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::println!("[DEBUG] {}", ::core::format_args!($($arg)*));
        #[cfg(all(not(feature = "defmt"), not(any(test, feature = "std"))))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log trace message
///
/// Used on the per-tick path; stays silent on host builds to keep test
/// output readable.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
