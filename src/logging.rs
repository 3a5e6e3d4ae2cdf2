//! Unified logging macro for the codec.
//!
//! The codec itself never forces a logging backend: diagnostics go through
//! [`knx_log!`], which expands to `defmt::` (feature `defmt`), `log::`
//! (feature `log`) or nothing at all, so the default feature set builds
//! silently on any target.
//!
//! # Usage
//!
//! ```rust,ignore
//! knx_log!(warn, "unknown datapoint type {}", name);
//! knx_log!(trace, "parsed {} bits", n);
//! ```

/// Unified logging macro - selects defmt::, log:: or a no-op based on features
#[macro_export]
#[cfg(feature = "defmt")]
macro_rules! knx_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! knx_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(not(feature = "log"), not(feature = "defmt")))]
macro_rules! knx_log {
    ($level:ident, $($arg:tt)*) => {{
        // Arguments are evaluated so the call sites behave identically
        // with and without a backend
        let _ = ($($arg)*);
    }};
}
