//! Logging backend selection
//!
//! `log` by default, `defmt` on targets that enable it, nothing otherwise.

#![allow(unused)]

use core::fmt::Debug;

#[cfg(feature = "log")]
pub(crate) use log::{debug, error, info, trace, warn};

#[cfg(all(feature = "defmt", not(feature = "log")))]
pub(crate) use defmt::{debug, error, info, trace, warn};

#[cfg(not(any(feature = "log", feature = "defmt")))]
mod noop {
    // Arguments are still evaluated so call sites stay warning-free
    macro_rules! trace {
        ($($arg:tt)*) => {{
            let _ = core::format_args!($($arg)*);
        }};
    }
    macro_rules! debug {
        ($($arg:tt)*) => {{
            let _ = core::format_args!($($arg)*);
        }};
    }
    macro_rules! info {
        ($($arg:tt)*) => {{
            let _ = core::format_args!($($arg)*);
        }};
    }
    macro_rules! warn {
        ($($arg:tt)*) => {{
            let _ = core::format_args!($($arg)*);
        }};
    }
    macro_rules! error {
        ($($arg:tt)*) => {{
            let _ = core::format_args!($($arg)*);
        }};
    }

    pub(crate) use {debug, error, info, trace, warn};
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
pub(crate) use noop::{debug, error, info, trace, warn};

/// Log adapter for platform error types that only implement `Debug`
pub(crate) struct Dbg<'a, T: ?Sized>(pub &'a T);

impl<T: Debug + ?Sized> Debug for Dbg<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "defmt")]
impl<T: Debug + ?Sized> defmt::Format for Dbg<'_, T> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", defmt::Debug2Format(self.0))
    }
}
