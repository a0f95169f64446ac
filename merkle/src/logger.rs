// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Logging for tree building, chunking and verification.
//!
//! With the `logger` feature the [`log`](https://docs.rs/log) macros are
//! re-exported under the same names. Without it `debug!`, `trace!` and
//! `warn!` expand to a branch guarded by [`LOGGING`], which is `false`, so
//! their arguments are still type checked but nothing is formatted.

/// True when the crate was built with the `logger` feature.
pub const LOGGING: bool = cfg!(feature = "logger");

#[cfg(feature = "logger")]
pub use log::{debug, trace, warn};

#[cfg(not(feature = "logger"))]
pub use silent::{debug, trace, warn};

#[cfg(not(feature = "logger"))]
mod silent {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __shard_merkle_silent {
        ($($arg:tt)+) => {
            if $crate::logger::LOGGING {
                let _ = format!($($arg)+);
            }
        };
    }

    pub use __shard_merkle_silent as debug;
    pub use __shard_merkle_silent as trace;
    pub use __shard_merkle_silent as warn;
}
