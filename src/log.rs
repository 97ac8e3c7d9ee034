//! `debug!`/`warn!` for skipped assessments, editor mutations and catalog misses.
//!
//! With the `tracing` feature these are the `tracing` macros; set `RUST_LOG`
//! and install a subscriber to see them. Without it every call expands to
//! nothing, so arguments are never evaluated.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
