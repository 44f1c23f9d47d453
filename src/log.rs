//! Feature-gated warning macro.
//!
//! Scene composition skips entities that reference missing lines or
//! stations instead of failing; those skips surface through [`warn!`].
//! With the `tracing` feature enabled this is `tracing::warn!`, otherwise
//! it compiles to a no-op.

#[cfg(feature = "tracing")]
pub use tracing::warn;

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::warn;
