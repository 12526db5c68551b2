//! Word Core
//!
//! The fixed-capacity byte buffer shared by every host binding:
//! - [`FixedBuffer`]: 64 bytes of inline storage plus a used-length counter
//! - [`WordError`]: the failures a host can report while feeding it
//!
//! Oversized input is truncated to [`CAPACITY`] without signaling.

pub mod buffer;
pub mod error;

pub use buffer::{FixedBuffer, CAPACITY};
pub use error::WordError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
