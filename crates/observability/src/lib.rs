//! Process-wide logging setup shared by the binaries.

/// Initialize tracing with JSON output.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    self::tracing::init();
}

pub use self::tracing::{LogFormat, init_with};

/// Subscriber configuration (filters, formats).
pub mod tracing;
