//! Logging setup shared by the service binary and its tests.

/// Initialize process-wide structured logging.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, JSON output).
pub mod tracing;
