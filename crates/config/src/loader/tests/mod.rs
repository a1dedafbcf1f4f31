//! Tests for initialization-time loading that touch process-global state.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable and cwd pollution.
//! - Temporary directories are cleaned up automatically via `tempfile`.
