//! Logging utilities
//!
//! Thin helpers over the `log` facade so that loading and cleaning report
//! in a consistent format.

pub mod log;

pub use self::log::{log_operation_complete, log_operation_start, log_warning};
