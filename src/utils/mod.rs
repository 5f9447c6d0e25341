//! Shared helpers: console rendering, number formatting and logging

pub mod console;
pub mod format;
pub mod logging;
