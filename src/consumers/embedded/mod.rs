//! # Built-in handlers
//!
//! Small, self-contained handlers useful for demos.
//!
//! - [`LogHandler`]: logs every value through `tracing` (demo/debug).

mod log;

pub use log::LogHandler;
