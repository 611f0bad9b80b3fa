//! Hub construction: configuration and builder.
//!
//! - [`HubConfig`]: subscriber limit and default buffering policy;
//! - [`HubBuilder`]: fluent construction of an [`EventHub`](crate::EventHub).

mod builder;
mod config;

pub use builder::HubBuilder;
pub use config::HubConfig;
