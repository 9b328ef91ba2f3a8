//! Bubble Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other workspace crates:
//! - Application configuration (app domain, API key, environment selection)
//! - Global error types covering all error categories
//! - Structured logging with tracing
//! - Platform directory helpers
//! - Common constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{BubbleError, BubbleResult};
pub use logging::init_logging;
pub use platform::Platform;
