//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "bubble";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Data API version prefix.
pub const DATA_API_VERSION: &str = "1.1";

/// Path segment selecting the development environment of a Bubble app.
pub const VERSION_TEST_SEGMENT: &str = "version-test";

/// Number of records per page returned by the Data API.
pub const PAGE_SIZE: u64 = 100;

/// Default request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Directory name used under the platform data/config directories.
pub const APP_DIR_NAME: &str = "BubbleData";
