//! CLI command implementations.

pub mod config;
pub mod data;

use bubble_api::DataApiClient;
use bubble_core::config::AppConfig;
use bubble_core::error::BubbleResult;

/// Helper to create a Data API client from config.
pub fn create_client(config: &AppConfig) -> BubbleResult<DataApiClient> {
    DataApiClient::new(&config.api)
}

/// Truncate a string to a maximum length, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
