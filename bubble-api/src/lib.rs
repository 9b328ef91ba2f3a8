//! Bubble API - HTTP client for the Bubble.io REST Data API.
//!
//! This crate provides a typed client for the Data API of a Bubble app
//! (`/api/1.1/obj/{type}`). It handles bearer-token authentication, live
//! vs. version-test environment selection, constraint/sort query
//! construction, and transparent draining of paginated GET results into a
//! single ordered sequence.

pub mod client;
pub mod data;
pub mod query;
pub mod response;

// Re-export key types
pub use client::DataApiClient;
pub use query::{Constraint, ConstraintType, DataQuery, SortOption, SortOrder};
pub use response::{DataEnvelope, RecordPage};
