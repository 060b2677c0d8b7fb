//! Console HTTP client for the configuration API
//!
//! Talks GraphQL to the configuration service and keeps a per-project cache
//! of session settings so the settings panel can read without a round trip.

pub mod cache;
pub mod client;

pub use cache::QueryCache;
pub use client::{error::ClientError, ConsoleClient, ConsoleClientBuilder};
