//! HTTP client for the remote analysis service, with local fallbacks

mod client;
mod endpoint;
mod error;
pub mod responses;
mod service;

pub use client::ApiClient;
pub use endpoint::Endpoint;
pub use error::ClientError;
pub use service::{ChatSession, ScanService};
