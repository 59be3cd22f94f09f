//! Shared error type. Every failure aborts the run; `main` prints it and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Run parameters
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cannot read config {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {context}: {reason}")]
    Parse { context: String, reason: String },

    // HTTP and network
    #[error("Network error: could not fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    // Output
    #[error("Failed to write output: {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("Failed to send chat message, status code {status}")]
    Delivery { status: u16 },

    /// Transport failure talking to the chat API. The URL carries the bot token, so it is stripped.
    #[error("Failed to send chat message: {source}")]
    DeliveryTransport { source: reqwest::Error },
}
