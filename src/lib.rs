//! postscrape: fetch a forum listing page, extract post title, author, and date, and print
//! them to the console, a file, or a Telegram chat.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod scraper;

#[cfg(test)]
mod test_server;

// Re-exports for CLI and consumers.
pub use config::{resolve, OutputMode, OutputTarget, RunConfig};
pub use error::Error;
pub use model::Post;
pub use output::{ChatClient, Sink, TelegramClient};
pub use crate::scraper::{extract_posts, fetch_document, scrape_posts, HttpClient};
