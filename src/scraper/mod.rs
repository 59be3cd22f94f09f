//! Page fetch and post extraction.

mod client;
mod extract;

pub use client::HttpClient;
pub use extract::extract_posts;

use crate::error::Error;
use crate::model::Post;
use scraper::Html;
use tracing::{debug, info, warn};

/// GET the page and parse the whole body into a document. The response is consumed before returning.
pub fn fetch_document(client: &HttpClient, url: &str) -> Result<Html, Error> {
    info!(url, "fetching posts page");
    let response = client.get(url).map_err(|e| Error::Fetch {
        url: url.to_string(),
        source: e,
    })?;
    let status = response.status();
    if status.is_success() {
        debug!(status = status.as_u16(), "response received");
    } else {
        warn!(status = status.as_u16(), url, "non-success status, parsing body anyway");
    }
    let body = response.text().map_err(|e| Error::Fetch {
        url: url.to_string(),
        source: e,
    })?;
    debug!(bytes = body.len(), "read response body");
    Ok(Html::parse_document(&body))
}

/// Fetch the page and extract its posts.
pub fn scrape_posts(client: &HttpClient, url: &str) -> Result<Vec<Post>, Error> {
    let doc = fetch_document(client, url)?;
    let posts = extract_posts(&doc)?;
    info!(count = posts.len(), "posts found");
    Ok(posts)
}
