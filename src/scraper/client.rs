//! Blocking HTTP client shared by the page fetch and the chat sink.

use serde::Serialize;
use std::time::Duration;

/// Thin wrapper over a blocking reqwest client. One instance is built per run.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Build with library defaults for headers and redirects. No request timeout: a stalled server blocks the run.
    pub fn new() -> Result<Self, reqwest::Error> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self { inner })
    }

    /// Perform a GET request.
    pub fn get(&self, url: &str) -> Result<reqwest::blocking::Response, reqwest::Error> {
        self.inner.get(url).send()
    }

    /// Perform a POST request with a JSON body.
    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::blocking::Response, reqwest::Error> {
        self.inner.post(url).json(body).send()
    }
}
