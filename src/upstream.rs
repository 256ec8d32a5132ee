//! Upstream HTTP calls shared by both services
//!
//! Every upstream endpoint used here is a bearer-authenticated JSON GET with
//! a hard time budget. Callers decide what a failure means; nothing in this
//! module retries.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
    #[error("upstream returned status {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Thin wrapper around a `reqwest::Client` with a fixed timeout and token
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    token: Option<String>,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token,
            timeout,
        })
    }

    /// GET `url` and decode the JSON body into `T`
    ///
    /// Non-2xx responses are errors; the body is not inspected.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json::<T>().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(err)
        }
    }
}
