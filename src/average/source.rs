//! Number generators
//!
//! Each [`NumberKind`] maps to one upstream path. The HTTP source accepts any
//! JSON numbers under `numbers` and drops everything else, so the window
//! only ever sees well-formed values.

use crate::upstream::{FetchError, UpstreamClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Primes,
    Fibonacci,
    Even,
    Random,
}

impl NumberKind {
    /// Resolve the single-letter id used in `/numbers/{id}`
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "p" => Some(NumberKind::Primes),
            "f" => Some(NumberKind::Fibonacci),
            "e" => Some(NumberKind::Even),
            "r" => Some(NumberKind::Random),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            NumberKind::Primes => "p",
            NumberKind::Fibonacci => "f",
            NumberKind::Even => "e",
            NumberKind::Random => "r",
        }
    }

    /// Path of the generator relative to the numbers API base URL
    pub fn path(&self) -> &'static str {
        match self {
            NumberKind::Primes => "/primes",
            NumberKind::Fibonacci => "/fibo",
            NumberKind::Even => "/even",
            NumberKind::Random => "/rand",
        }
    }

    pub fn all() -> [NumberKind; 4] {
        [
            NumberKind::Primes,
            NumberKind::Fibonacci,
            NumberKind::Even,
            NumberKind::Random,
        ]
    }
}

#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch(&self, kind: NumberKind) -> Result<Vec<f64>, FetchError>;
}

/// Result of asking a generator for numbers
///
/// A failed fetch counts as zero candidates.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<f64>),
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn into_numbers(self) -> Vec<f64> {
        match self {
            FetchOutcome::Fetched(numbers) => numbers,
            FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

impl From<Result<Vec<f64>, FetchError>> for FetchOutcome {
    fn from(result: Result<Vec<f64>, FetchError>) -> Self {
        match result {
            Ok(numbers) => FetchOutcome::Fetched(numbers),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NumbersResponse {
    #[serde(default)]
    numbers: Vec<Value>,
}

/// Keep the JSON numbers, drop anything else
fn numeric_values(raw: Vec<Value>) -> Vec<f64> {
    let total = raw.len();
    let numbers: Vec<f64> = raw.iter().filter_map(Value::as_f64).collect();

    if numbers.len() < total {
        log::warn!(
            "⚠️  Dropped {} non-numeric value(s) from generator response",
            total - numbers.len()
        );
    }

    numbers
}

/// Fetches numbers over HTTP from `{base_url}{kind.path()}`
pub struct HttpNumberSource {
    base_url: String,
    client: UpstreamClient,
}

impl HttpNumberSource {
    pub fn new(base_url: impl Into<String>, client: UpstreamClient) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn url_for(&self, kind: NumberKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    async fn fetch(&self, kind: NumberKind) -> Result<Vec<f64>, FetchError> {
        let url = self.url_for(kind);
        let response: NumbersResponse = self.client.get_json(&url).await?;
        let numbers = numeric_values(response.numbers);

        log::debug!("Fetched {} number(s) from {}", numbers.len(), url);
        Ok(numbers)
    }
}
