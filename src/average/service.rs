//! Request handling for the average service

use super::source::{FetchOutcome, NumberKind, NumberSource};
use crate::window::NumberWindow;
use serde::{Serialize, Serializer};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AverageError {
    #[error("Invalid number ID: {0:?}")]
    InvalidNumberId(String),
}

/// What one `/numbers/{id}` request reports back
///
/// Whole values serialize as JSON integers (`2`, not `2.0`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReport {
    #[serde(serialize_with = "whole_numbers")]
    pub window_prev_state: Vec<f64>,
    #[serde(serialize_with = "whole_numbers")]
    pub window_curr_state: Vec<f64>,
    /// Raw fetched candidates, before deduplication
    #[serde(serialize_with = "whole_numbers")]
    pub numbers: Vec<f64>,
    #[serde(serialize_with = "whole_number")]
    pub avg: f64,
}

/// Largest integer an f64 holds exactly (2^53 - 1)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Clone, Copy)]
struct JsonNumber(f64);

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    JsonNumber(*value).serialize(serializer)
}

fn whole_numbers<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().copied().map(JsonNumber))
}

/// Owns the window for the lifetime of the server
pub struct AverageService {
    window: Mutex<NumberWindow>,
    source: Arc<dyn NumberSource>,
}

impl AverageService {
    pub fn new(window: NumberWindow, source: Arc<dyn NumberSource>) -> Self {
        Self {
            window: Mutex::new(window),
            source,
        }
    }

    pub async fn handle(&self, number_id: &str) -> Result<WindowReport, AverageError> {
        let kind = NumberKind::from_id(number_id)
            .ok_or_else(|| AverageError::InvalidNumberId(number_id.to_string()))?;

        let outcome = FetchOutcome::from(self.source.fetch(kind).await);
        if let FetchOutcome::Failed(e) = &outcome {
            log::warn!("⚠️  Fetch for '{}' failed, continuing with no numbers: {}", kind.id(), e);
        }
        let numbers = outcome.into_numbers();

        // prev/curr bracket exactly this ingest; the lock is never held across an await
        let report = {
            let mut window = self.lock_window();
            let window_prev_state = window.snapshot();
            window.ingest(&numbers);

            log::debug!(
                "/numbers/{} -> {} fetched, window {}/{}",
                kind.id(),
                numbers.len(),
                window.len(),
                window.capacity()
            );

            WindowReport {
                window_prev_state,
                window_curr_state: window.snapshot(),
                numbers,
                avg: window.average(),
            }
        };

        Ok(report)
    }

    fn lock_window(&self) -> std::sync::MutexGuard<'_, NumberWindow> {
        // ingest cannot leave the window half-updated, so a poisoned lock is still usable
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
