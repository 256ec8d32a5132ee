//! # Average service
//!
//! Serves `GET /numbers/{id}` where `id` picks one of the number generators
//! (`p`rimes, `f`ibonacci, `e`ven, `r`andom). Each request:
//! 1. Fetches candidate numbers from the generator (bounded time budget)
//! 2. Feeds them into the shared [`NumberWindow`](crate::window::NumberWindow)
//! 3. Reports the window before and after, the raw numbers and the average
//!
//! A failed or slow generator is not an error for the client: the request
//! proceeds with zero candidates.

pub mod config;
pub mod server;
pub mod service;
pub mod source;

pub use config::AverageConfig;
pub use service::{AverageError, AverageService, WindowReport};
pub use source::{FetchOutcome, HttpNumberSource, NumberKind, NumberSource};
