//! Two small HTTP services sharing one crate:
//!
//! - [`average`]: sliding window of unique numbers from external generators,
//!   built on [`window::NumberWindow`]
//! - [`social`]: top users / posts over a social media API
//!
//! The binaries in `src/bin/` wire configuration, logging and the servers
//! together.

pub mod average;
pub mod config;
pub mod http;
pub mod social;
pub mod upstream;
pub mod window;

pub use window::NumberWindow;
