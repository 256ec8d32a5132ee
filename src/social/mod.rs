//! # Social analytics service
//!
//! Proxies a social media API and answers two questions about it:
//! - `GET /users` - the five users whose posts collected the most comments
//! - `GET /posts?type=popular|latest` - the most commented posts, or the
//!   five newest posts (highest id)
//!
//! Every route sits behind a static bearer token ([`auth::BearerAuth`]).
//! Upstream calls are made one after another; any that fail contribute no
//! data instead of failing the request.

pub mod analytics;
pub mod auth;
pub mod client;
pub mod config;
pub mod server;

pub use analytics::{PostFeed, PostSummary};
pub use auth::{AuthDecision, BearerAuth};
pub use client::{HttpSocialApi, Post, SocialApi};
pub use config::SocialConfig;
pub use server::SocialService;
