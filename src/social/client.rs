//! Social media API client
//!
//! ## Upstream endpoints
//!
//! - `GET {API_URL}/users` -> `{"users": {"<id>": "<name>", ...}}`
//! - `GET {API_URL}/users/{id}/posts` -> `{"posts": [{"id": 1, ...}, ...]}`
//! - `GET {API_URL}/posts/{id}/comments` -> `{"comments": [...]}`
//!
//! Posts keep every upstream field so they can be echoed back unchanged.
//! A post without an integer `id` is skipped; its siblings are kept.

use crate::upstream::{FetchError, UpstreamClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<Value>,
}

/// Decode each post on its own so one malformed entry does not lose the rest
fn decode_posts(raw: Vec<Value>, user_id: &str) -> Vec<Post> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Post>(value) {
            Ok(post) => Some(post),
            Err(e) => {
                log::warn!("⚠️  Skipping malformed post of user {}: {}", user_id, e);
                None
            }
        })
        .collect()
}

#[async_trait]
pub trait SocialApi: Send + Sync {
    /// All users as id -> name
    async fn users(&self) -> Result<HashMap<String, String>, FetchError>;

    async fn posts(&self, user_id: &str) -> Result<Vec<Post>, FetchError>;

    async fn comments(&self, post_id: i64) -> Result<Vec<Value>, FetchError>;
}

pub struct HttpSocialApi {
    base_url: String,
    client: UpstreamClient,
}

impl HttpSocialApi {
    pub fn new(base_url: impl Into<String>, client: UpstreamClient) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl SocialApi for HttpSocialApi {
    async fn users(&self) -> Result<HashMap<String, String>, FetchError> {
        let url = format!("{}/users", self.base_url);
        let response: UsersResponse = self.client.get_json(&url).await?;
        Ok(response.users)
    }

    async fn posts(&self, user_id: &str) -> Result<Vec<Post>, FetchError> {
        let url = format!("{}/users/{}/posts", self.base_url, user_id);
        let response: PostsResponse = self.client.get_json(&url).await?;
        Ok(decode_posts(response.posts, user_id))
    }

    async fn comments(&self, post_id: i64) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/posts/{}/comments", self.base_url, post_id);
        let response: CommentsResponse = self.client.get_json(&url).await?;
        Ok(response.comments)
    }
}
