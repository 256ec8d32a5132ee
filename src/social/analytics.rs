//! Comment aggregation over the social media API
//!
//! Upstream failures never fail a request: a failed users call yields no
//! users, a failed posts or comments call yields an empty list. Each failure
//! is logged once at warn level.

use super::client::{Post, SocialApi};
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

pub const TOP_USERS_LIMIT: usize = 5;
pub const LATEST_POSTS_LIMIT: usize = 5;

/// A post together with how many comments it has
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    #[serde(flatten)]
    pub post: Post,
    #[serde(rename = "commentsCount")]
    pub comments_count: usize,
}

/// Which post listing `/posts?type=` asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFeed {
    Latest,
    Popular,
}

impl FromStr for PostFeed {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(PostFeed::Latest),
            "popular" => Ok(PostFeed::Popular),
            _ => Err(()),
        }
    }
}

/// `id` as an integer only when it is written canonically ("1", not "01" or "+1")
fn integer_key(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|n| n.to_string() == id)
}

/// Integer ids in numeric order first, then the rest lexicographically
fn compare_user_ids(a: &str, b: &str) -> Ordering {
    match (integer_key(a), integer_key(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Users as (id, name) in a stable order
async fn users(api: &dyn SocialApi) -> Vec<(String, String)> {
    let mut users: Vec<(String, String)> = match api.users().await {
        Ok(users) => users.into_iter().collect(),
        Err(e) => {
            log::warn!("⚠️  Failed to fetch users: {}", e);
            Vec::new()
        }
    };
    users.sort_by(|(a, _), (b, _)| compare_user_ids(a, b));
    users
}

async fn posts(api: &dyn SocialApi, user_id: &str) -> Vec<Post> {
    api.posts(user_id).await.unwrap_or_else(|e| {
        log::warn!("⚠️  Failed to fetch posts for user {}: {}", user_id, e);
        Vec::new()
    })
}

async fn comment_count(api: &dyn SocialApi, post_id: i64) -> usize {
    match api.comments(post_id).await {
        Ok(comments) => comments.len(),
        Err(e) => {
            log::warn!("⚠️  Failed to fetch comments for post {}: {}", post_id, e);
            0
        }
    }
}

/// Names of the `limit` users with the most comments across their posts
///
/// Ties keep user id order.
pub async fn top_users(api: &dyn SocialApi, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for (user_id, name) in users(api).await {
        let mut total = 0;
        for post in posts(api, &user_id).await {
            total += comment_count(api, post.id).await;
        }
        log::debug!("User {} ({}): {} comment(s)", user_id, name, total);
        counts.push((name, total));
    }

    counts.sort_by(|(_, a), (_, b)| b.cmp(a));
    counts.into_iter().take(limit).map(|(name, _)| name).collect()
}

/// Every post of every user with its comment count
pub async fn collect_posts(api: &dyn SocialApi) -> Vec<PostSummary> {
    let mut summaries = Vec::new();

    for (user_id, _) in users(api).await {
        for post in posts(api, &user_id).await {
            let comments_count = comment_count(api, post.id).await;
            summaries.push(PostSummary {
                post,
                comments_count,
            });
        }
    }

    summaries
}

/// All posts sharing the highest comment count
pub fn popular_posts(posts: Vec<PostSummary>) -> Vec<PostSummary> {
    let Some(max) = posts.iter().map(|p| p.comments_count).max() else {
        return Vec::new();
    };
    posts
        .into_iter()
        .filter(|p| p.comments_count == max)
        .collect()
}

/// The `limit` posts with the highest ids
pub fn latest_posts(mut posts: Vec<PostSummary>, limit: usize) -> Vec<PostSummary> {
    posts.sort_by(|a, b| b.post.id.cmp(&a.post.id));
    posts.truncate(limit);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::FetchError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::{Map, Value};
    use std::collections::HashMap;

    /// In-memory API; `None` entries simulate upstream failures
    #[derive(Default)]
    struct FakeApi {
        users: Option<HashMap<String, String>>,
        posts: HashMap<String, Option<Vec<Post>>>,
        comments: HashMap<i64, Option<usize>>,
    }

    impl FakeApi {
        fn user(mut self, id: &str, name: &str, posts: &[(i64, usize)]) -> Self {
            self.users
                .get_or_insert_with(HashMap::new)
                .insert(id.to_string(), name.to_string());
            self.posts.insert(
                id.to_string(),
                Some(posts.iter().map(|(post_id, _)| post(*post_id)).collect()),
            );
            for (post_id, count) in posts {
                self.comments.insert(*post_id, Some(*count));
            }
            self
        }
    }

    fn failure() -> FetchError {
        FetchError::Status(StatusCode::SERVICE_UNAVAILABLE)
    }

    #[async_trait]
    impl SocialApi for FakeApi {
        async fn users(&self) -> Result<HashMap<String, String>, FetchError> {
            self.users.clone().ok_or_else(failure)
        }

        async fn posts(&self, user_id: &str) -> Result<Vec<Post>, FetchError> {
            self.posts.get(user_id).cloned().flatten().ok_or_else(failure)
        }

        async fn comments(&self, post_id: i64) -> Result<Vec<Value>, FetchError> {
            match self.comments.get(&post_id).copied().flatten() {
                Some(n) => Ok(vec![Value::Null; n]),
                None => Err(failure()),
            }
        }
    }

    fn post(id: i64) -> Post {
        let mut fields = Map::new();
        fields.insert("content".to_string(), Value::String(format!("post {}", id)));
        Post { id, fields }
    }

    fn summary(id: i64, comments_count: usize) -> PostSummary {
        PostSummary {
            post: post(id),
            comments_count,
        }
    }

    fn ids(posts: &[PostSummary]) -> Vec<i64> {
        posts.iter().map(|p| p.post.id).collect()
    }

    #[test]
    fn test_post_feed_from_str() {
        assert_eq!("latest".parse::<PostFeed>(), Ok(PostFeed::Latest));
        assert_eq!("popular".parse::<PostFeed>(), Ok(PostFeed::Popular));
        assert!("Latest".parse::<PostFeed>().is_err());
        assert!("".parse::<PostFeed>().is_err());
    }

    #[test]
    fn test_compare_user_ids() {
        let mut ids = vec!["10", "b", "2", "a", "1"];
        ids.sort_by(|a, b| compare_user_ids(a, b));
        assert_eq!(ids, vec!["1", "2", "10", "a", "b"]);

        // non-canonical integers sort with the strings
        let mut ids = vec!["01", "3", "+1", "0", "b"];
        ids.sort_by(|a, b| compare_user_ids(a, b));
        assert_eq!(ids, vec!["0", "3", "+1", "01", "b"]);
    }

    #[tokio::test]
    async fn test_top_users_ranks_by_comment_total() {
        let api = FakeApi::default()
            .user("1", "Ann", &[(10, 1), (11, 1)])
            .user("2", "Bob", &[(20, 5)])
            .user("3", "Cid", &[])
            .user("4", "Dee", &[(40, 3), (41, 0)]);

        let top = top_users(&api, TOP_USERS_LIMIT).await;
        assert_eq!(top, vec!["Bob", "Dee", "Ann", "Cid"]);
    }

    #[tokio::test]
    async fn test_top_users_limit_and_ties() {
        let mut api = FakeApi::default();
        for id in 1..=7 {
            api = api.user(&id.to_string(), &format!("user{}", id), &[(id * 100, 2)]);
        }
        api = api.user("8", "busy", &[(800, 9)]);

        let top = top_users(&api, 5).await;
        assert_eq!(top, vec!["busy", "user1", "user2", "user3", "user4"]);
    }

    #[tokio::test]
    async fn test_users_failure_yields_nothing() {
        let api = FakeApi::default();
        assert!(top_users(&api, 5).await.is_empty());
        assert!(collect_posts(&api).await.is_empty());
    }

    #[tokio::test]
    async fn test_partial_failures_count_as_empty() {
        let mut api = FakeApi::default()
            .user("1", "Ann", &[(10, 4), (11, 2)])
            .user("2", "Bob", &[(20, 3)]);
        // Ann's second post has broken comments, Bob's posts fail entirely
        api.comments.insert(11, None);
        api.posts.insert("2".to_string(), None);

        assert_eq!(top_users(&api, 5).await, vec!["Ann", "Bob"]);

        let posts = collect_posts(&api).await;
        assert_eq!(posts, vec![summary(10, 4), summary(11, 0)]);
    }

    #[tokio::test]
    async fn test_collect_posts_in_user_order() {
        let api = FakeApi::default()
            .user("2", "Bob", &[(21, 1), (20, 0)])
            .user("1", "Ann", &[(10, 2)]);

        let posts = collect_posts(&api).await;
        assert_eq!(ids(&posts), vec![10, 21, 20]);
        assert_eq!(posts[0].comments_count, 2);
    }

    #[test]
    fn test_popular_posts_returns_all_ties() {
        let posts = vec![summary(1, 3), summary(2, 7), summary(3, 1), summary(4, 7)];
        assert_eq!(ids(&popular_posts(posts)), vec![2, 4]);
    }

    #[test]
    fn test_popular_posts_empty() {
        assert!(popular_posts(Vec::new()).is_empty());
    }

    #[test]
    fn test_latest_posts_by_id_desc() {
        let posts = (1..=8).map(|id| summary(id, 0)).collect();
        assert_eq!(ids(&latest_posts(posts, LATEST_POSTS_LIMIT)), vec![8, 7, 6, 5, 4]);

        let few = vec![summary(3, 0), summary(9, 0)];
        assert_eq!(ids(&latest_posts(few, LATEST_POSTS_LIMIT)), vec![9, 3]);
    }

    #[test]
    fn test_summary_serializes_flat() {
        let value = serde_json::to_value(summary(7, 2)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "content": "post 7", "commentsCount": 2})
        );
    }
}
