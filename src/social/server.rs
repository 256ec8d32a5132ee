//! HTTP routes for the social service

use super::analytics::{
    collect_posts, latest_posts, popular_posts, top_users, PostFeed, LATEST_POSTS_LIMIT,
    TOP_USERS_LIMIT,
};
use super::auth::{AuthDecision, BearerAuth};
use super::client::SocialApi;
use crate::http::{json_response, query_param, serve, HttpResponse};
use hyper::body::Incoming;
use hyper::header::AUTHORIZATION;
use hyper::{Method, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Everything a request handler needs
pub struct SocialService {
    pub api: Arc<dyn SocialApi>,
    pub auth: BearerAuth,
}

pub async fn run(listener: TcpListener, service: Arc<SocialService>) {
    serve(listener, move |req| {
        let service = service.clone();
        async move { route(req, service).await }
    })
    .await
}

/// Routes that exist; anything else is a 404 without an auth check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Users,
    Posts,
}

impl Route {
    fn resolve(method: &Method, path: &str) -> Option<Self> {
        match (method, path) {
            (&Method::GET, "/users") => Some(Route::Users),
            (&Method::GET, "/posts") => Some(Route::Posts),
            _ => None,
        }
    }
}

async fn route(req: Request<Incoming>, service: Arc<SocialService>) -> HttpResponse {
    let (parts, _body) = req.into_parts();
    log::debug!("{} {}", parts.method, parts.uri);

    let Some(route) = Route::resolve(&parts.method, parts.uri.path()) else {
        return json_response(StatusCode::NOT_FOUND, &json!({ "message": "Not found" }));
    };

    let authorization = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match service.auth.check(authorization) {
        AuthDecision::Granted => {}
        AuthDecision::MissingToken => {
            return json_response(
                StatusCode::UNAUTHORIZED,
                &json!({ "message": "Unauthorized: No token provided" }),
            );
        }
        AuthDecision::InvalidToken => {
            return json_response(
                StatusCode::FORBIDDEN,
                &json!({ "message": "Forbidden: Invalid token" }),
            );
        }
    }

    let api = service.api.as_ref();
    match route {
        Route::Users => {
            let top = top_users(api, TOP_USERS_LIMIT).await;
            json_response(StatusCode::OK, &json!({ "topUsers": top }))
        }
        Route::Posts => {
            let feed = query_param(parts.uri.query(), "type").and_then(|t| t.parse::<PostFeed>().ok());
            match feed {
                Some(PostFeed::Popular) => {
                    let posts = popular_posts(collect_posts(api).await);
                    json_response(StatusCode::OK, &json!({ "popularPosts": posts }))
                }
                Some(PostFeed::Latest) => {
                    let posts = latest_posts(collect_posts(api).await, LATEST_POSTS_LIMIT);
                    json_response(StatusCode::OK, &json!({ "latestPosts": posts }))
                }
                None => json_response(
                    StatusCode::BAD_REQUEST,
                    &json!({
                        "message": "Invalid query parameter type. Use \"latest\" or \"popular\"."
                    }),
                ),
            }
        }
    }
}
