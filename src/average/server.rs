//! HTTP routes for the average service

use super::service::{AverageError, AverageService};
use crate::http::{json_response, serve, HttpResponse};
use hyper::body::Incoming;
use hyper::{Method, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn run(listener: TcpListener, service: Arc<AverageService>) {
    serve(listener, move |req| {
        let service = service.clone();
        async move { route(req, service).await }
    })
    .await
}

async fn route(req: Request<Incoming>, service: Arc<AverageService>) -> HttpResponse {
    let (parts, _body) = req.into_parts();
    let path = parts.uri.path();
    log::debug!("{} {}", parts.method, path);

    match (&parts.method, number_id(path)) {
        (&Method::GET, Some(id)) => match service.handle(id).await {
            Ok(report) => json_response(StatusCode::OK, &report),
            Err(AverageError::InvalidNumberId(_)) => {
                json_response(StatusCode::BAD_REQUEST, &json!({ "error": "Invalid number ID" }))
            }
        },
        _ => json_response(StatusCode::NOT_FOUND, &json!({ "error": "Not found" })),
    }
}

/// `/numbers/{id}` -> `id`
fn number_id(path: &str) -> Option<&str> {
    let id = path.strip_prefix("/numbers/")?.trim_end_matches('/');
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}
