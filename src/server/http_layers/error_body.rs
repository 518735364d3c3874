//! Renders the JSON body of every error response.

use crate::server::api_error::ErrorReport;
use axum::{
    body::Body,
    extract::Request,
    http::{header, response::Parts, HeaderValue, Response, StatusCode, Uri},
    middleware::Next,
};
use serde::Serialize;
use tracing::{debug, error};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub timestamp: String,
    pub path: String,
    pub message: Vec<String>,
}

pub(super) fn request_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Builds a standalone error response carrying the uniform body.
pub(super) fn error_response(status: StatusCode, path: String, messages: Vec<String>) -> Response<Body> {
    let (mut parts, _) = Response::new(Body::empty()).into_parts();
    parts.status = status;
    with_error_body(parts, path, messages)
}

fn with_error_body(mut parts: Parts, path: String, messages: Vec<String>) -> Response<Body> {
    let body = ErrorBody {
        status_code: parts.status.as_u16(),
        timestamp: chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string(),
        path,
        message: messages,
    };
    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Failed to serialize error body: {}", err);
            Vec::new()
        }
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(bytes))
}

pub async fn render_error_body(request: Request, next: Next) -> Response<Body> {
    let method = request.method().clone();
    let path = request_path(request.uri());

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let report = parts.extensions.remove::<ErrorReport>();
    let messages = match &report {
        Some(report) => report.messages.clone(),
        None if status.as_u16() == 404 => vec![format!("Cannot {} {}", method, path)],
        None => vec![status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()],
    };

    if status.is_server_error() {
        let detail = report
            .as_ref()
            .and_then(|r| r.internal.clone())
            .unwrap_or_else(|| messages.join(", "));
        error!("{} {} - Status: {} - {}", method, path, status.as_u16(), detail);
    } else {
        debug!(
            "{} {} - Status: {} - Message: {}",
            method,
            path,
            status.as_u16(),
            messages.join(", ")
        );
    }

    with_error_body(parts, path, messages)
}
