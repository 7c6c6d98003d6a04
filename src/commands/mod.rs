//! REST Command Wrappers
//!
//! Frontend bindings to the backend HTTP API, organized by resource.

mod project;
mod task;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::client_config;

// Re-export all public items
pub use project::*;
pub use task::*;

/// Characters left unescaped in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const HTML_RESPONSE_MESSAGE: &str =
    "Invalid API response: received HTML. Check TASKBOARD_API_URL or dev proxy configuration.";

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    /// Got a web page instead of JSON, usually a misconfigured base URL
    #[error("{}", HTML_RESPONSE_MESSAGE)]
    HtmlResponse,

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Worth another attempt on a background fetch
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Server { status, .. } => *status >= 500,
            ApiError::HtmlResponse | ApiError::Decode(_) => false,
        }
    }
}

thread_local! {
    static CLIENT: Client = Client::new();
}

fn client() -> Client {
    CLIENT.with(Client::clone)
}

/// Join the configured base URL with percent-encoded path segments
pub fn endpoint(segments: &[&str]) -> String {
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    let base = resolve_base(&client_config().api_base_url, origin.as_deref());
    join_url(&base, segments)
}

/// The HTTP client needs absolute URLs; a path-only base is served by the
/// page origin (dev proxy)
pub fn resolve_base(base: &str, origin: Option<&str>) -> String {
    match origin {
        Some(origin) if base.starts_with('/') => format!("{}{}", origin.trim_end_matches('/'), base),
        _ => base.to_string(),
    }
}

pub fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }
    url
}

/// `true` when a body is an HTML document rather than API JSON
pub fn looks_like_html(body: &str) -> bool {
    body.trim_start().starts_with('<')
}

/// Pull the human readable message out of an error body
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .or_else(|| value.as_str().map(str::to_string))
}

/// Mutation endpoints answer with a bare message; accept JSON strings or plain text
pub fn message_body(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
}

async fn send(request: RequestBuilder) -> ApiResult<String> {
    let response = request
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if looks_like_html(&body) {
        tracing::error!(url_base = %client_config().api_base_url, "Received HTML from API");
        return Err(ApiError::HtmlResponse);
    }

    if !status.is_success() {
        let message = error_message(&body)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

async fn get_json<T: DeserializeOwned>(url: String) -> ApiResult<T> {
    let body = send(client().get(&url)).await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_message<B: Serialize + ?Sized>(method: Method, url: String, body: Option<&B>) -> ApiResult<String> {
    let mut request = client().request(method, &url);
    if let Some(body) = body {
        request = request.json(body);
    }
    let body = send(request).await?;
    Ok(message_body(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_encodes_segments() {
        assert_eq!(
            join_url("/api/", &["projects", "p 1", "tasks", "a/b"]),
            "/api/projects/p%201/tasks/a%2Fb"
        );
        assert_eq!(join_url("http://localhost:4000", &["projects"]), "http://localhost:4000/projects");
    }

    #[test]
    fn test_relative_base_uses_page_origin() {
        assert_eq!(resolve_base("/api", Some("http://localhost:5173")), "http://localhost:5173/api");
        assert_eq!(resolve_base("https://api.example.com", Some("http://localhost:5173")), "https://api.example.com");
        assert_eq!(resolve_base("/api", None), "/api");
    }

    #[test]
    fn test_html_detection() {
        assert!(looks_like_html("  <!doctype html><html></html>"));
        assert!(!looks_like_html(r#"[{"_id":"p1"}]"#));
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(error_message(r#"{"error":"Task not found"}"#).as_deref(), Some("Task not found"));
        assert_eq!(error_message(r#"{"message":"Invalid id"}"#).as_deref(), Some("Invalid id"));
        assert_eq!(error_message(r#""plain""#).as_deref(), Some("plain"));
        assert_eq!(error_message("Internal Server Error"), None);
    }

    #[test]
    fn test_message_body() {
        assert_eq!(message_body(r#""Project created""#), "Project created");
        assert_eq!(message_body("Task updated\n"), "Task updated");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ApiError::Network("offline".into()).is_retryable());
        assert!(ApiError::Server { status: 503, message: "busy".into() }.is_retryable());
        assert!(!ApiError::Server { status: 404, message: "missing".into() }.is_retryable());
        assert!(!ApiError::HtmlResponse.is_retryable());
    }
}
