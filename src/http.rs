use reqwest::Client;
use serde_json::{Map, Value};
use std::fmt;

use crate::error::NotifyError;

/// Thin wrapper around one `reqwest::Client`. No retry; callers wanting
/// bounded latency beyond the 15 s request timeout wrap the future.
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, NotifyError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self { http })
    }

    /// POST a pre-serialized JSON body and capture whatever comes back.
    /// Any HTTP status is a successful round-trip here; only transport
    /// failures are errors.
    pub async fn post(&self, url: &str, json_body: &str) -> Result<HttpResponse, NotifyError> {
        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(json_body.to_string())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        // Lenient: a non-JSON body becomes an empty map.
        let json_response = serde_json::from_str::<Map<String, Value>>(&body).unwrap_or_default();

        Ok(HttpResponse {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or("").to_string(),
            json_response,
        })
    }
}

/// A client-side view of one HTTP response, logged then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_message: String,
    pub json_response: Map<String, Value>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code, self.status_message)
    }
}
