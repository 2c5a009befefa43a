//! Reqwest-backed text-generation adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout and
//! HTTP error mapping, and decoding the first candidate's text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{GenerateRequestDto, GenerateResponseDto, GenerationConfigDto};
use crate::domain::ports::{MotivationSource, MotivationSourceError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Errors raised while building [`MotivationHttpSource`].
#[derive(Debug, thiserror::Error)]
pub enum MotivationHttpSourceError {
    /// The configured endpoint and model do not form a valid URL.
    #[error("invalid motivation endpoint {endpoint}: {source}")]
    Endpoint {
        /// Rejected URL text.
        endpoint: String,
        /// Parser diagnostics.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build motivation HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Settings for [`MotivationHttpSource`].
#[derive(Debug, Clone)]
pub struct MotivationHttpConfig {
    /// Base URL of the generation API, e.g. `https://host/v1beta`.
    pub endpoint: String,
    /// Model name appended as `/models/{model}:generateContent`.
    pub model: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Text-generation adapter performing one POST per prompt.
pub struct MotivationHttpSource {
    client: Client,
    url: Url,
    api_key: String,
    generation: GenerationConfigDto,
}

impl MotivationHttpSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint is not a valid URL or the reqwest
    /// client cannot be constructed.
    pub fn new(config: MotivationHttpConfig) -> Result<Self, MotivationHttpSourceError> {
        let url = generate_content_url(&config.endpoint, &config.model)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url,
            api_key: config.api_key,
            generation: GenerationConfigDto::default(),
        })
    }
}

fn generate_content_url(endpoint: &str, model: &str) -> Result<Url, MotivationHttpSourceError> {
    let raw = format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model.trim()
    );
    Url::parse(&raw).map_err(|source| MotivationHttpSourceError::Endpoint {
        endpoint: raw,
        source,
    })
}

#[async_trait]
impl MotivationSource for MotivationHttpSource {
    async fn generate(&self, prompt: &str) -> Result<String, MotivationSourceError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateRequestDto::new(prompt, self.generation))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_text(body.as_ref())
    }
}

fn parse_text(body: &[u8]) -> Result<String, MotivationSourceError> {
    let decoded: GenerateResponseDto = serde_json::from_slice(body).map_err(|error| {
        MotivationSourceError::decode(format!("invalid generateContent payload: {error}"))
    })?;
    decoded
        .into_text()
        .ok_or_else(MotivationSourceError::empty_reply)
}

fn map_transport_error(error: reqwest::Error) -> MotivationSourceError {
    if error.is_timeout() {
        MotivationSourceError::timeout(error.to_string())
    } else {
        MotivationSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MotivationSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => MotivationSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            MotivationSourceError::timeout(message)
        }
        _ if status.is_client_error() => MotivationSourceError::rejected(message),
        _ => MotivationSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.example.test/v1beta", "gemini-2.5-flash")]
    #[case("https://api.example.test/v1beta/", " gemini-2.5-flash ")]
    fn builds_generate_content_url(#[case] endpoint: &str, #[case] model: &str) {
        let url = generate_content_url(endpoint, model).expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://api.example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[rstest]
    fn rejects_relative_endpoint() {
        let error = generate_content_url("not a url", "model").expect_err("must fail");
        assert!(matches!(error, MotivationHttpSourceError::Endpoint { .. }));
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "RateLimited")]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "Timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::bad_key(StatusCode::FORBIDDEN, "Rejected")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    fn maps_http_statuses_to_source_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"{\"error\":{\"message\":\"nope\"}}");
        let matched = match expected {
            "RateLimited" => matches!(error, MotivationSourceError::RateLimited { .. }),
            "Timeout" => matches!(error, MotivationSourceError::Timeout { .. }),
            "Rejected" => matches!(error, MotivationSourceError::Rejected { .. }),
            "Transport" => matches!(error, MotivationSourceError::Transport { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} should map to {expected}, got {error:?}");
    }

    #[rstest]
    fn status_message_includes_compacted_body() {
        let error = map_status_error(StatusCode::BAD_REQUEST, b"bad\n   request");
        assert!(error.to_string().contains("status 400: bad request"));
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let preview = body_preview("x".repeat(400).as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }

    #[rstest]
    fn decodes_candidate_text() {
        let body = br#"{"candidates":[{"content":{"parts":[{"text":"Keep going, Hussein!"}]}}]}"#;
        assert_eq!(
            parse_text(body).expect("text"),
            "Keep going, Hussein!".to_owned()
        );
    }

    #[rstest]
    #[case::blank(br#"{"candidates":[]}"#.as_slice(), "EmptyReply")]
    #[case::garbage(b"<html>".as_slice(), "Decode")]
    fn undecodable_or_empty_bodies_fail(#[case] body: &[u8], #[case] expected: &str) {
        let error = parse_text(body).expect_err("must fail");
        let matched = match expected {
            "EmptyReply" => matches!(error, MotivationSourceError::EmptyReply),
            "Decode" => matches!(error, MotivationSourceError::Decode { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "expected {expected}, got {error:?}");
    }
}
