//! Driven port for the hosted text-generation service.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while requesting generated text.
    pub enum MotivationSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "motivation transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "motivation request timed out: {message}",
        /// The service rate-limited the request.
        RateLimited { message: String } =>
            "motivation service rate limited request: {message}",
        /// The service refused the request, e.g. a bad API key.
        Rejected { message: String } =>
            "motivation service rejected request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "motivation response decode failed: {message}",
        /// The response carried no text.
        EmptyReply =>
            "motivation service returned no text",
    }
}

/// Port for producing one short free-text reply to a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MotivationSource: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, MotivationSourceError>;
}
