use crate::response::ApiResponse;

/// Error types for API setup: configuration loading and logging.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

/// A request parameter was missing or unusable.
///
/// Carries the response to send back; the dispatcher returns it verbatim.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("parameter error: {}", .0.error_description().unwrap_or_default())]
pub struct ParameterError(pub ApiResponse);

impl ParameterError {
    /// The response describing the failure.
    pub fn into_response(self) -> ApiResponse {
        self.0
    }
}

impl From<ApiResponse> for ParameterError {
    fn from(response: ApiResponse) -> Self {
        ParameterError(response)
    }
}
