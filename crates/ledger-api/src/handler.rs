//! The request handler abstraction served by the dispatcher.

use std::fmt;

use crate::error::ParameterError;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Groups handlers for listing and documentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiTag {
    Messages,
    Transactions,
}

impl ApiTag {
    pub fn display_name(&self) -> &'static str {
        match self {
            ApiTag::Messages => "Messages",
            ApiTag::Transactions => "Transactions",
        }
    }
}

impl fmt::Display for ApiTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One API operation, selected by its `requestType`.
///
/// Implementations hold no per-request state and are shared across
/// threads behind an `Arc`.
pub trait ApiRequestHandler: Send + Sync {
    /// Value of `requestType` that selects this handler.
    fn request_type(&self) -> &'static str;

    fn tags(&self) -> &'static [ApiTag];

    /// Names of the parameters this handler reads.
    fn parameters(&self) -> &'static [&'static str];

    /// Run the operation.
    ///
    /// # Returns
    /// The response to send, which may itself describe a failure, or a
    /// `ParameterError` when a parameter could not be read.
    fn process_request(&self, req: &ApiRequest) -> Result<ApiResponse, ParameterError>;
}
