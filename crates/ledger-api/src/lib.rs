//! Ledger node API - request handlers for message decryption and
//! transaction signing.
//!
//! Requests arrive as string parameters, are routed by `requestType` to an
//! [`ApiRequestHandler`], and always produce an [`ApiResponse`]: either a
//! success payload or `{errorCode, errorDescription, error?}`.

pub mod account;
pub mod config;
pub mod crypto;
pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod logging;
pub mod parameter_parser;
pub mod request;
pub mod response;

mod error;
pub use error::{ApiError, ParameterError};

pub use account::{Account, AccountIndex, AccountResolver};
pub use config::{ApiConfig, LogConfig, LogFormat};
pub use crypto::{CryptoProvider, Secp256k1Crypto};
pub use dispatcher::ApiDispatcher;
pub use handler::{ApiRequestHandler, ApiTag};
pub use request::ApiRequest;
pub use response::ApiResponse;
