//! Ledger transaction model, wire codec, validation and signing.
//!
//! Provides the `Transaction` type with its message appendix, the binary and
//! JSON representations accepted by the node API, and the checks applied
//! before a transaction may be signed.

pub mod appendix;
pub mod constants;
pub mod json;
pub mod transaction;

mod error;
pub use appendix::Message;
pub use error::TransactionError;
pub use json::TransactionJson;
pub use transaction::{Transaction, TransactionType};

#[cfg(test)]
mod tests;
