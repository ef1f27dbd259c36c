#![deny(missing_docs)]

//! Ledger node SDK.
//!
//! Re-exports the primitives, transaction and API crates for single-crate usage.

pub use ledger_primitives as primitives;
pub use ledger_transaction as transaction;
pub use ledger_api as api;
