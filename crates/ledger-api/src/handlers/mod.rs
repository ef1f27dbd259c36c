//! Request handlers.

pub mod decrypt_from;
pub mod sign_transaction;

pub use decrypt_from::DecryptFrom;
pub use sign_transaction::SignTransaction;
