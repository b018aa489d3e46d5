#![warn(missing_docs)]
//! Transform sandbox evaluates untrusted JavaScript transformation scripts
//! against JSON input inside fresh, isolated V8 contexts.

pub mod cmd;
pub mod config;
pub mod http_server;
pub mod identity;
pub mod sandbox;
pub mod test_helpers;
