//! Subcommands of the `transform-sandbox` binary.

pub mod run;
pub mod serve;

pub use run::RunArgs;
pub use serve::ServeArgs;
