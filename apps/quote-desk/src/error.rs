//! # CLI Error Type
//!
//! Everything that can stop a `quote-desk` invocation once its arguments
//! have parsed. Argument errors are `clap`'s own. Draft save/load failures
//! are not here: the session manager swallows those and the command
//! reports them from `last_error`.

use quote_core::CoreError;
use quote_session::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
