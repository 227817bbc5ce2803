// conductor/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Message carried by every rejected handler candidate.
pub const INVALID_HANDLER_MESSAGE: &str = "The provided handler is not acceptable as a valid handler. Handler must be either a function or an instance of object that implements Runnable.";

/// Framework-level failures raised by conductor itself.
///
/// Failures produced by user handlers are NOT wrapped in this type: a
/// `Pipeline<Err>` returns the handler's own `Err` unchanged. `ConductorError`
/// only reaches the caller through `Err: From<ConductorError>`.
#[derive(Debug, Error)]
pub enum ConductorError {
  /// A required collaborator was not supplied to the explicit-configuration constructor.
  #[error("Configuration error for option '{option}': {message}")]
  Configuration { option: String, message: String },

  /// A candidate was rejected by the validator, at build time or before invocation.
  #[error("{}", INVALID_HANDLER_MESSAGE)]
  InvalidHandler,

  /// Catch-all for pipelines whose error type is `ConductorError` itself.
  #[error("Error in user-provided handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl ConductorError {
  pub(crate) fn missing_option(option: &str) -> Self {
    ConductorError::Configuration {
      option: option.to_string(),
      message: format!("options.{} must be supplied.", option),
    }
  }
}

impl From<AnyhowError> for ConductorError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a ConductorError that travelled through anyhow instead of nesting it.
    match err.downcast::<ConductorError>() {
      Ok(inner) => inner,
      Err(source) => ConductorError::HandlerError { source },
    }
  }
}

pub type ConductorResult<T, E = ConductorError> = std::result::Result<T, E>;
