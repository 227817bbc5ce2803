// conductor/src/engine/execution.rs

//! Contains the `ExecutionEngine`, which invokes any handler uniformly and
//! always hands back a future, whether the handler was sync, async, or a
//! nested pipeline.

use crate::core::handler::{Candidate, Handler};
use crate::core::value::{Args, Value};
use crate::engine::validator::HandlerValidator;
use crate::error::ConductorError;
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

pub struct ExecutionEngine<Err> {
  validator: Arc<HandlerValidator<Err>>,
}

impl<Err> ExecutionEngine<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  pub fn new(validator: Arc<HandlerValidator<Err>>) -> Self {
    Self { validator }
  }

  /// Validates `candidate` and invokes it with exactly `args`.
  ///
  /// Validation failures reach the caller as `Err::from(ConductorError::InvalidHandler)`.
  /// Failures produced by the handler itself are returned unmodified.
  pub async fn execute(&self, candidate: &Candidate<Err>, args: Args) -> Result<Value, Err> {
    self.validator.validate(candidate).map_err(Err::from)?;
    // A custom detector set may pass plain data, which still has nothing to invoke.
    let Candidate::Handler(handler) = candidate else {
      return Err(Err::from(ConductorError::InvalidHandler));
    };
    event!(Level::TRACE, "Handler is valid.");
    self.invoke(handler, args).await
  }

  /// Invokes an already admitted handler with exactly `args`.
  pub async fn invoke(&self, handler: &Handler<Err>, args: Args) -> Result<Value, Err> {
    event!(
      Level::TRACE,
      handler_kind = handler.kind(),
      num_args = args.len(),
      "Executing target handler."
    );
    handler.call(args).await
  }
}

impl<Err> fmt::Debug for ExecutionEngine<Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ExecutionEngine")
      .field("validator", &self.validator)
      .finish()
  }
}
