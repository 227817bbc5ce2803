// conductor/src/pipeline/options.rs

//! Explicit configuration of a pipeline's collaborators.

use crate::conditional::composer::ConditionalComposer;
use crate::engine::execution::ExecutionEngine;
use crate::engine::validator::HandlerValidator;
use crate::error::ConductorError;
use std::sync::Arc;

/// The three collaborators a `Pipeline<Err>` delegates to.
///
/// Every field is required by `Pipeline::with_options`; a `None` fails
/// construction with `ConductorError::Configuration`. Use
/// [`PipelineOptions::defaults`] for a consistently wired set.
pub struct PipelineOptions<Err> {
  pub validator: Option<Arc<HandlerValidator<Err>>>,
  pub engine: Option<Arc<ExecutionEngine<Err>>>,
  pub composer: Option<Arc<ConditionalComposer<Err>>>,
}

pub(crate) struct Collaborators<Err> {
  pub(crate) validator: Arc<HandlerValidator<Err>>,
  pub(crate) engine: Arc<ExecutionEngine<Err>>,
  pub(crate) composer: Arc<ConditionalComposer<Err>>,
}

impl<Err> PipelineOptions<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  /// Default detectors, an engine built on that validator and a composer built on that engine.
  pub fn defaults() -> Self {
    Self::with_validator(HandlerValidator::default())
  }

  /// Wires an engine and composer around a custom validator.
  pub fn with_validator(validator: HandlerValidator<Err>) -> Self {
    let collaborators = Collaborators::wire(Arc::new(validator));
    Self {
      validator: Some(collaborators.validator),
      engine: Some(collaborators.engine),
      composer: Some(collaborators.composer),
    }
  }

  pub(crate) fn resolve(self) -> Result<Collaborators<Err>, ConductorError> {
    Ok(Collaborators {
      validator: self.validator.ok_or_else(|| ConductorError::missing_option("validator"))?,
      engine: self.engine.ok_or_else(|| ConductorError::missing_option("engine"))?,
      composer: self.composer.ok_or_else(|| ConductorError::missing_option("composer"))?,
    })
  }
}

impl<Err> Collaborators<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  pub(crate) fn wire(validator: Arc<HandlerValidator<Err>>) -> Self {
    let engine = Arc::new(ExecutionEngine::new(Arc::clone(&validator)));
    let composer = Arc::new(ConditionalComposer::new(Arc::clone(&engine)));
    Self {
      validator,
      engine,
      composer,
    }
  }
}

impl<Err> Default for PipelineOptions<Err> {
  fn default() -> Self {
    Self {
      validator: None,
      engine: None,
      composer: None,
    }
  }
}
