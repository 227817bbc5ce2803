// conductor/src/pipeline/definition.rs

//! Contains the `Pipeline<Err>` struct definition and its building methods.

use crate::conditional::composer::ConditionalComposer;
use crate::conditional::spec::ConditionalSpec;
use crate::core::handler::{Candidate, Handler};
use crate::engine::execution::ExecutionEngine;
use crate::engine::validator::HandlerValidator;
use crate::error::ConductorError;
use crate::pipeline::options::{Collaborators, PipelineOptions};
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// An ordered, append-only list of steps run one after another.
///
/// `Err` is the error type handlers return. It must be `From<ConductorError>`
/// so framework failures (invalid handlers, bad configuration) can be reported
/// through it; handler failures themselves are passed through untouched.
///
/// Building requires `&mut self` and running only `&self`, so a pipeline that
/// has been shared (e.g. behind an `Arc`) can be run concurrently but no longer
/// grown.
pub struct Pipeline<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  /// Admitted steps in insertion order. The engine re-validates each one on every run.
  pub(crate) steps: Vec<Candidate<Err>>,

  pub(crate) validator: Arc<HandlerValidator<Err>>,
  pub(crate) engine: Arc<ExecutionEngine<Err>>,
  pub(crate) composer: Arc<ConditionalComposer<Err>>,
}

impl<Err> Pipeline<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  /// Creates an empty pipeline wired with the default collaborators.
  pub fn new() -> Self {
    Self::from_collaborators(Collaborators::wire(Arc::new(HandlerValidator::default())))
  }

  fn from_collaborators(collaborators: Collaborators<Err>) -> Self {
    Self {
      steps: Vec::new(),
      validator: collaborators.validator,
      engine: collaborators.engine,
      composer: collaborators.composer,
    }
  }

  /// Default collaborators, seeded with `handlers`.
  pub fn create_default<I, C>(handlers: I) -> Result<Self, Err>
  where
    I: IntoIterator<Item = C>,
    C: Into<Candidate<Err>>,
  {
    let mut pipeline = Self::new();
    pipeline.add_all(handlers)?;
    Ok(pipeline)
  }

  /// Explicit configuration. Fails with `ConductorError::Configuration` when a
  /// collaborator is missing, and with `ConductorError::InvalidHandler` when a
  /// seed handler is rejected.
  pub fn with_options<I, C>(options: PipelineOptions<Err>, handlers: I) -> Result<Self, Err>
  where
    I: IntoIterator<Item = C>,
    C: Into<Candidate<Err>>,
  {
    event!(Level::DEBUG, "Creating a new pipeline from explicit options.");
    let collaborators = options.resolve().map_err(|e| {
      event!(Level::ERROR, error = %e, "Pipeline configuration rejected.");
      Err::from(e)
    })?;

    let mut pipeline = Self::from_collaborators(collaborators);
    pipeline.add_all(handlers)?;
    Ok(pipeline)
  }

  /// Validates and appends one handler.
  pub fn add(&mut self, handler: impl Into<Candidate<Err>>) -> Result<&mut Self, Err> {
    self.add_all(std::iter::once(handler))
  }

  /// Validates every handler, then appends them in order.
  ///
  /// All-or-nothing: if any candidate is rejected, no step is appended.
  pub fn add_all<I, C>(&mut self, handlers: I) -> Result<&mut Self, Err>
  where
    I: IntoIterator<Item = C>,
    C: Into<Candidate<Err>>,
  {
    let admitted = handlers
      .into_iter()
      .map(|candidate| self.validator.admit(candidate.into()))
      .collect::<Result<Vec<_>, _>>()
      .map_err(|e| {
        event!(Level::DEBUG, error = %e, "Handler batch rejected, nothing appended.");
        Err::from(e)
      })?;

    event!(Level::DEBUG, num_handlers = admitted.len(), "Adding handlers to the pipeline.");
    self.steps.extend(admitted.into_iter().map(Candidate::Handler));
    Ok(self)
  }

  /// Appends one conditional step built from `main_spec` and `other_specs`.
  ///
  /// See [`ConditionalComposer::compose`] for the evaluation rules. Named with a
  /// trailing underscore because `if` is a keyword; [`Pipeline::switch`] is an alias.
  pub fn if_(
    &mut self,
    main_spec: ConditionalSpec<Err>,
    other_specs: impl IntoIterator<Item = ConditionalSpec<Err>>,
  ) -> &mut Self {
    let other_specs: Vec<_> = other_specs.into_iter().collect();
    event!(Level::DEBUG, num_blocks = other_specs.len() + 1, "Adding if statement.");
    let step = self.composer.compose(main_spec, other_specs);
    self.steps.push(Candidate::Handler(step));
    self
  }

  /// Behaves exactly like [`Pipeline::if_`].
  pub fn switch(
    &mut self,
    main_case: ConditionalSpec<Err>,
    other_cases: impl IntoIterator<Item = ConditionalSpec<Err>>,
  ) -> &mut Self {
    let other_cases: Vec<_> = other_cases.into_iter().collect();
    event!(Level::DEBUG, num_cases = other_cases.len() + 1, "Adding switch.");
    let step = self.composer.compose(main_case, other_cases);
    self.steps.push(Candidate::Handler(step));
    self
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

impl<Err> Default for Pipeline<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<Err> From<Pipeline<Err>> for Candidate<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  fn from(pipeline: Pipeline<Err>) -> Self {
    Candidate::Handler(Handler::pipeline(pipeline))
  }
}

impl<Err> fmt::Debug for Pipeline<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("num_steps", &self.steps.len())
      .field("validator", &self.validator)
      .finish()
  }
}
