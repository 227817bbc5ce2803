// conductor/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, which threads each step's result into
//! the next, and the `Runnable` impl that lets pipelines nest.

use crate::core::handler::{Candidate, Runnable};
use crate::core::value::{Args, Value};
use crate::error::ConductorError;
use crate::pipeline::definition::Pipeline;
use async_trait::async_trait;
use tracing::{event, instrument, span, Instrument, Level};

impl<Err> Pipeline<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  /// Runs every step once, left to right.
  ///
  /// The first step receives all of `args`. Every later step receives exactly
  /// one argument: the previous step's whole result, never spread, even when it
  /// is a `Value::Array`. An empty pipeline returns `args` unchanged as a
  /// `Value::Array`.
  ///
  /// The first failing step aborts the run and its error is returned as is.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_error_type = %std::any::type_name::<Err>(),
      num_steps = self.steps.len(),
      num_args = args.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, args: Args) -> Result<Value, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    let mut steps = self.steps.iter().enumerate();
    let Some((_, first_step)) = steps.next() else {
      event!(Level::DEBUG, "Pipeline has no steps, returning the arguments unchanged.");
      return Ok(Value::Array(args));
    };

    let mut result = self.run_step(0, first_step, args).await?;
    for (step_index, step) in steps {
      result = self.run_step(step_index, step, vec![result]).await?;
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(result)
  }

  async fn run_step(&self, step_index: usize, step: &Candidate<Err>, args: Args) -> Result<Value, Err> {
    let step_span = span!(
      Level::DEBUG,
      "pipeline_step_execution",
      step_index,
      num_args = args.len()
    );

    match self.engine.execute(step, args).instrument(step_span).await {
      Ok(value) => {
        event!(Level::TRACE, step_index, "Step finished.");
        Ok(value)
      }
      Err(e) => {
        event!(Level::ERROR, step_index, error = %e, "Step failed.");
        Err(e)
      }
    }
  }
}

#[async_trait]
impl<Err> Runnable<Err> for Pipeline<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  async fn run(&self, args: Args) -> Result<Value, Err> {
    Pipeline::run(self, args).await
  }
}
