// conductor/src/conditional/composer.rs

//! Compiles a branch group into one `Handler<Err>`.

use crate::conditional::spec::ConditionalSpec;
use crate::core::handler::{Handler, HandlerFuture};
use crate::core::value::{is_truthy, Args, Value};
use crate::engine::execution::ExecutionEngine;
use crate::error::ConductorError;
use std::fmt;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub struct ConditionalComposer<Err> {
  engine: Arc<ExecutionEngine<Err>>,
}

impl<Err> ConditionalComposer<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  pub fn new(engine: Arc<ExecutionEngine<Err>>) -> Self {
    Self { engine }
  }

  /// Builds one step out of `main_spec` followed by `other_specs`.
  ///
  /// At run time the specs are evaluated in declaration order against the
  /// step's incoming arguments. The first spec whose check resolves truthy, or
  /// which has no check, runs its handler with those same arguments and its
  /// result becomes the step's output. No later spec is touched. When nothing
  /// matches, the incoming arguments are returned unchanged as a `Value::Array`.
  #[instrument(
    name = "ConditionalComposer::compose",
    skip_all,
    fields(num_blocks = 1 + other_specs.len())
  )]
  pub fn compose(&self, main_spec: ConditionalSpec<Err>, other_specs: Vec<ConditionalSpec<Err>>) -> Handler<Err> {
    let mut specs = Vec::with_capacity(1 + other_specs.len());
    specs.push(main_spec);
    specs.extend(other_specs);
    let specs = Arc::new(specs);
    let engine = Arc::clone(&self.engine);

    event!(Level::DEBUG, "Creating conditional handler.");

    Handler::Callable(Arc::new(move |args: Args| -> HandlerFuture<Err> {
      let engine = Arc::clone(&engine);
      let specs = Arc::clone(&specs);
      Box::pin(async move { evaluate_branches(&engine, &specs, args).await })
    }))
  }
}

async fn evaluate_branches<Err>(
  engine: &ExecutionEngine<Err>,
  specs: &[ConditionalSpec<Err>],
  args: Args,
) -> Result<Value, Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  event!(Level::DEBUG, num_blocks = specs.len(), "Running conditional handler.");

  for (block_index, spec) in specs.iter().enumerate() {
    let is_default_block = spec.is_fallback();
    let matched = if is_default_block {
      true
    } else {
      is_truthy(&engine.execute(&spec.check, args.clone()).await?)
    };
    event!(Level::DEBUG, block_index, is_default_block, matched, "Conditional block evaluated.");

    if matched {
      return engine.execute(&spec.handler, args).await;
    }
  }

  event!(Level::DEBUG, "No conditional block matched, passing arguments through.");
  Ok(Value::Array(args))
}

impl<Err> fmt::Debug for ConditionalComposer<Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConditionalComposer")
      .field("engine", &self.engine)
      .finish()
  }
}
