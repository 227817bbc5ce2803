// conductor/examples/basic_pipeline.rs

use conductor::{Args, ConductorError, Handler, Pipeline, Runnable, Value};
use serde_json::json;
use tracing::info;

// A handler can also be an object with a `run` capability.
struct Halve;

#[async_trait::async_trait]
impl Runnable<ConductorError> for Halve {
  async fn run(&self, args: Args) -> Result<Value, ConductorError> {
    let n = args.first().and_then(Value::as_i64).unwrap_or_default();
    Ok(Value::from(n / 2))
  }
}

fn int_of(args: &Args) -> Result<i64, ConductorError> {
  args
    .first()
    .and_then(Value::as_i64)
    .ok_or_else(|| anyhow::anyhow!("expected an integer argument, got {:?}", args).into())
}

#[tokio::main]
async fn main() -> Result<(), ConductorError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // ConductorError is its own framework error type; handler failures raised
  // through anyhow become ConductorError::HandlerError.
  let mut pipeline = Pipeline::<ConductorError>::new();

  pipeline
    .add(Handler::<ConductorError>::sync(|args: Args| {
      let n = int_of(&args)? + 1;
      info!("Alpha executed: value = {}", n);
      Ok(Value::from(n))
    }))?
    .add(Handler::<ConductorError>::from_async(|args: Args| async move {
      tokio::time::sleep(std::time::Duration::from_millis(5)).await;
      let n = int_of(&args)? * 2;
      info!("Beta executed after a short wait: value = {}", n);
      Ok(Value::from(n))
    }))?
    .add(Handler::<ConductorError>::sync(|args: Args| {
      let n = int_of(&args)? - 1;
      info!("Gamma executed: value = {}", n);
      Ok(Value::from(n))
    }))?;

  info!("Starting pipeline execution...");
  let result = pipeline.run(vec![Value::from(5)]).await?;
  info!("Final value: {}", result);
  // Expected: (5 + 1) * 2 - 1 = 11
  assert_eq!(result, json!(11));

  // Pipelines nest: the inner pipeline receives the outer step's arguments.
  let mut outer = Pipeline::<ConductorError>::new();
  outer.add(pipeline)?.add(Handler::runnable(Halve))?;

  let result = outer.run(vec![Value::from(5)]).await?;
  info!("Nested result: {}", result);
  assert_eq!(result, json!(5));

  // An invalid argument surfaces as a handler error.
  let err = outer.run(vec![Value::from("five")]).await.unwrap_err();
  info!("Expected failure: {}", err);
  assert!(matches!(err, ConductorError::HandlerError { .. }));

  Ok(())
}
