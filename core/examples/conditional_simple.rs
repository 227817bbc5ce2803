// conductor/examples/conditional_simple.rs

use conductor::{Args, ConditionalSpec, ConductorError, Handler, Pipeline, Value};
use tracing::info;

// --- Error Type ---
#[derive(Debug, thiserror::Error)]
enum ParityError {
  #[error("{0} is not an integer")]
  NotAnInteger(Value),

  #[error("Conductor framework error: {0}")]
  Conductor(#[from] ConductorError),
}

fn int_of(args: &Args) -> Result<i64, ParityError> {
  let first = args.first().cloned().unwrap_or_default();
  first.as_i64().ok_or(ParityError::NotAnInteger(first))
}

fn label(text: &'static str) -> Handler<ParityError> {
  Handler::sync(move |args: Args| {
    info!("Branch '{}' selected for {:?}", text, args);
    Ok(Value::from(text))
  })
}

#[tokio::main]
async fn main() -> Result<(), ParityError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Simple Conditional Logic Example ---");

  let is_odd = Handler::<ParityError>::sync(|args: Args| Ok(Value::from(int_of(&args)? % 2 != 0)));
  let is_even = Handler::<ParityError>::sync(|args: Args| Ok(Value::from(int_of(&args)? % 2 == 0)));

  let mut pipeline = Pipeline::<ParityError>::new();
  pipeline.if_(
    ConditionalSpec::when(is_odd, label("odd")),
    [
      ConditionalSpec::when(is_even, label("even")),
      ConditionalSpec::otherwise(label("invalid")),
    ],
  );

  // A second conditional step sees the first one's label as its only argument.
  pipeline.switch(
    ConditionalSpec::when(
      Handler::<ParityError>::sync(|args: Args| Ok(Value::from(args.first().and_then(Value::as_str) == Some("odd")))),
      Handler::<ParityError>::sync(|_args: Args| Ok(Value::from("odd, handled"))),
    ),
    [],
  );

  for n in [3, 4] {
    info!("\n--- Running with {} ---", n);
    let result = pipeline.run(vec![Value::from(n)]).await?;
    info!("Result for {}: {}", n, result);
  }

  assert_eq!(pipeline.run(vec![Value::from(3)]).await?, Value::from("odd, handled"));
  // No switch case matches "even", so the label passes through packed in a list.
  assert_eq!(
    pipeline.run(vec![Value::from(4)]).await?,
    Value::Array(vec![Value::from("even")])
  );

  info!("\n--- Running with a non-integer ---");
  match pipeline.run(vec![Value::from("three")]).await {
    Err(e) => info!("Expected failure: {}", e),
    Ok(v) => panic!("Expected a failure, got {}", v),
  }

  Ok(())
}
