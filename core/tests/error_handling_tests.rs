// tests/error_handling_tests.rs
mod common;
use common::*;
use conductor::{
  Args, Candidate, ConditionalComposer, ConditionalSpec, ConductorError, Detector, ExecutionEngine, Handler,
  HandlerValidator, Pipeline, PipelineOptions, Value, INVALID_HANDLER_MESSAGE,
};
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;

#[tokio::test]
#[serial]
async fn test_with_options_requires_every_collaborator() {
  setup_tracing();

  let missing_validator = PipelineOptions::<TestError> {
    validator: None,
    ..PipelineOptions::defaults()
  };
  let missing_engine = PipelineOptions::<TestError> {
    engine: None,
    ..PipelineOptions::defaults()
  };
  let missing_composer = PipelineOptions::<TestError> {
    composer: None,
    ..PipelineOptions::defaults()
  };

  for (options, option_name) in [
    (missing_validator, "validator"),
    (missing_engine, "engine"),
    (missing_composer, "composer"),
  ] {
    match Pipeline::with_options(options, Vec::<TestHandler>::new()) {
      Err(TestError::Conductor(message)) => {
        assert!(message.contains("Configuration error"), "unexpected message: {}", message);
        assert!(message.contains(option_name), "unexpected message: {}", message);
      }
      other => panic!("Expected a configuration error for {}, got {:?}", option_name, other),
    }
  }
}

#[tokio::test]
#[serial]
async fn test_with_options_rejects_empty_options() {
  setup_tracing();
  let result = Pipeline::<ConductorError>::with_options(PipelineOptions::default(), Vec::<Handler<ConductorError>>::new());
  match result {
    Err(ConductorError::Configuration { option, .. }) => assert_eq!(option, "validator"),
    other => panic!("Expected ConductorError::Configuration, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_with_options_uses_supplied_validator() {
  setup_tracing();
  // A validator with no detectors still accepts handlers as usual.
  let options = PipelineOptions::<TestError>::with_validator(HandlerValidator::new(Vec::new()));
  let pipeline = Pipeline::with_options(options, [doubling_handler()]).unwrap();
  assert_eq!(pipeline.len(), 1);
  assert_eq!(pipeline.run(ints(&[2])).await.unwrap(), json!(4));
}

#[tokio::test]
#[serial]
async fn test_run_checks_steps_against_the_engine_validator() {
  setup_tracing();
  // The builder's validator admits everything invocable; the engine's refuses runnables.
  let rejects_runnables: Detector<TestError> = Arc::new(|candidate: &Candidate<TestError>| candidate.is_runnable());
  let engine = Arc::new(ExecutionEngine::new(Arc::new(HandlerValidator::new(vec![rejects_runnables]))));
  let options = || PipelineOptions {
    validator: Some(Arc::new(HandlerValidator::default())),
    engine: Some(Arc::clone(&engine)),
    composer: Some(Arc::new(ConditionalComposer::new(Arc::clone(&engine)))),
  };

  let runnable_step = Pipeline::with_options(options(), [TestHandler::runnable(SumRunnable)]).unwrap();
  assert_eq!(runnable_step.len(), 1);
  assert_eq!(
    runnable_step.run(ints(&[1, 2])).await,
    Err(TestError::Conductor(INVALID_HANDLER_MESSAGE.to_string()))
  );

  let callable_step = Pipeline::with_options(options(), [sum_handler()]).unwrap();
  assert_eq!(callable_step.run(ints(&[1, 2])).await.unwrap(), json!(3));
}

// Test a pipeline whose error type IS ConductorError.
#[tokio::test]
#[serial]
async fn test_pipeline_with_conductor_error_type() {
  setup_tracing();
  let mut pipeline = Pipeline::<ConductorError>::new();
  pipeline
    .add(Handler::<ConductorError>::sync(|args| {
      let n = args.first().and_then(Value::as_i64).ok_or_else(|| anyhow::anyhow!("expected an integer"))?;
      Ok(Value::from(n + 1))
    }))
    .unwrap();

  assert_eq!(pipeline.run(vec![Value::from(1)]).await.unwrap(), json!(2));

  match pipeline.run(vec![Value::from("one")]).await {
    Err(ConductorError::HandlerError { source }) => assert_eq!(source.to_string(), "expected an integer"),
    other => panic!("Expected ConductorError::HandlerError, got {:?}", other),
  }
}

#[test]
fn test_anyhow_wrapped_conductor_error_is_unwrapped() {
  let wrapped = anyhow::Error::new(ConductorError::InvalidHandler);
  assert!(matches!(ConductorError::from(wrapped), ConductorError::InvalidHandler));
}

#[tokio::test]
#[serial]
async fn test_failing_run_returns_exact_error_from_branch() {
  setup_tracing();
  reset_counters();
  let mut pipeline = Pipeline::<TestError>::new();
  pipeline.if_(
    ConditionalSpec::when(
      TestHandler::sync(|_| Ok(Value::from(true))),
      failing_handler("branch failed"),
    ),
    Vec::new(),
  );
  pipeline
    .add(counting_handler(STEP_COUNTER.clone(), Value::Null))
    .unwrap();

  let result = pipeline.run(Vec::new()).await;
  assert_eq!(result, Err(TestError::Handler("branch failed".to_string())));
  assert_eq!(count(&STEP_COUNTER), 0);
}

#[tokio::test]
#[serial]
async fn test_error_from_first_step_preserves_arguments_contract() {
  setup_tracing();
  // The first step sees all arguments even when it then fails.
  let strict = TestHandler::sync(|args: Args| {
    if args.len() == 3 {
      Err(TestError::Handler(format!("got {} args", args.len())))
    } else {
      Ok(Value::Null)
    }
  });
  let pipeline = Pipeline::<TestError>::create_default([strict]).unwrap();
  assert_eq!(
    pipeline.run(ints(&[1, 2, 3])).await,
    Err(TestError::Handler("got 3 args".to_string()))
  );
}
