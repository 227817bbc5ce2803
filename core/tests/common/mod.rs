// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use conductor::{Args, ConductorError, Handler, Runnable, Value};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

pub type TestHandler = Handler<TestError>;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("{0}")]
  Conductor(String), // Display of the ConductorError, for Eq comparison

  #[error("Test handler failed: {0}")]
  Handler(String),

  #[error("Test check failed: {0}")]
  Check(String),
}

impl From<ConductorError> for TestError {
  fn from(ce: ConductorError) -> Self {
    TestError::Conductor(ce.to_string())
  }
}

// --- Argument helpers ---
pub fn int_arg(args: &Args, idx: usize) -> i64 {
  args.get(idx).and_then(Value::as_i64).unwrap_or_default()
}

pub fn ints(values: &[i64]) -> Args {
  values.iter().copied().map(Value::from).collect()
}

// --- Common Handler Creators ---
pub fn doubling_handler() -> TestHandler {
  Handler::sync(|args| Ok(Value::from(int_arg(&args, 0) * 2)))
}

pub fn increment_handler() -> TestHandler {
  Handler::sync(|args| Ok(Value::from(int_arg(&args, 0) + 1)))
}

pub fn sum_handler() -> TestHandler {
  Handler::sync(|args| {
    let total: i64 = args.iter().filter_map(Value::as_i64).sum();
    Ok(Value::from(total))
  })
}

pub fn async_sum_handler() -> TestHandler {
  Handler::from_async(|args: Args| async move {
    tokio::task::yield_now().await;
    let total: i64 = args.iter().filter_map(Value::as_i64).sum();
    Ok(Value::from(total))
  })
}

/// Returns `output` and bumps `counter` every time it runs.
pub fn counting_handler(counter: Arc<AtomicUsize>, output: Value) -> TestHandler {
  Handler::sync(move |_args| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(output.clone())
  })
}

pub fn failing_handler(error_message: &'static str) -> TestHandler {
  Handler::sync(move |_args| {
    tracing::warn!(target: "test_handlers", "failing with: '{}'", error_message);
    Err(TestError::Handler(error_message.to_string()))
  })
}

pub fn async_failing_handler(error_message: &'static str) -> TestHandler {
  Handler::from_async(move |_args: Args| async move {
    tokio::task::yield_now().await;
    Err(TestError::Handler(error_message.to_string()))
  })
}

/// Echoes its argument list back as one `Value::Array`.
pub fn echo_handler() -> TestHandler {
  Handler::sync(|args| Ok(Value::Array(args)))
}

// --- Runnable objects ---
pub struct SumRunnable;

#[async_trait::async_trait]
impl Runnable<TestError> for SumRunnable {
  async fn run(&self, args: Args) -> Result<Value, TestError> {
    Ok(Value::from(args.iter().filter_map(Value::as_i64).sum::<i64>()))
  }
}

pub struct DelayedProductRunnable {
  pub delay_millis: u64,
}

#[async_trait::async_trait]
impl Runnable<TestError> for DelayedProductRunnable {
  async fn run(&self, args: Args) -> Result<Value, TestError> {
    tokio::time::sleep(std::time::Duration::from_millis(self.delay_millis)).await;
    Ok(Value::from(args.iter().filter_map(Value::as_i64).product::<i64>()))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static MAIN_CHECK_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static MAIN_HANDLER_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static OTHER_CHECK_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static OTHER_HANDLER_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static STEP_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  MAIN_CHECK_COUNTER.store(0, Ordering::SeqCst);
  MAIN_HANDLER_COUNTER.store(0, Ordering::SeqCst);
  OTHER_CHECK_COUNTER.store(0, Ordering::SeqCst);
  OTHER_HANDLER_COUNTER.store(0, Ordering::SeqCst);
  STEP_COUNTER.store(0, Ordering::SeqCst);
}

pub fn count(counter: &Lazy<Arc<AtomicUsize>>) -> usize {
  counter.load(Ordering::SeqCst)
}
