// conductor/src/core/handler.rs

//! Defines the `Handler<Err>` sum type for pipeline steps and the `Candidate<Err>`
//! wrapper for values offered as handlers before validation.

use crate::core::value::{self, Args, Value};
use crate::error::ConductorError;
use crate::pipeline::definition::Pipeline;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The future every handler invocation is normalized into.
pub type HandlerFuture<Err> = Pin<Box<dyn Future<Output = Result<Value, Err>> + Send>>;

/// Type alias for a callable handler.
///
/// Synchronous closures are coerced into this shape by [`Handler::sync`], which
/// wraps their result into an immediately ready future.
pub type HandlerFn<Err> = Arc<dyn Fn(Args) -> HandlerFuture<Err> + Send + Sync>;

/// An object exposing a `run` capability with the same calling contract as a
/// callable handler. `Pipeline<Err>` implements it, so pipelines nest.
#[async_trait]
pub trait Runnable<Err>: Send + Sync {
  /// Runs with exactly the supplied argument list.
  async fn run(&self, args: Args) -> Result<Value, Err>;
}

/// A validated unit of work.
///
/// The capability (call the closure vs. call `run`) is fixed by the variant when
/// the handler is built, so the engine never re-inspects it per call.
pub enum Handler<Err> {
  Callable(HandlerFn<Err>),
  Runnable(Arc<dyn Runnable<Err>>),
}

impl<Err: Send + 'static> Handler<Err> {
  /// Wraps a synchronous closure. Its return value resolves immediately.
  pub fn sync<F>(f: F) -> Self
  where
    F: Fn(Args) -> Result<Value, Err> + Send + Sync + 'static,
  {
    Handler::Callable(Arc::new(move |args| {
      let out = f(args);
      Box::pin(std::future::ready(out))
    }))
  }

  /// Wraps a closure returning a future.
  pub fn from_async<F, Fut>(f: F) -> Self
  where
    F: Fn(Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, Err>> + Send + 'static,
  {
    Handler::Callable(Arc::new(move |args| Box::pin(f(args))))
  }

  pub fn runnable(runnable: impl Runnable<Err> + 'static) -> Self {
    Handler::Runnable(Arc::new(runnable))
  }

  /// Invokes the resolved target with `args`, preserving arity.
  pub(crate) fn call(&self, args: Args) -> HandlerFuture<Err> {
    match self {
      Handler::Callable(f) => f(args),
      Handler::Runnable(runnable) => {
        let runnable = Arc::clone(runnable);
        Box::pin(async move { runnable.run(args).await })
      }
    }
  }
}

impl<Err> Handler<Err>
where
  Err: std::error::Error + From<ConductorError> + Send + Sync + 'static,
{
  /// Wraps a nested pipeline. It receives the step's arguments as its own run arguments.
  pub fn pipeline(pipeline: Pipeline<Err>) -> Self {
    Handler::Runnable(Arc::new(pipeline))
  }
}

impl<Err> Handler<Err> {
  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Handler::Callable(_) => "callable",
      Handler::Runnable(_) => "runnable",
    }
  }
}

impl<Err> Clone for Handler<Err> {
  fn clone(&self) -> Self {
    match self {
      Handler::Callable(f) => Handler::Callable(Arc::clone(f)),
      Handler::Runnable(r) => Handler::Runnable(Arc::clone(r)),
    }
  }
}

impl<Err> fmt::Debug for Handler<Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Handler").field(&self.kind()).finish()
  }
}

/// A value offered to a building method before validation.
pub enum Candidate<Err> {
  /// Nothing was supplied.
  Absent,
  /// An explicit "no value" sentinel.
  Null,
  /// Plain data: neither callable nor run-capable.
  Data(Value),
  Handler(Handler<Err>),
}

impl<Err> Candidate<Err> {
  pub fn is_callable(&self) -> bool {
    matches!(self, Candidate::Handler(Handler::Callable(_)))
  }

  pub fn is_runnable(&self) -> bool {
    matches!(self, Candidate::Handler(Handler::Runnable(_)))
  }

  /// True for `Absent` and `Null`, the two shapes that mark a fallback check.
  pub fn is_missing(&self) -> bool {
    matches!(self, Candidate::Absent | Candidate::Null)
  }

  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Candidate::Absent => "absent",
      Candidate::Null => "null",
      Candidate::Data(data) => value::kind(data),
      Candidate::Handler(handler) => handler.kind(),
    }
  }
}

impl<Err> Clone for Candidate<Err> {
  fn clone(&self) -> Self {
    match self {
      Candidate::Absent => Candidate::Absent,
      Candidate::Null => Candidate::Null,
      Candidate::Data(value) => Candidate::Data(value.clone()),
      Candidate::Handler(handler) => Candidate::Handler(handler.clone()),
    }
  }
}

impl<Err> fmt::Debug for Candidate<Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Candidate::Data(value) => f.debug_tuple("Data").field(value).finish(),
      other => f.write_str(other.kind()),
    }
  }
}

impl<Err> From<Handler<Err>> for Candidate<Err> {
  fn from(handler: Handler<Err>) -> Self {
    Candidate::Handler(handler)
  }
}

impl<Err> From<Option<Handler<Err>>> for Candidate<Err> {
  fn from(handler: Option<Handler<Err>>) -> Self {
    handler.map_or(Candidate::Absent, Candidate::Handler)
  }
}

impl<Err> From<Value> for Candidate<Err> {
  fn from(value: Value) -> Self {
    match value {
      Value::Null => Candidate::Null,
      other => Candidate::Data(other),
    }
  }
}
