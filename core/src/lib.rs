// src/lib.rs

//! Conductor: a small ASYNC orchestration primitive for Rust.
//!
//! Conductor composes independently written units of work into one callable
//! pipeline:
//!  - Handlers may be sync closures, async closures, or any `Runnable` object,
//!    including another `Pipeline`.
//!  - Every invocation goes through one `ExecutionEngine`, so callers always
//!    await a future regardless of how the handler was written.
//!  - `if_`/`switch` compile an ordered group of `(check, handler)` specs into a
//!    single step where the first match wins.
//!  - The first step receives all run arguments; each later step receives the
//!    previous step's result as its single argument.
//!  - Handler errors reach the caller of `run` untouched.

pub mod conditional;
pub mod core;
pub mod engine;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::handler::{Candidate, Handler, HandlerFn, HandlerFuture, Runnable};
pub use crate::core::value::{is_truthy, Args, Value};

pub use crate::engine::execution::ExecutionEngine;
pub use crate::engine::validator::{default_detectors, Detector, HandlerValidator};

pub use crate::conditional::composer::ConditionalComposer;
pub use crate::conditional::spec::ConditionalSpec;

pub use crate::pipeline::definition::Pipeline;
pub use crate::pipeline::options::PipelineOptions;

pub use crate::error::{ConductorError, ConductorResult, INVALID_HANDLER_MESSAGE};

/*
    Core Workflow:
    1. Pick an error type `MyErr: std::error::Error + From<ConductorError>` (or use
       `ConductorError` itself).
    2. Create a `Pipeline::<MyErr>::new()`.
    3. Append steps with `.add(Handler::sync(..))`, `.add(Handler::from_async(..))`,
       or `.add(other_pipeline)`.
    4. Append branches with `.if_(ConditionalSpec::when(check, handler), [ConditionalSpec::otherwise(h)])`.
    5. Call `pipeline.run(vec![..]).await` as many times as needed, concurrently if you like.
*/
