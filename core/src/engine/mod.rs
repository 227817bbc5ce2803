// conductor/src/engine/mod.rs

//! Handler validation and normalized invocation.

pub mod execution;
pub mod validator;

pub use execution::ExecutionEngine;
pub use validator::{default_detectors, Detector, HandlerValidator};
