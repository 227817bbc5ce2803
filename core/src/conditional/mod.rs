// conductor/src/conditional/mod.rs

//! Conditional composition: turns an ordered group of `(check, handler)` specs
//! into a single pipeline step where the first matching spec wins.
//!
//! Steps built here go through the same `ExecutionEngine` as every other step,
//! so checks and branch handlers may themselves be sync, async, or nested pipelines.

pub mod composer;
pub mod spec;

pub use composer::ConditionalComposer;
pub use spec::ConditionalSpec;
