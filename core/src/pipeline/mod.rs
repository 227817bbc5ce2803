// conductor/src/pipeline/mod.rs

//! Defines the `Pipeline<Err>` struct, its construction, building methods and execution logic.

pub mod definition;
pub mod execution;
pub mod options;

// Re-export the main Pipeline struct
pub use definition::Pipeline;
pub use options::PipelineOptions;
