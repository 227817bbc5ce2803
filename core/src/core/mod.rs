pub mod handler;
pub mod value;

// Re-export key types for easier access from other conductor modules (and lib.rs)
pub use handler::{Candidate, Handler, HandlerFn, HandlerFuture, Runnable};
pub use value::{is_truthy, Args, Value};
