// conductor/src/engine/validator.rs

//! A composable set of detectors deciding whether a candidate may serve as a step.

use crate::core::handler::{Candidate, Handler};
use crate::error::ConductorError;
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// A predicate reporting `true` when the candidate is NOT acceptable.
pub type Detector<Err> = Arc<dyn Fn(&Candidate<Err>) -> bool + Send + Sync>;

/// The default detector set, applied in order:
/// 1. nothing was supplied,
/// 2. the explicit null sentinel was supplied,
/// 3. the candidate is neither callable nor run-capable.
pub fn default_detectors<Err: 'static>() -> Vec<Detector<Err>> {
  let absent: Detector<Err> = Arc::new(|candidate: &Candidate<Err>| matches!(candidate, Candidate::Absent));
  let null: Detector<Err> = Arc::new(|candidate: &Candidate<Err>| matches!(candidate, Candidate::Null));
  let not_invocable: Detector<Err> =
    Arc::new(|candidate: &Candidate<Err>| !candidate.is_callable() && !candidate.is_runnable());
  vec![absent, null, not_invocable]
}

pub struct HandlerValidator<Err> {
  detectors: Vec<Detector<Err>>,
}

impl<Err: 'static> HandlerValidator<Err> {
  /// Builds a validator from an arbitrary ordered list of detectors.
  pub fn new(detectors: Vec<Detector<Err>>) -> Self {
    Self { detectors }
  }

  /// Fails with `ConductorError::InvalidHandler` on the first detector that fires.
  pub fn validate(&self, candidate: &Candidate<Err>) -> Result<(), ConductorError> {
    if let Some(detector_index) = self.detectors.iter().position(|detect| detect(candidate)) {
      event!(
        Level::DEBUG,
        detector_index,
        candidate_kind = candidate.kind(),
        "Invalid handler is passed."
      );
      return Err(ConductorError::InvalidHandler);
    }
    Ok(())
  }

  /// Validates and unwraps the handler in one step.
  ///
  /// A custom detector list may let plain data through `validate`; such a
  /// candidate still has nothing to invoke and is rejected here.
  pub fn admit(&self, candidate: Candidate<Err>) -> Result<Handler<Err>, ConductorError> {
    self.validate(&candidate)?;
    match candidate {
      Candidate::Handler(handler) => Ok(handler),
      other => {
        event!(Level::DEBUG, candidate_kind = other.kind(), "Candidate passed detectors but is not invocable.");
        Err(ConductorError::InvalidHandler)
      }
    }
  }

  pub fn len(&self) -> usize {
    self.detectors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.detectors.is_empty()
  }
}

impl<Err: 'static> Default for HandlerValidator<Err> {
  fn default() -> Self {
    Self::new(default_detectors())
  }
}

impl<Err> fmt::Debug for HandlerValidator<Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HandlerValidator")
      .field("num_detectors", &self.detectors.len())
      .finish()
  }
}
