// conductor/src/conditional/spec.rs

use crate::core::handler::Candidate;
use std::fmt;

/// One branch of an `if_`/`switch` group.
///
/// A spec whose `check` is absent (or null) is a fallback and matches
/// unconditionally. Candidates are validated by the engine when the branch is
/// evaluated, not when the group is built.
pub struct ConditionalSpec<Err> {
  pub check: Candidate<Err>,
  pub handler: Candidate<Err>,
}

impl<Err> ConditionalSpec<Err> {
  pub fn when(check: impl Into<Candidate<Err>>, handler: impl Into<Candidate<Err>>) -> Self {
    Self {
      check: check.into(),
      handler: handler.into(),
    }
  }

  pub fn otherwise(handler: impl Into<Candidate<Err>>) -> Self {
    Self {
      check: Candidate::Absent,
      handler: handler.into(),
    }
  }

  pub fn is_fallback(&self) -> bool {
    self.check.is_missing()
  }
}

impl<Err> Clone for ConditionalSpec<Err> {
  fn clone(&self) -> Self {
    Self {
      check: self.check.clone(),
      handler: self.handler.clone(),
    }
  }
}

impl<Err> fmt::Debug for ConditionalSpec<Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConditionalSpec")
      .field("check", &self.check)
      .field("handler", &self.handler)
      .finish()
  }
}
