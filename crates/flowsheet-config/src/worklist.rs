use serde::{Deserialize, Serialize};

use crate::guard::Guard;

/// A saved query surfacing items currently in a particular state, for
/// task-list UIs. Linked to its state through a
/// `("review_state", state_id)` entry in `var_match`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorklistDef {
  /// Derived from the description (normalized).
  pub id: String,
  pub description: String,
  /// Display label for the task-list entry.
  pub actbox_name: String,
  pub actbox_url: String,
  pub guard: Guard,
  /// Variable/value pairs an item must match to appear on this worklist.
  pub var_match: Vec<(String, String)>,
}

impl WorklistDef {
  /// The state id this worklist surfaces, if it matches on the review
  /// state variable.
  pub fn matched_state(&self) -> Option<&str> {
    self
      .var_match
      .iter()
      .find(|(var, _)| var == "review_state")
      .map(|(_, value)| value.as_str())
  }
}
