use serde::{Deserialize, Serialize};

/// A precondition gating a transition or worklist: role membership,
/// permission grants, and/or a free-text guard expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guard {
  pub roles: Vec<String>,
  pub permissions: Vec<String>,
  pub expr: String,
}
