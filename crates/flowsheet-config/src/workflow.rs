use serde::{Deserialize, Serialize};

use crate::script::ScriptDef;
use crate::state::StateDef;
use crate::transition::TransitionDef;
use crate::worklist::WorklistDef;

/// A complete workflow definition: the states, transitions, worklists and
/// scripts governing an item's lifecycle, plus the permission names the
/// definition manages (derived from the states).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDef {
  pub id: String,
  pub title: String,
  pub description: String,
  /// Id of the state new items start in. Must name one of `states`.
  pub initial_state: String,
  /// Name of the status variable the engine tracks, e.g. "review_state".
  pub state_variable: String,
  pub meta_type: String,
  pub states: Vec<StateDef>,
  pub transitions: Vec<TransitionDef>,
  pub worklists: Vec<WorklistDef>,
  pub scripts: Vec<ScriptDef>,
  /// Sorted set of every permission name used by any state.
  pub permissions: Vec<String>,
}

impl WorkflowDef {
  /// Look up a state by id.
  pub fn state(&self, id: &str) -> Option<&StateDef> {
    self.states.iter().find(|s| s.id == id)
  }
}
