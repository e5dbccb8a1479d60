use serde::{Deserialize, Serialize};

/// A named lifecycle stage. Holds the permission/role grants that apply
/// while an item sits in this state, and the ids of the transitions that
/// may fire from it (the transitions themselves are owned by the
/// `WorkflowDef`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDef {
  pub id: String,
  pub title: String,
  pub description: String,
  /// Transition ids reachable from this state.
  pub transitions: Vec<String>,
  pub permissions: Vec<PermissionGrant>,
}

/// One row of a state's permission table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionGrant {
  pub name: String,
  /// True when the setting is inherited from a broader scope rather than
  /// set explicitly on this state.
  pub acquired: bool,
  /// Roles granted this permission in this state, stored sorted.
  pub roles: Vec<String>,
}
