use serde::{Deserialize, Serialize};

use crate::enums::TriggerType;
use crate::guard::Guard;

/// A lifecycle move from the states that declare it to `new_state_id`,
/// gated by `guard`.
///
/// Field mapping quirk, kept for compatibility with existing sheets and
/// engine data: the sheet's `Title:` cell fills `actbox_name` (the action
/// label shown in UIs), the sheet's `Description:` cell fills `title`, and
/// a separate `Details:` cell fills `description`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionDef {
  pub id: String,
  /// Id of the state this transition moves items into.
  pub new_state_id: String,
  pub title: String,
  pub description: String,
  pub trigger: TriggerType,
  /// Display label for the action box / menu entry.
  pub actbox_name: String,
  pub actbox_url: String,
  pub actbox_category: String,
  pub guard: Guard,
  /// Script reference run before the transition, if any.
  pub script_before: String,
  /// Script reference run after the transition, if any.
  pub script_after: String,
}
