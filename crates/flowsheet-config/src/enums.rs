use std::fmt;

use serde::{Deserialize, Serialize};

/// How a transition fires: explicitly by a user, or automatically when
/// its guards allow it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
  #[default]
  User,
  Automatic,
}

impl TriggerType {
  /// Parse a trigger cell, case-insensitively. Anything that is not
  /// "automatic" falls back to the default user trigger, mirroring the
  /// permissive handling of other sheet cells.
  pub fn parse_cell(cell: &str) -> Self {
    if cell.trim().eq_ignore_ascii_case("automatic") {
      TriggerType::Automatic
    } else {
      TriggerType::User
    }
  }
}

impl fmt::Display for TriggerType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TriggerType::User => write!(f, "User"),
      TriggerType::Automatic => write!(f, "Automatic"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_cell_case_insensitive() {
    assert_eq!(TriggerType::parse_cell("AUTOMATIC"), TriggerType::Automatic);
    assert_eq!(TriggerType::parse_cell("automatic"), TriggerType::Automatic);
    assert_eq!(TriggerType::parse_cell(" Automatic "), TriggerType::Automatic);
    assert_eq!(TriggerType::parse_cell("User"), TriggerType::User);
  }

  #[test]
  fn test_parse_cell_unknown_defaults_to_user() {
    assert_eq!(TriggerType::parse_cell("workflow method"), TriggerType::User);
    assert_eq!(TriggerType::parse_cell(""), TriggerType::User);
  }

  #[test]
  fn test_display_is_canonical() {
    assert_eq!(TriggerType::User.to_string(), "User");
    assert_eq!(TriggerType::Automatic.to_string(), "Automatic");
  }
}
