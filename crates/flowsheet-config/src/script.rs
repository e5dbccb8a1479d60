use serde::{Deserialize, Serialize};

/// A script attached to the workflow, run before or after transitions.
/// Only externally defined methods are supported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptDef {
  pub id: String,
  /// Script kind; currently always "External Method".
  pub meta_type: String,
  /// Dotted module path the function lives in.
  pub module: String,
  pub function: String,
}
