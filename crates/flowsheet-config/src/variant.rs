use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::script::ScriptDef;
use crate::state::{PermissionGrant, StateDef};
use crate::transition::TransitionDef;
use crate::workflow::WorkflowDef;
use crate::worklist::WorklistDef;

/// The template bundle a deserialization run starts from. Every parsed
/// record begins life as a clone of the matching template, so alternate
/// variants can pre-seed fields without the codec knowing about it.
///
/// Templates are read-only once built; each conversion clones its own
/// copies, so concurrent conversions never alias mutable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
  pub workflow: WorkflowDef,
  pub state: StateDef,
  pub permission: PermissionGrant,
  pub transition: TransitionDef,
  pub worklist: WorklistDef,
  pub script: ScriptDef,
}

/// Named lookup of `CodecConfig` bundles. The unnamed (empty-string)
/// variant is always present and holds all-empty templates.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
  variants: HashMap<String, CodecConfig>,
}

impl Default for VariantRegistry {
  fn default() -> Self {
    let mut variants = HashMap::new();
    variants.insert(String::new(), CodecConfig::default());
    Self { variants }
  }
}

impl VariantRegistry {
  /// Register (or replace) a named variant.
  pub fn insert(&mut self, name: impl Into<String>, config: CodecConfig) {
    self.variants.insert(name.into(), config);
  }

  /// Look up a variant by name. The empty string names the default.
  pub fn get(&self, name: &str) -> Option<&CodecConfig> {
    self.variants.get(name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_registry_has_unnamed_variant() {
    let registry = VariantRegistry::default();
    let config = registry.get("").expect("default variant");
    assert_eq!(*config, CodecConfig::default());
    assert!(config.workflow.id.is_empty());
    assert!(!config.permission.acquired);
  }

  #[test]
  fn test_unknown_variant_is_none() {
    let registry = VariantRegistry::default();
    assert!(registry.get("plone-intranet").is_none());
  }

  #[test]
  fn test_named_variant_round_trip() {
    let mut registry = VariantRegistry::default();
    let mut config = CodecConfig::default();
    config.workflow.meta_type = "Workflow".to_string();
    registry.insert("seeded", config.clone());
    assert_eq!(registry.get("seeded"), Some(&config));
  }
}
