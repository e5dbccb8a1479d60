//! Flowsheet Config
//!
//! This crate contains the structured workflow definition types for
//! Flowsheet, plus the shared schema knowledge both codec directions rely
//! on: the canonical ordering of well-known roles and permissions, the
//! empty-value templates each parsed record starts from, and the named
//! template variants a host can select between.
//!
//! The types here are plain data. They are populated either by the CSV
//! deserializer in `flowsheet-codec` or from JSON (via serde), validated,
//! and then handed to whatever workflow engine executes them.

mod enums;
mod guard;
mod roles;
mod script;
mod state;
mod transition;
mod variant;
mod workflow;
mod worklist;

pub use enums::TriggerType;
pub use guard::Guard;
pub use roles::{KNOWN_PERMISSIONS, KNOWN_ROLES};
pub use script::ScriptDef;
pub use state::{PermissionGrant, StateDef};
pub use transition::TransitionDef;
pub use variant::{CodecConfig, VariantRegistry};
pub use workflow::WorkflowDef;
pub use worklist::WorklistDef;
