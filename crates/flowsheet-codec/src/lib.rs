//! Flowsheet Codec
//!
//! The bidirectional codec between structured workflow definitions
//! (`flowsheet_config::WorkflowDef`) and the human-editable CSV sheet
//! format.
//!
//! The sheet format is a sequence of bracket-tagged sections
//! (`[Workflow]`, `[State]`, `[Transition]`, `[Script]`), each a block of
//! label/value rows terminated by a blank row; states additionally end
//! with a `Permissions,Acquire,<roles...>` table. The serializer and
//! deserializer never call each other but agree exactly on this layout,
//! so a definition round-trips byte-for-byte.
//!
//! Deserialization is deliberately forgiving about the things spreadsheet
//! tools get wrong (delimiter choice, boolean spellings like "x" or
//! "yes", stray short rows) and strict about structure (required
//! sections and keys, the permission table header, the initial state
//! reference), failing with a `ParsingError` whose message names the
//! offending section or value.

mod cell;
mod deserializer;
mod error;
mod rows;
mod section;
mod serializer;
mod sniff;

pub use deserializer::{Deserialized, Deserializer};
pub use error::ParsingError;
pub use serializer::{serialize, write_csv};

use flowsheet_config::CodecConfig;

/// Deserialize a workflow sheet using the default (all-empty) templates.
pub fn deserialize(input: &str) -> Result<Deserialized, ParsingError> {
  Deserializer::new(&CodecConfig::default()).deserialize(input)
}
