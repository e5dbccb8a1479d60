//! Flowsheet Profile
//!
//! Filesystem boundary for setup-profile directories. Workflow sheets
//! live at `{root}/workflow_csv/<id>.csv`; a richer XML definition at
//! `{root}/workflows/<id>/definition.xml` shadows the sheet, in which
//! case the sheet is skipped with a logged warning rather than imported.

mod error;
mod profile;

pub use error::ProfileError;
pub use profile::{FsProfile, ImportReport, ImportedWorkflow};
