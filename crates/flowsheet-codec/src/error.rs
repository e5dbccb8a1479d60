use thiserror::Error;

/// A structural problem in a workflow sheet. Every message is written to
/// be actionable from inside the spreadsheet tool: it names the section,
/// key or value that needs fixing.
#[derive(Debug, Error)]
pub enum ParsingError {
  #[error("expected to find a [{0}] section")]
  MissingSection(&'static str),

  #[error("expected to find at least one of each of these sections: {0}")]
  MissingSections(String),

  #[error("the [Workflow] section must have an 'Id:' and an 'Initial state:' defined")]
  WorkflowMissingKeys,

  #[error("the [State] section must have an 'Id:' and a 'Title:' defined")]
  StateMissingKeys,

  #[error("the [State] section must end with a 'Permissions' table")]
  MissingPermissionsTable,

  #[error(
    "the [State] section's 'Permissions' table must list role names along \
     the top row, starting with 'Acquire'; found '{0}'"
  )]
  BadPermissionsHeader(String),

  #[error("each [Transition] section must have an 'Id:' defined")]
  TransitionMissingId,

  #[error(
    "each [Script] section with 'Type: External Method' must have an \
     'Id:', a 'Module:' and a 'Function:' defined"
  )]
  ScriptMissingKeys,

  #[error("[Script] section has unsupported type '{0}'")]
  UnsupportedScriptType(String),

  #[error(
    "the initial state is set to '{initial_state}', but workflow \
     '{workflow}' has no state with that id"
  )]
  UnknownInitialState {
    workflow: String,
    initial_state: String,
  },

  #[error("malformed CSV input: {0}")]
  Csv(#[from] csv::Error),
}
