use std::collections::{BTreeSet, HashMap};

use flowsheet_config::{CodecConfig, TriggerType, WorkflowDef};
use tracing::warn;

use crate::cell::{is_blank, normalize, parse_bool, split_list};
use crate::error::ParsingError;
use crate::rows::RowCursor;
use crate::section::{SectionKind, section_tag};
use crate::sniff::sniff_delimiter;

/// Path marker for script references that should be turned into implicit
/// External Method scripts.
const EXTENSIONS_MARKER: &str = ".Extensions.";

/// URL template worklists point their task-list entries at.
const WORKLIST_URL_PREFIX: &str = "%(portal_url)s/search?review_state=";

/// A successfully parsed workflow plus the non-fatal anomalies collected
/// on the way. Warnings are also logged via `tracing`, but returning them
/// lets callers surface them next to the sheet being imported.
#[derive(Debug)]
pub struct Deserialized {
  pub workflow: WorkflowDef,
  pub warnings: Vec<String>,
}

/// CSV sheet → validated `WorkflowDef`.
///
/// Parsing is sequential and single-pass: the dispatch loop hands the
/// shared `RowCursor` to each section handler, which consumes rows up to
/// and including its terminating blank row.
pub struct Deserializer<'a> {
  config: &'a CodecConfig,
}

impl<'a> Deserializer<'a> {
  pub fn new(config: &'a CodecConfig) -> Self {
    Self { config }
  }

  pub fn deserialize(&self, input: &str) -> Result<Deserialized, ParsingError> {
    let delimiter = sniff_delimiter(input);
    let mut cursor = RowCursor::from_csv(input, delimiter)?;

    let mut workflow = self.config.workflow.clone();
    let mut warnings = Vec::new();

    self.dispatch(&mut cursor, &mut workflow, &mut warnings)?;
    backfill(&mut workflow);
    validate(&workflow)?;

    Ok(Deserialized { workflow, warnings })
  }

  /// Scan rows for section headers and hand each recognized section to
  /// its handler. Unknown sections and stray rows are skipped. At least
  /// one [Workflow] and one [State] section must be present.
  fn dispatch(
    &self,
    cursor: &mut RowCursor,
    workflow: &mut WorkflowDef,
    warnings: &mut Vec<String>,
  ) -> Result<(), ParsingError> {
    let mut saw_workflow = false;
    let mut saw_state = false;

    loop {
      let tag = match cursor.next_row() {
        Some(row) => section_tag(row),
        None => break,
      };
      let Some(tag) = tag else { continue };

      match SectionKind::from_tag(&tag) {
        Some(SectionKind::Workflow) => {
          saw_workflow = true;
          self.parse_workflow(cursor, workflow, warnings)?;
        }
        Some(SectionKind::State) => {
          saw_state = true;
          self.parse_state(cursor, workflow, warnings)?;
        }
        Some(SectionKind::Transition) => {
          self.parse_transition(cursor, workflow, warnings)?;
        }
        Some(SectionKind::Script) => {
          self.parse_script(cursor, workflow, warnings)?;
        }
        None => {} // unrecognized section, body rows skipped by this loop
      }
    }

    match (saw_workflow, saw_state) {
      (true, true) => Ok(()),
      (false, true) => Err(ParsingError::MissingSection("Workflow")),
      (true, false) => Err(ParsingError::MissingSection("State")),
      (false, false) => Err(ParsingError::MissingSections(
        "[Workflow], [State]".to_string(),
      )),
    }
  }

  fn parse_workflow(
    &self,
    cursor: &mut RowCursor,
    workflow: &mut WorkflowDef,
    warnings: &mut Vec<String>,
  ) -> Result<(), ParsingError> {
    let block = read_block(cursor, None, warnings);

    let (Some(id), Some(initial_state)) =
      (block.get("id"), block.get("initial-state"))
    else {
      return Err(ParsingError::WorkflowMissingKeys);
    };

    workflow.id = id.to_string();
    workflow.initial_state = initial_state.to_string();
    workflow.title = block.get_or("title", "");
    workflow.description = block.get_or("description", "");
    workflow.meta_type = block.get_or("type", "Workflow");
    workflow.state_variable = block.get_or("state-variable", "review_state");
    Ok(())
  }

  fn parse_state(
    &self,
    cursor: &mut RowCursor,
    workflow: &mut WorkflowDef,
    warnings: &mut Vec<String>,
  ) -> Result<(), ParsingError> {
    let block = read_block(cursor, Some("permissions"), warnings);

    if block.get("id").is_none() || block.get("title").is_none() {
      return Err(ParsingError::StateMissingKeys);
    }

    let header = block
      .stop_row
      .as_deref()
      .ok_or(ParsingError::MissingPermissionsTable)?;
    // The stop row always has at least two cells; the second must be the
    // "Acquire" column, the rest are the role columns.
    let acquire_cell = &header[1];
    if !matches!(normalize(acquire_cell).as_str(), "acquire" | "acquired") {
      return Err(ParsingError::BadPermissionsHeader(acquire_cell.clone()));
    }
    let roles: Vec<String> = header[2..].iter().map(|r| r.trim().to_string()).collect();

    let mut state = self.config.state.clone();
    state.id = block.get_or("id", "");
    state.title = block.get_or("title", "");
    state.description = block.get_or("description", "");
    state.transitions = split_list(&block.get_or("transitions", ""));

    // Grant rows run until the terminating blank row or end of input.
    loop {
      let Some(row) = cursor.next_row() else { break };
      if is_blank(row) {
        break;
      }

      let mut grant = self.config.permission.clone();
      grant.name = row[0].trim().to_string();
      if row.len() >= 2 {
        grant.acquired = parse_bool(&row[1]);
      }
      if row.len() >= 3 {
        let mut granted: Vec<String> = roles
          .iter()
          .zip(&row[2..])
          .filter(|(_, cell)| parse_bool(cell))
          .map(|(role, _)| role.clone())
          .collect();
        granted.sort();
        grant.roles = granted;
      }
      state.permissions.push(grant);
    }

    let state_id = state.id.clone();
    workflow.states.push(state);

    if let Some(description) = block.get("worklist") {
      let mut worklist = self.config.worklist.clone();
      worklist.id = normalize(description);
      worklist.description = description.to_string();
      worklist.actbox_name = block.get_or("worklist-label", "");
      worklist.actbox_url = format!("{WORKLIST_URL_PREFIX}{state_id}");
      worklist.guard.roles =
        split_list(&block.get_either("worklist-guard-role", "worklist-guard-roles"));
      worklist.guard.permissions = split_list(
        &block.get_either("worklist-guard-permission", "worklist-guard-permissions"),
      );
      worklist.guard.expr = block.get_or("worklist-guard-expression", "");
      worklist.var_match = vec![("review_state".to_string(), state_id)];
      workflow.worklists.push(worklist);
    }

    Ok(())
  }

  fn parse_transition(
    &self,
    cursor: &mut RowCursor,
    workflow: &mut WorkflowDef,
    warnings: &mut Vec<String>,
  ) -> Result<(), ParsingError> {
    let block = read_block(cursor, None, warnings);

    let Some(id) = block.get("id") else {
      return Err(ParsingError::TransitionMissingId);
    };

    let mut transition = self.config.transition.clone();
    transition.id = id.to_string();
    transition.new_state_id = block.get_or("target-state", "");
    transition.actbox_name = block.get_or("title", "");
    // Intentional cross-mapping, kept for compatibility: the sheet's
    // Description cell is the stored display title, and Details is the
    // stored description.
    transition.title = block.get_or("description", "");
    transition.description = block.get_or("details", "");
    transition.trigger = TriggerType::parse_cell(&block.get_or("trigger", "User"));
    transition.actbox_url = block.get_or("url", "");
    transition.actbox_category = block.get_or("category", "workflow");
    transition.guard.roles =
      split_list(&block.get_either("guard-role", "guard-roles"));
    transition.guard.permissions =
      split_list(&block.get_either("guard-permission", "guard-permissions"));
    transition.guard.expr = block.get_or("guard-expression", "");
    transition.script_before = block.get_or("script-before", "");
    transition.script_after = block.get_or("script-after", "");

    // External Method scripts referenced by module path are created on
    // the fly, and the reference is rewritten to the derived script id.
    if transition.script_before.contains(EXTENSIONS_MARKER) {
      transition.script_before =
        self.create_implicit_script(workflow, &transition.script_before);
    }
    if transition.script_after.contains(EXTENSIONS_MARKER) {
      transition.script_after =
        self.create_implicit_script(workflow, &transition.script_after);
    }

    workflow.transitions.push(transition);
    Ok(())
  }

  /// Derive an External Method script from a dotted `.Extensions.` path:
  /// `Products.myproduct.Extensions.myscript.publish` yields id
  /// `myscript.publish`, module `Products.myproduct.myscript`, function
  /// `publish`.
  fn create_implicit_script(&self, workflow: &mut WorkflowDef, path: &str) -> String {
    let cleaned = path.replace(".Extensions", "");
    let parts: Vec<&str> = cleaned.split('.').collect();

    let mut script = self.config.script.clone();
    script.meta_type = "External Method".to_string();
    script.id = parts[parts.len().saturating_sub(2)..].join(".");
    script.module = parts[..parts.len() - 1].join(".");
    script.function = parts[parts.len() - 1].to_string();

    let id = script.id.clone();
    workflow.scripts.push(script);
    id
  }

  fn parse_script(
    &self,
    cursor: &mut RowCursor,
    workflow: &mut WorkflowDef,
    warnings: &mut Vec<String>,
  ) -> Result<(), ParsingError> {
    let block = read_block(cursor, None, warnings);

    let meta_type = block.get_or("type", "");
    if meta_type != "External Method" {
      return Err(ParsingError::UnsupportedScriptType(meta_type));
    }

    let (Some(id), Some(module), Some(function)) =
      (block.get("id"), block.get("module"), block.get("function"))
    else {
      return Err(ParsingError::ScriptMissingKeys);
    };

    let mut script = self.config.script.clone();
    script.meta_type = "External Method".to_string();
    script.id = id.to_string();
    script.module = module.to_string();
    script.function = function.to_string();
    workflow.scripts.push(script);
    Ok(())
  }
}

/// A parsed key/value block: normalized first cell → trimmed, non-empty
/// second cell. A `Key:,` row with an empty value stores nothing, so a
/// blank required cell reads as a missing key.
struct KeyValueBlock {
  values: HashMap<String, String>,
  /// The full stop-key row, when a stop key was requested and hit.
  stop_row: Option<Vec<String>>,
}

impl KeyValueBlock {
  fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  fn get_or(&self, key: &str, default: &str) -> String {
    self.get(key).unwrap_or(default).to_string()
  }

  /// First of two accepted key spellings (singular/plural).
  fn get_either(&self, key: &str, alt: &str) -> String {
    self.get(key).or_else(|| self.get(alt)).unwrap_or("").to_string()
  }
}

/// Read label/value rows until a blank row (or end of input). When the
/// normalized key of a row matches `stop`, the full row is captured and
/// reading halts immediately; this is how the permissions table header is
/// grabbed without being consumed as an ordinary pair. Rows with fewer
/// than two cells are skipped with a warning.
fn read_block(
  cursor: &mut RowCursor,
  stop: Option<&str>,
  warnings: &mut Vec<String>,
) -> KeyValueBlock {
  let mut values = HashMap::new();
  let mut stop_row = None;

  loop {
    let Some(row) = cursor.next_row() else { break };
    if is_blank(row) {
      break;
    }
    if row.len() < 2 {
      let message = format!(
        "expected a key/value pair on row '{}', skipping",
        row.join(",")
      );
      warn!("{message}");
      warnings.push(message);
      continue;
    }

    let key = normalize(&row[0]);
    let value = row[1].trim();
    if !value.is_empty() {
      values.insert(key.clone(), value.to_string());
    }

    if stop == Some(key.as_str()) {
      stop_row = Some(row.to_vec());
      break;
    }
  }

  KeyValueBlock { values, stop_row }
}

/// Derive the definition-level permission set from the states.
fn backfill(workflow: &mut WorkflowDef) {
  let names: BTreeSet<String> = workflow
    .states
    .iter()
    .flat_map(|s| s.permissions.iter().map(|p| p.name.clone()))
    .collect();
  workflow.permissions = names.into_iter().collect();
}

/// Overall validation: the initial state must name a parsed state.
fn validate(workflow: &WorkflowDef) -> Result<(), ParsingError> {
  if workflow.state(&workflow.initial_state).is_none() {
    return Err(ParsingError::UnknownInitialState {
      workflow: workflow.id.clone(),
      initial_state: workflow.initial_state.clone(),
    });
  }
  Ok(())
}
