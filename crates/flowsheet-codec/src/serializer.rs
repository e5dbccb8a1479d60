use std::collections::{BTreeSet, HashMap};
use std::io;

use flowsheet_config::{KNOWN_PERMISSIONS, KNOWN_ROLES, WorkflowDef, WorklistDef};

/// Serialize a workflow definition to CSV sheet text.
///
/// Pure and infallible for well-formed input: the layout is fixed, the
/// orderings are deterministic, and the writer targets an in-memory
/// buffer.
pub fn serialize(workflow: &WorkflowDef) -> String {
  let mut buf = Vec::new();
  write_csv(workflow, &mut buf).expect("writing CSV to an in-memory buffer cannot fail");
  String::from_utf8(buf).expect("the CSV writer emits UTF-8 only")
}

/// Serialize a workflow definition to any writer.
pub fn write_csv<W: io::Write>(workflow: &WorkflowDef, out: W) -> csv::Result<()> {
  let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

  // Known roles first, then custom roles discovered in the grants,
  // sorted, so every sheet lists the same columns in the same order.
  let custom_roles: BTreeSet<&str> = workflow
    .states
    .iter()
    .flat_map(|s| s.permissions.iter())
    .flat_map(|p| p.roles.iter())
    .map(String::as_str)
    .filter(|role| !KNOWN_ROLES.contains(role))
    .collect();
  let mut all_roles: Vec<&str> = KNOWN_ROLES.to_vec();
  all_roles.extend(custom_roles);

  // State id -> its worklist, via the review_state match pairs. When
  // several worklists match one state, the last one wins.
  let mut state_worklists: HashMap<&str, &WorklistDef> = HashMap::new();
  for worklist in &workflow.worklists {
    for (var, value) in &worklist.var_match {
      if var == "review_state" {
        state_worklists.insert(value.as_str(), worklist);
      }
    }
  }

  wtr.write_record(["[Workflow]"])?;
  wtr.write_record(["Id:", workflow.id.as_str()])?;
  wtr.write_record(["Title:", workflow.title.trim()])?;
  wtr.write_record(["Description:", workflow.description.trim()])?;
  wtr.write_record(["Initial state:", workflow.initial_state.as_str()])?;
  wtr.write_record([""])?; // terminator row

  for state in &workflow.states {
    wtr.write_record(["[State]"])?;
    wtr.write_record(["Id:", state.id.as_str()])?;
    wtr.write_record(["Title:", state.title.trim()])?;
    wtr.write_record(["Description:", state.description.trim()])?;
    wtr.write_record(["Transitions", state.transitions.join(", ").as_str()])?;

    if let Some(worklist) = state_worklists.get(state.id.as_str()) {
      wtr.write_record(["Worklist:", worklist.description.as_str()])?;
      wtr.write_record(["Worklist label:", worklist.actbox_name.as_str()])?;
      wtr.write_record([
        "Worklist guard permission:",
        worklist.guard.permissions.join(", ").as_str(),
      ])?;
      wtr.write_record([
        "Worklist guard role:",
        worklist.guard.roles.join(", ").as_str(),
      ])?;
      wtr.write_record(["Worklist guard expression:", worklist.guard.expr.as_str()])?;
    }

    let mut header = vec!["Permissions".to_string(), "Acquire".to_string()];
    header.extend(all_roles.iter().map(|role| role.to_string()));
    wtr.write_record(&header)?;

    // Known permissions first, in their fixed order, then the rest in
    // the order the state declares them.
    let known = KNOWN_PERMISSIONS
      .iter()
      .filter_map(|name| state.permissions.iter().filter(|p| p.name == *name).last());
    let rest = state
      .permissions
      .iter()
      .filter(|p| !KNOWN_PERMISSIONS.contains(&p.name.as_str()));

    for grant in known.chain(rest) {
      let mut row = Vec::with_capacity(2 + all_roles.len());
      row.push(grant.name.clone());
      row.push(yes_no(grant.acquired));
      for role in &all_roles {
        row.push(yes_no(grant.roles.iter().any(|r| r == role)));
      }
      wtr.write_record(&row)?;
    }

    wtr.write_record([""])?; // terminator row
  }

  for transition in &workflow.transitions {
    wtr.write_record(["[Transition]"])?;
    wtr.write_record(["Id:", transition.id.as_str()])?;
    wtr.write_record(["Target state:", transition.new_state_id.as_str()])?;
    wtr.write_record(["Title:", transition.actbox_name.as_str()])?;
    wtr.write_record(["Description:", transition.description.trim()])?;
    wtr.write_record(["Trigger:", transition.trigger.to_string().as_str()])?;
    wtr.write_record(["Script before:", transition.script_before.as_str()])?;
    wtr.write_record(["Script after:", transition.script_after.as_str()])?;
    wtr.write_record([
      "Guard permission:",
      transition.guard.permissions.join(", ").as_str(),
    ])?;
    wtr.write_record(["Guard role:", transition.guard.roles.join(", ").as_str()])?;
    wtr.write_record(["Guard expression:", transition.guard.expr.as_str()])?;
    wtr.write_record([""])?; // terminator row
  }

  wtr.flush()?;
  Ok(())
}

fn yes_no(value: bool) -> String {
  if value { "Y" } else { "N" }.to_string()
}
