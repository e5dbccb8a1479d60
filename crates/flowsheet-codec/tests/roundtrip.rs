//! Round-trip tests: the serializer and deserializer never call each
//! other, but they must agree exactly on the sheet layout. A definition
//! parsed from valid text re-serializes to a canonical sheet, and that
//! canonical sheet is a fixed point of serialize ∘ deserialize.

use flowsheet_codec::{deserialize, serialize};

/// A hand-edited sheet: blank-line terminators, spreadsheet-style
/// booleans, a worklist, a custom role, and two transitions.
const HAND_EDITED: &str = "\
[Workflow]
Id:,review
Title:,Review workflow
Description:,Two-step review
Initial state:,private

[State]
Id:,private
Title:,Private
Description:,Only visible to the owner
Transitions,\"submit, publish\"
Permissions,Acquire,Manager,Owner,Reviewer
View,no,x,*,
Modify portal content,N,Yes,y,n

[State]
Id:,pending
Title:,Pending
Transitions,publish
Worklist:,Pending review
Worklist label:,Items to review
Worklist guard role:,Reviewer
Permissions,Acquire,Reviewer
View,Y,x

[Transition]
Id:,submit
Target state:,pending
Title:,Submit for review
Trigger:,User
Guard role:,Owner

[Transition]
Id:,publish
Target state:,published
Title:,Publish
Trigger:,automatic
Guard permission:,Modify portal content
Guard expression:,python:object.ready()
";

#[test]
fn test_canonical_form_is_a_fixed_point() {
  let first = deserialize(HAND_EDITED).expect("hand-edited sheet parses");
  let canonical = serialize(&first.workflow);

  let second = deserialize(&canonical).expect("canonical sheet parses");
  assert_eq!(serialize(&second.workflow), canonical);

  let third = deserialize(&canonical).expect("canonical sheet parses again");
  assert_eq!(second.workflow, third.workflow);
}

#[test]
fn test_hand_edited_booleans_and_orderings() {
  let parsed = deserialize(HAND_EDITED).expect("hand-edited sheet parses");
  let wf = &parsed.workflow;

  assert_eq!(wf.id, "review");
  assert_eq!(wf.initial_state, "private");
  assert_eq!(wf.states.len(), 2);
  assert_eq!(wf.transitions.len(), 2);

  // "no" is false; "x" and "*" are true; the trailing empty cell is false.
  let view = &wf.states[0].permissions[0];
  assert_eq!(view.name, "View");
  assert!(!view.acquired);
  assert_eq!(view.roles, vec!["Manager", "Owner"]);

  // "Yes"/"y" are true, "n" is false; roles come back sorted.
  let modify = &wf.states[0].permissions[1];
  assert_eq!(modify.roles, vec!["Manager", "Owner"]);

  // Derived permission set is sorted and deduplicated across states.
  assert_eq!(wf.permissions, vec!["Modify portal content", "View"]);

  // Custom role Reviewer lands after the known roles in every state's
  // re-serialized table, even though only the sheet's tables named it.
  let canonical = serialize(wf);
  let header = "Permissions,Acquire,Anonymous,Manager,Owner,Reader,Editor,Contributor,Reviewer";
  assert_eq!(canonical.matches(header).count(), 2);
}

#[test]
fn test_worklist_survives_round_trip() {
  let first = deserialize(HAND_EDITED).expect("hand-edited sheet parses");
  let canonical = serialize(&first.workflow);
  let second = deserialize(&canonical).expect("canonical sheet parses");

  assert_eq!(first.workflow.worklists, second.workflow.worklists);
  let worklist = &second.workflow.worklists[0];
  assert_eq!(worklist.id, "pending-review");
  assert_eq!(worklist.matched_state(), Some("pending"));
}

#[test]
fn test_semicolon_sheet_parses_like_comma_sheet() {
  let comma = "\
[Workflow]
Id:,review
Initial state:,private

[State]
Id:,private
Title:,Private
Permissions,Acquire,Manager
View,N,Y
";
  let semicolon = "\
[Workflow]
Id:;review
Initial state:;private

[State]
Id:;private
Title:;Private
Permissions;Acquire;Manager
View;N;Y
";
  let a = deserialize(comma).expect("comma sheet");
  let b = deserialize(semicolon).expect("semicolon sheet");
  assert_eq!(a.workflow, b.workflow);
}
