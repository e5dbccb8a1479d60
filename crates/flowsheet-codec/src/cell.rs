//! Cell-level decoding rules shared across sections.

/// Normalize a cell for key and tag matching: lowercase, trim, collapse
/// internal whitespace to single dashes, and drop anything that is not
/// `[a-z0-9-]`. `"Initial state:"` becomes `"initial-state"`,
/// `"[Workflow]"` becomes `"workflow"`.
pub fn normalize(cell: &str) -> String {
  let mut out = String::with_capacity(cell.len());
  let mut pending_dash = false;
  for c in cell.trim().chars() {
    if c.is_whitespace() {
      pending_dash = true;
      continue;
    }
    if pending_dash {
      out.push('-');
      pending_dash = false;
    }
    for lc in c.to_lowercase() {
      if lc.is_ascii_lowercase() || lc.is_ascii_digit() || lc == '-' {
        out.push(lc);
      }
    }
  }
  out
}

/// Decode a boolean cell the way spreadsheets write them: empty is
/// false, "x" and "*" (checkmarks) are true, anything starting with "y"
/// is true, everything else is false.
pub fn parse_bool(cell: &str) -> bool {
  let cell = cell.trim().to_lowercase();
  if cell.is_empty() {
    return false;
  }
  if cell == "x" || cell == "*" {
    return true;
  }
  cell.starts_with('y')
}

/// Split a comma-separated cell into trimmed items. An empty cell is an
/// empty list.
pub fn split_list(cell: &str) -> Vec<String> {
  if cell.trim().is_empty() {
    return Vec::new();
  }
  cell.split(',').map(|item| item.trim().to_string()).collect()
}

/// A row terminates its section when every cell is empty. Covers true
/// blank lines, `""` rows, and rows like `,,`.
pub fn is_blank(row: &[String]) -> bool {
  row.iter().all(|cell| cell.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_labels() {
    assert_eq!(normalize("Id:"), "id");
    assert_eq!(normalize("Initial state:"), "initial-state");
    assert_eq!(normalize("  Worklist guard   role: "), "worklist-guard-role");
    assert_eq!(normalize("[Workflow]"), "workflow");
    assert_eq!(normalize("Review  (stage 2)"), "review-stage-2");
  }

  #[test]
  fn test_bool_decoding_table() {
    assert!(!parse_bool(""));
    assert!(parse_bool("x"));
    assert!(parse_bool("*"));
    assert!(parse_bool("Yes"));
    assert!(parse_bool("y"));
    assert!(!parse_bool("no"));
    assert!(!parse_bool("n"));
    assert!(!parse_bool("1"));
    assert!(parse_bool("  Y  "));
    assert!(!parse_bool("X marks the spot"));
  }

  #[test]
  fn test_split_list() {
    assert_eq!(split_list("publish, reject"), vec!["publish", "reject"]);
    assert_eq!(split_list("solo"), vec!["solo"]);
    assert!(split_list("").is_empty());
    assert!(split_list("   ").is_empty());
    assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
  }

  #[test]
  fn test_is_blank() {
    assert!(is_blank(&[]));
    assert!(is_blank(&[String::new()]));
    assert!(is_blank(&[String::new(), String::new()]));
    assert!(!is_blank(&[" ".to_string()]));
    assert!(!is_blank(&[String::new(), "x".to_string()]));
  }
}
