use crate::cell::normalize;

/// The section kinds the deserializer understands. Adding a section is a
/// compile-time-checked change: extend the enum and the dispatch match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
  Workflow,
  State,
  Transition,
  Script,
}

impl SectionKind {
  /// Match a normalized section tag.
  pub fn from_tag(tag: &str) -> Option<Self> {
    match tag {
      "workflow" => Some(SectionKind::Workflow),
      "state" => Some(SectionKind::State),
      "transition" => Some(SectionKind::Transition),
      "script" => Some(SectionKind::Script),
      _ => None,
    }
  }
}

/// Return the normalized tag if a row is a section header, i.e. its
/// first cell (after trimming) is a non-empty bracketed tag like
/// `[State]`.
pub fn section_tag(row: &[String]) -> Option<String> {
  let cell = row.first()?.trim();
  if cell.len() > 2 && cell.starts_with('[') && cell.ends_with(']') {
    Some(normalize(cell))
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
  }

  #[test]
  fn test_section_tag_recognized() {
    assert_eq!(section_tag(&row(&["[Workflow]"])), Some("workflow".into()));
    assert_eq!(section_tag(&row(&["  [State]  "])), Some("state".into()));
    assert_eq!(section_tag(&row(&["[Custom Notes]"])), Some("custom-notes".into()));
  }

  #[test]
  fn test_section_tag_rejected() {
    assert_eq!(section_tag(&row(&["Id:", "review"])), None);
    assert_eq!(section_tag(&row(&["[]"])), None);
    assert_eq!(section_tag(&row(&[""])), None);
    assert_eq!(section_tag(&[]), None);
  }

  #[test]
  fn test_from_tag() {
    assert_eq!(SectionKind::from_tag("workflow"), Some(SectionKind::Workflow));
    assert_eq!(SectionKind::from_tag("script"), Some(SectionKind::Script));
    assert_eq!(SectionKind::from_tag("custom-notes"), None);
  }
}
