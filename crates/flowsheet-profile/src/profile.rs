use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use flowsheet_codec::{Deserializer, serialize};
use flowsheet_config::{CodecConfig, WorkflowDef};

use crate::error::ProfileError;

/// Directory holding the workflow sheets inside a profile.
const SHEET_DIR: &str = "workflow_csv";
/// Directory holding richer XML workflow definitions. When
/// `workflows/<id>/definition.xml` exists, the matching sheet is skipped.
const XML_DIR: &str = "workflows";

/// One sheet successfully imported from a profile directory.
#[derive(Debug)]
pub struct ImportedWorkflow {
  pub id: String,
  pub path: PathBuf,
  pub workflow: WorkflowDef,
  pub warnings: Vec<String>,
}

/// Outcome of scanning a profile directory.
#[derive(Debug, Default)]
pub struct ImportReport {
  pub imported: Vec<ImportedWorkflow>,
  /// Sheets shadowed by an XML definition, left untouched.
  pub skipped: Vec<PathBuf>,
}

/// Filesystem-based profile directory:
/// ```text
/// {root}/
/// ├── workflow_csv/
/// │   └── review.csv
/// └── workflows/
///     └── review/
///         └── definition.xml (optional, shadows review.csv)
/// ```
pub struct FsProfile {
  root: PathBuf,
  config: CodecConfig,
}

impl FsProfile {
  /// Open a profile at the given root, using default codec templates.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      config: CodecConfig::default(),
    }
  }

  /// Use an alternate template bundle for deserialization.
  pub fn with_config(mut self, config: CodecConfig) -> Self {
    self.config = config;
    self
  }

  /// Get the root directory of the profile.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Import every workflow sheet under `workflow_csv/`, skipping sheets
  /// shadowed by `workflows/<id>/definition.xml`. Sheets are processed
  /// in file-name order so reports are stable.
  pub async fn import_workflows(&self) -> Result<ImportReport, ProfileError> {
    let sheet_dir = self.root.join(SHEET_DIR);
    let mut report = ImportReport::default();

    if !sheet_dir.exists() {
      return Ok(report);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&sheet_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if path.extension().is_some_and(|ext| ext == "csv") {
        paths.push(path);
      }
    }
    paths.sort();

    for path in paths {
      let id = match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem.to_string(),
        None => continue,
      };

      let xml_path = self.root.join(XML_DIR).join(&id).join("definition.xml");
      if xml_path.exists() {
        warn!(
          "skipping CSV workflow definition in {} since {} exists",
          path.display(),
          xml_path.display()
        );
        report.skipped.push(path);
        continue;
      }

      let body = fs::read_to_string(&path).await?;
      let deserialized = Deserializer::new(&self.config)
        .deserialize(&body)
        .map_err(|source| ProfileError::InvalidSheet {
          path: path.clone(),
          source,
        })?;

      report.imported.push(ImportedWorkflow {
        id,
        path,
        workflow: deserialized.workflow,
        warnings: deserialized.warnings,
      });
    }

    Ok(report)
  }

  /// Write each definition to `workflow_csv/<id>.csv`, creating the
  /// directory when needed.
  pub async fn export_workflows(
    &self,
    workflows: &[WorkflowDef],
  ) -> Result<Vec<PathBuf>, ProfileError> {
    let sheet_dir = self.root.join(SHEET_DIR);
    fs::create_dir_all(&sheet_dir).await?;

    let mut written = Vec::with_capacity(workflows.len());
    for workflow in workflows {
      let path = sheet_dir.join(format!("{}.csv", workflow.id));
      fs::write(&path, serialize(workflow)).await?;
      written.push(path);
    }
    Ok(written)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SHEET: &str = "\
[Workflow]
Id:,review
Initial state:,private

[State]
Id:,private
Title:,Private
Permissions,Acquire,Manager
View,N,Y
";

  async fn seed_profile(sheets: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let sheet_dir = dir.path().join(SHEET_DIR);
    fs::create_dir_all(&sheet_dir).await.expect("sheet dir");
    for (id, body) in sheets {
      fs::write(sheet_dir.join(format!("{id}.csv")), body)
        .await
        .expect("write sheet");
    }
    dir
  }

  #[tokio::test]
  async fn test_imports_sheets_in_name_order() {
    let dir = seed_profile(&[("review", SHEET), ("another", SHEET)]).await;
    let report = FsProfile::new(dir.path())
      .import_workflows()
      .await
      .expect("import");

    assert_eq!(report.imported.len(), 2);
    assert_eq!(report.imported[0].id, "another");
    assert_eq!(report.imported[1].id, "review");
    assert_eq!(report.imported[1].workflow.id, "review");
    assert!(report.skipped.is_empty());
  }

  #[tokio::test]
  async fn test_xml_definition_shadows_sheet() {
    let dir = seed_profile(&[("review", SHEET)]).await;
    let xml_dir = dir.path().join(XML_DIR).join("review");
    fs::create_dir_all(&xml_dir).await.expect("xml dir");
    fs::write(xml_dir.join("definition.xml"), "<dc-workflow/>")
      .await
      .expect("write xml");

    let report = FsProfile::new(dir.path())
      .import_workflows()
      .await
      .expect("import");

    assert!(report.imported.is_empty());
    assert_eq!(report.skipped.len(), 1);
  }

  #[tokio::test]
  async fn test_invalid_sheet_names_its_path() {
    let dir = seed_profile(&[("broken", "[Workflow]\nId:,x\n")]).await;
    let err = FsProfile::new(dir.path())
      .import_workflows()
      .await
      .expect_err("broken sheet");
    assert!(err.to_string().contains("broken.csv"));
  }

  #[tokio::test]
  async fn test_export_then_import_round_trips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let profile = FsProfile::new(dir.path());

    let parsed = flowsheet_codec::deserialize(SHEET).expect("sheet");
    profile
      .export_workflows(std::slice::from_ref(&parsed.workflow))
      .await
      .expect("export");

    let report = profile.import_workflows().await.expect("import");
    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].workflow, parsed.workflow);
  }

  #[tokio::test]
  async fn test_missing_sheet_dir_is_empty_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let report = FsProfile::new(dir.path())
      .import_workflows()
      .await
      .expect("import");
    assert!(report.imported.is_empty());
    assert!(report.skipped.is_empty());
  }
}
