use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use flowsheet_codec::{Deserialized, deserialize, serialize};
use flowsheet_config::WorkflowDef;
use flowsheet_profile::FsProfile;

/// Flowsheet - workflow definitions as editable CSV sheets
#[derive(Parser)]
#[command(name = "flowsheet")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Parse and validate a workflow sheet, reporting any warnings
  Check {
    /// Path to the CSV sheet
    sheet: PathBuf,
  },

  /// Rewrite a hand-edited sheet into its canonical form
  Fmt {
    /// Path to the CSV sheet
    sheet: PathBuf,

    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Convert a workflow definition between CSV and JSON
  Convert {
    /// Path to the input file (CSV sheet or JSON definition)
    file: PathBuf,

    /// Target format
    #[arg(long)]
    to: Format,
  },

  /// Import every workflow sheet from a setup-profile directory
  Import {
    /// Profile root containing a workflow_csv/ directory
    profile_dir: PathBuf,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
  Json,
  Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Check { sheet }) => check(sheet).await?,
    Some(Commands::Fmt { sheet, output }) => fmt(sheet, output).await?,
    Some(Commands::Convert { file, to }) => convert(file, to).await?,
    Some(Commands::Import { profile_dir }) => import(profile_dir).await?,
    None => {
      println!("flowsheet - use --help to see available commands");
    }
  }

  Ok(())
}

async fn read_sheet(path: &PathBuf) -> Result<Deserialized> {
  let body = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read sheet: {}", path.display()))?;
  deserialize(&body).with_context(|| format!("failed to parse sheet: {}", path.display()))
}

async fn check(sheet: PathBuf) -> Result<()> {
  let parsed = read_sheet(&sheet).await?;
  let wf = &parsed.workflow;

  for warning in &parsed.warnings {
    eprintln!("warning: {warning}");
  }
  println!(
    "{}: {} states, {} transitions, {} worklists, {} scripts",
    wf.id,
    wf.states.len(),
    wf.transitions.len(),
    wf.worklists.len(),
    wf.scripts.len()
  );
  Ok(())
}

async fn fmt(sheet: PathBuf, output: Option<PathBuf>) -> Result<()> {
  let parsed = read_sheet(&sheet).await?;
  let canonical = serialize(&parsed.workflow);

  match output {
    Some(path) => tokio::fs::write(&path, canonical)
      .await
      .with_context(|| format!("failed to write: {}", path.display()))?,
    None => print!("{canonical}"),
  }
  Ok(())
}

async fn convert(file: PathBuf, to: Format) -> Result<()> {
  match to {
    Format::Json => {
      let parsed = read_sheet(&file).await?;
      println!("{}", serde_json::to_string_pretty(&parsed.workflow)?);
    }
    Format::Csv => {
      let body = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read definition: {}", file.display()))?;
      let workflow: WorkflowDef = serde_json::from_str(&body)
        .with_context(|| format!("failed to parse definition: {}", file.display()))?;
      print!("{}", serialize(&workflow));
    }
  }
  Ok(())
}

async fn import(profile_dir: PathBuf) -> Result<()> {
  if !profile_dir.is_dir() {
    bail!("not a directory: {}", profile_dir.display());
  }

  let report = FsProfile::new(&profile_dir)
    .import_workflows()
    .await
    .context("profile import failed")?;

  for skipped in &report.skipped {
    eprintln!("skipped (XML definition exists): {}", skipped.display());
  }
  for imported in &report.imported {
    for warning in &imported.warnings {
      eprintln!("warning [{}]: {warning}", imported.id);
    }
    println!(
      "imported {}: {} states, {} transitions",
      imported.id,
      imported.workflow.states.len(),
      imported.workflow.transitions.len()
    );
  }
  Ok(())
}
