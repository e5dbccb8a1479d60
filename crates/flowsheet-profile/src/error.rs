use std::path::PathBuf;

use thiserror::Error;

use flowsheet_codec::ParsingError;

#[derive(Debug, Error)]
pub enum ProfileError {
  #[error("failed to access profile entry: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid workflow sheet {}: {source}", path.display())]
  InvalidSheet {
    path: PathBuf,
    #[source]
    source: ParsingError,
  },
}
