use crate::error::ParsingError;

/// One logical row of the sheet. A row with no cells (or only empty
/// cells) is a section terminator.
pub type Row = Vec<String>;

/// A single-pass cursor over the sheet's rows, shared between the
/// dispatch loop and the active section handler. Each handler consumes
/// rows up to and including its terminating blank row and returns with
/// the cursor positioned just past it. No backtracking.
pub struct RowCursor {
  rows: Vec<Row>,
  pos: usize,
}

impl RowCursor {
  /// Parse the whole input into rows with the given delimiter.
  ///
  /// The CSV reader silently drops fully empty lines, but blank rows are
  /// the section terminators of this format, so they are reconstructed
  /// here: whenever consecutive records are separated by more lines than
  /// the earlier record spans, an empty row is inserted between them.
  pub fn from_csv(input: &str, delimiter: u8) -> Result<Self, ParsingError> {
    let mut reader = csv::ReaderBuilder::new()
      .has_headers(false)
      .flexible(true)
      .delimiter(delimiter)
      .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    let mut next_line: Option<u64> = None;
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
      let cells: Row = record.iter().map(str::to_string).collect();
      let embedded_newlines: u64 = cells
        .iter()
        .map(|cell| cell.matches('\n').count() as u64)
        .sum();
      // `record.position()` reports the line the reader resumed at, which
      // is the first of any skipped blank lines rather than the record's
      // own line. The reader's post-read position (the line just past the
      // record) is exact, so derive the start from it instead.
      let start = reader
        .position()
        .line()
        .saturating_sub(embedded_newlines + 1);
      if let Some(expected) = next_line
        && start > expected
      {
        rows.push(Row::new());
      }

      next_line = Some(start + embedded_newlines + 1);
      rows.push(cells);
    }

    Ok(Self { rows, pos: 0 })
  }

  /// Advance to the next row. `None` at end of input.
  pub fn next_row(&mut self) -> Option<&[String]> {
    let row = self.rows.get(self.pos)?;
    self.pos += 1;
    Some(row)
  }
}
