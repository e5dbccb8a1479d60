//! Delimiter detection for hand-edited input.
//!
//! An input-normalization convenience, not a correctness requirement:
//! detection failure always falls back to the standard comma dialect and
//! is never surfaced as an error.

const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
const SAMPLE_BYTES: usize = 1024;
const SAMPLE_LINES: usize = 10;

/// Guess the delimiter from a leading sample of the input by counting
/// candidate bytes outside quoted regions. Ties and empty samples fall
/// back to a comma.
pub fn sniff_delimiter(input: &str) -> u8 {
  let sample = leading_sample(input);

  let mut counts = [0usize; CANDIDATES.len()];
  for line in sample.lines().filter(|l| !l.is_empty()).take(SAMPLE_LINES) {
    let mut in_quotes = false;
    for b in line.bytes() {
      if b == b'"' {
        in_quotes = !in_quotes;
      } else if !in_quotes
        && let Some(idx) = CANDIDATES.iter().position(|c| *c == b)
      {
        counts[idx] += 1;
      }
    }
  }

  let mut best = b',';
  let mut best_count = 0;
  for (idx, count) in counts.iter().enumerate() {
    if *count > best_count {
      best = CANDIDATES[idx];
      best_count = *count;
    }
  }
  best
}

/// First `SAMPLE_BYTES` of the input, backed off to a char boundary.
fn leading_sample(input: &str) -> &str {
  if input.len() <= SAMPLE_BYTES {
    return input;
  }
  let mut end = SAMPLE_BYTES;
  while !input.is_char_boundary(end) {
    end -= 1;
  }
  &input[..end]
}
