// ============================================================
// Layer 4 — Label File Loader
// ============================================================
// Reads gold or predicted relation labels dumped by the
// training driver: whitespace-separated non-negative integers,
// usually one per line.
//
//   12
//   0
//   79
//
// Blank lines are ignored. Anything that is not an integer is
// an error carrying its 1-based line number.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Parse labels from a string.
pub fn parse_labels(text: &str) -> Result<Vec<usize>> {
    let mut labels = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            let label: usize = token
                .parse()
                .with_context(|| format!("line {}: '{}' is not a label id", line_no + 1, token))?;
            labels.push(label);
        }
    }

    Ok(labels)
}

/// Read a label file from disk.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read label file '{}'", path.display()))?;

    let labels = parse_labels(&text)
        .with_context(|| format!("Invalid label file '{}'", path.display()))?;

    tracing::debug!("Loaded {} labels from '{}'", labels.len(), path.display());
    Ok(labels)
}
