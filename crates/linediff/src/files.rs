use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use ropey::Rope;

use crate::engine::DiffEngine;
use crate::text_diff::TextDiff;

/// Load a UTF-8 text file into a rope.
pub fn read_rope(path: impl AsRef<Path>) -> Result<Rope> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Rope::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read {} as UTF-8 text", path.display()))
}

/// Diff the contents of two files.
pub fn compare_files(
    old_path: impl AsRef<Path>,
    new_path: impl AsRef<Path>,
    engine: &DiffEngine,
) -> Result<TextDiff> {
    let old_text = read_rope(old_path)?;
    let new_text = read_rope(new_path)?;
    Ok(TextDiff::from_ropes(old_text, new_text, engine))
}
