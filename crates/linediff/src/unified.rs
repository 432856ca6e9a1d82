//! Unified diff rendering of a [`DiffResult`].

use std::fmt;
use std::ops::Range;

use crate::change::{DiffResult, LineChange};

/// Default number of context lines around each change.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Renders a diff result in the conventional unified format.
///
/// ```text
/// --- a
/// +++ b
/// @@ -1,3 +1,3 @@
///  unchanged
/// -deleted
/// +added
/// ```
pub struct UnifiedDiff<'a, S> {
    result: &'a DiffResult,
    original: &'a [S],
    modified: &'a [S],
    old_label: String,
    new_label: String,
    context_lines: usize,
}

impl<'a, S: AsRef<str>> UnifiedDiff<'a, S> {
    /// Prepare rendering of `result`, computed from `original` and `modified`.
    pub fn new(result: &'a DiffResult, original: &'a [S], modified: &'a [S]) -> Self {
        Self {
            result,
            original,
            modified,
            old_label: "a".to_string(),
            new_label: "b".to_string(),
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }

    /// Set the labels printed in the `---`/`+++` header.
    #[must_use]
    pub fn labels(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.old_label = old.into();
        self.new_label = new.into();
        self
    }

    /// Set the number of context lines.
    #[must_use]
    pub fn context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    /// Group changes whose context windows touch into hunks.
    fn hunks(&self) -> Vec<&'a [LineChange]> {
        let changes = self.result.changes();
        let mut hunks = Vec::new();
        let mut start = 0;
        for idx in 1..changes.len() {
            let gap = changes[idx].original_start - changes[idx - 1].original_end;
            if gap > 2 * self.context_lines {
                hunks.push(&changes[start..idx]);
                start = idx;
            }
        }
        if start < changes.len() {
            hunks.push(&changes[start..]);
        }
        hunks
    }

    fn write_hunk(&self, f: &mut fmt::Formatter<'_>, hunk: &[LineChange]) -> fmt::Result {
        let (Some(first), Some(last)) = (hunk.first(), hunk.last()) else {
            return Ok(());
        };
        let before = self.context_lines.min(first.original_start);
        let after = self
            .context_lines
            .min(self.original.len() - last.original_end);

        let old = first.original_start - before..last.original_end + after;
        let new = first.modified_start - before..last.modified_end + after;
        writeln!(f, "@@ -{} +{} @@", HunkRange(&old), HunkRange(&new))?;

        let mut a_pos = old.start;
        for change in hunk {
            for line in &self.original[a_pos..change.original_start] {
                writeln!(f, " {}", line.as_ref())?;
            }
            for line in &self.original[change.original_range()] {
                writeln!(f, "-{}", line.as_ref())?;
            }
            for line in &self.modified[change.modified_range()] {
                writeln!(f, "+{}", line.as_ref())?;
            }
            a_pos = change.original_end;
        }
        for line in &self.original[a_pos..old.end] {
            writeln!(f, " {}", line.as_ref())?;
        }
        Ok(())
    }
}

impl<S: AsRef<str>> fmt::Display for UnifiedDiff<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.result.has_changes() {
            return Ok(());
        }
        writeln!(f, "--- {}", self.old_label)?;
        writeln!(f, "+++ {}", self.new_label)?;
        for hunk in self.hunks() {
            self.write_hunk(f, hunk)?;
        }
        Ok(())
    }
}

/// `start,len` with a 1-based start; an empty range names the line before it.
struct HunkRange<'r>(&'r Range<usize>);

impl fmt::Display for HunkRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.len();
        let start = if len == 0 { self.0.start } else { self.0.start + 1 };
        write!(f, "{},{}", start, len)
    }
}
