use std::borrow::Cow;

use ropey::Rope;

use crate::change::DiffResult;
use crate::engine::DiffEngine;
use crate::error::DiffError;
use crate::options::DiffOptions;
use crate::unified::UnifiedDiff;

/// Represents a diff between two whole texts
#[derive(Debug, Clone)]
pub struct TextDiff {
    /// The old version of the text
    old_text: Rope,

    /// The new version of the text
    new_text: Rope,

    /// The line level result
    result: DiffResult,
}

impl TextDiff {
    /// Create a diff between two texts with the given options
    pub fn diff(old_text: &str, new_text: &str, options: DiffOptions) -> Result<Self, DiffError> {
        let engine = DiffEngine::new(options)?;
        Ok(Self::new(old_text, new_text, &engine))
    }

    /// Create a diff between two texts
    pub fn new(old_text: &str, new_text: &str, engine: &DiffEngine) -> Self {
        Self::from_ropes(Rope::from_str(old_text), Rope::from_str(new_text), engine)
    }

    /// Create a diff between two ropes
    pub fn from_ropes(old_text: Rope, new_text: Rope, engine: &DiffEngine) -> Self {
        let result = {
            let old_lines = split_lines(&old_text);
            let new_lines = split_lines(&new_text);
            engine.diff(&old_lines, &new_lines)
        };
        Self {
            old_text,
            new_text,
            result,
        }
    }

    /// Get the old text
    pub fn old_text(&self) -> &Rope {
        &self.old_text
    }

    /// Get the new text
    pub fn new_text(&self) -> &Rope {
        &self.new_text
    }

    /// Get the diff result
    pub fn result(&self) -> &DiffResult {
        &self.result
    }

    /// Get the lines of the old text, without terminators
    pub fn old_lines(&self) -> Vec<Cow<'_, str>> {
        split_lines(&self.old_text)
    }

    /// Get the lines of the new text, without terminators
    pub fn new_lines(&self) -> Vec<Cow<'_, str>> {
        split_lines(&self.new_text)
    }

    /// Get a line of the old text
    pub fn old_line(&self, index: usize) -> Option<Cow<'_, str>> {
        line_at(&self.old_text, index)
    }

    /// Get a line of the new text
    pub fn new_line(&self, index: usize) -> Option<Cow<'_, str>> {
        line_at(&self.new_text, index)
    }

    /// Generate a unified diff string (like git diff)
    pub fn unified_diff(&self, context_lines: usize) -> String {
        let old_lines = self.old_lines();
        let new_lines = self.new_lines();
        UnifiedDiff::new(&self.result, &old_lines, &new_lines)
            .context_lines(context_lines)
            .to_string()
    }
}

/// Number of lines in `rope`, not counting the empty line ropey reports
/// after a trailing line break.
pub fn line_count(rope: &Rope) -> usize {
    let lines = rope.len_lines();
    if rope.line(lines - 1).len_chars() == 0 {
        lines - 1
    } else {
        lines
    }
}

/// Split `rope` into lines with their terminators removed.
pub fn split_lines(rope: &Rope) -> Vec<Cow<'_, str>> {
    (0..line_count(rope))
        .map(|index| strip_line_ending(rope.line(index).into()))
        .collect()
}

fn line_at(rope: &Rope, index: usize) -> Option<Cow<'_, str>> {
    (index < line_count(rope)).then(|| strip_line_ending(rope.line(index).into()))
}

fn strip_line_ending(line: Cow<'_, str>) -> Cow<'_, str> {
    let content_len = if line.ends_with("\r\n") {
        line.len() - 2
    } else {
        match line.chars().next_back() {
            Some(c @ ('\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')) => {
                line.len() - c.len_utf8()
            }
            _ => line.len(),
        }
    };

    match line {
        Cow::Borrowed(s) => Cow::Borrowed(&s[..content_len]),
        Cow::Owned(mut s) => {
            s.truncate(content_len);
            Cow::Owned(s)
        }
    }
}
