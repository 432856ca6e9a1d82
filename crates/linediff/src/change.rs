use derive_more::Display;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edit::{ops_from_regions, EditOp, Region};

/// Represents the kind of a line change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeType {
    /// Lines only exist in the modified sequence
    #[display(fmt = "Added")]
    Added,

    /// Lines only exist in the original sequence
    #[display(fmt = "Deleted")]
    Deleted,

    /// Lines were replaced
    #[display(fmt = "Modified")]
    Modified,
}

/// A changed span within one pair of lines.
///
/// Offsets count `char`s within the two lines named by `original_line` and
/// `modified_line`, not positions in the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CharChange {
    /// Index of the annotated line in the original sequence
    pub original_line: usize,

    /// Index of the annotated line in the modified sequence
    pub modified_line: usize,

    pub original_start: usize,
    pub original_length: usize,
    pub modified_start: usize,
    pub modified_length: usize,
}

impl CharChange {
    /// Get the changed char range in the original line
    pub fn original_range(&self) -> Range<usize> {
        self.original_start..self.original_start + self.original_length
    }

    /// Get the changed char range in the modified line
    pub fn modified_range(&self) -> Range<usize> {
        self.modified_start..self.modified_start + self.modified_length
    }
}

/// A contiguous changed region. Ranges are half-open line indices; an empty
/// range marks a pure insertion or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineChange {
    pub original_start: usize,
    pub original_end: usize,
    pub modified_start: usize,
    pub modified_end: usize,

    /// Character level detail, only on modifications and only when requested
    pub char_changes: Option<Vec<CharChange>>,
}

impl LineChange {
    /// Create a change without character detail
    pub fn new(
        original_start: usize,
        original_end: usize,
        modified_start: usize,
        modified_end: usize,
    ) -> Self {
        debug_assert!(original_start <= original_end && modified_start <= modified_end);
        Self {
            original_start,
            original_end,
            modified_start,
            modified_end,
            char_changes: None,
        }
    }

    pub(crate) fn from_region(region: &Region) -> Self {
        Self::new(region.a.start, region.a.end, region.b.start, region.b.end)
    }

    pub(crate) fn to_region(&self) -> Region {
        Region {
            a: self.original_range(),
            b: self.modified_range(),
        }
    }

    /// Get the original line range
    pub fn original_range(&self) -> Range<usize> {
        self.original_start..self.original_end
    }

    /// Get the modified line range
    pub fn modified_range(&self) -> Range<usize> {
        self.modified_start..self.modified_end
    }

    /// Get the kind of this change
    pub fn change_type(&self) -> ChangeType {
        if self.original_start == self.original_end {
            ChangeType::Added
        } else if self.modified_start == self.modified_end {
            ChangeType::Deleted
        } else {
            ChangeType::Modified
        }
    }

    /// Check if both sides are non-empty
    pub fn is_modification(&self) -> bool {
        self.change_type() == ChangeType::Modified
    }
}

/// The outcome of a diff: changed regions in scan order plus whether the
/// time budget ran out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffResult {
    /// The changes, kept regions are the gaps between them
    pub changes: Vec<LineChange>,

    /// A stage hit its deadline; the result is valid but may not be minimal
    pub timed_out: bool,
}

impl DiffResult {
    pub fn new(changes: Vec<LineChange>, timed_out: bool) -> Self {
        Self { changes, timed_out }
    }

    /// Get the changes
    pub fn changes(&self) -> &[LineChange] {
        &self.changes
    }

    /// Get the number of changes
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// Check if the diff has any changes
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Get the number of added lines
    pub fn added_lines(&self) -> usize {
        self.changes.iter().map(|c| c.modified_range().len()).sum()
    }

    /// Get the number of deleted lines
    pub fn deleted_lines(&self) -> usize {
        self.changes.iter().map(|c| c.original_range().len()).sum()
    }

    /// Check that the changes plus the gaps between them exactly cover
    /// sequences of the given lengths, in order and without overlap.
    pub fn is_valid_cover(&self, original_len: usize, modified_len: usize) -> bool {
        let mut a_pos = 0;
        let mut b_pos = 0;
        for change in &self.changes {
            if change.original_start < a_pos
                || change.modified_start < b_pos
                || change.original_start > change.original_end
                || change.modified_start > change.modified_end
                || change.original_start - a_pos != change.modified_start - b_pos
                || (change.original_start == change.original_end
                    && change.modified_start == change.modified_end)
            {
                return false;
            }
            if change.char_changes.is_some() && !change.is_modification() {
                return false;
            }
            a_pos = change.original_end;
            b_pos = change.modified_end;
        }
        original_len >= a_pos && modified_len >= b_pos && original_len - a_pos == modified_len - b_pos
    }

    /// Rebuild the Keep/Delete/Insert script described by this result.
    pub fn edit_script(&self, original_len: usize, modified_len: usize) -> Vec<EditOp> {
        let regions: Vec<Region> = self.changes.iter().map(LineChange::to_region).collect();
        ops_from_regions(&regions, original_len, modified_len)
    }
}
