use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One step of an edit script. Indices are positions in the compared
/// sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EditOp {
    /// The tokens at `original` and `modified` are equal and kept
    Keep { original: usize, modified: usize },

    /// The token at this original position is removed
    Delete(usize),

    /// The token at this modified position is added
    Insert(usize),
}

impl EditOp {
    /// Check if this step changes anything
    pub fn is_change(&self) -> bool {
        !matches!(self, EditOp::Keep { .. })
    }
}

/// Apply an edit script to `original`, producing the modified sequence.
///
/// Kept tokens are taken from `modified`, so lines that only compared equal
/// under the equivalence rules come out exactly as in `modified`. Returns
/// `None` if the script does not describe `original -> modified` in order.
pub fn apply<T: Clone>(ops: &[EditOp], original: &[T], modified: &[T]) -> Option<Vec<T>> {
    let mut out = Vec::with_capacity(modified.len());
    let mut a_pos = 0;
    let mut b_pos = 0;
    for op in ops {
        match *op {
            EditOp::Keep {
                original: i,
                modified: j,
            } => {
                if i != a_pos || j != b_pos || i >= original.len() {
                    return None;
                }
                out.push(modified.get(j)?.clone());
                a_pos += 1;
                b_pos += 1;
            }
            EditOp::Delete(i) => {
                if i != a_pos || i >= original.len() {
                    return None;
                }
                a_pos += 1;
            }
            EditOp::Insert(j) => {
                if j != b_pos {
                    return None;
                }
                out.push(modified.get(j)?.clone());
                b_pos += 1;
            }
        }
    }
    (a_pos == original.len() && b_pos == modified.len()).then_some(out)
}

/// A maximal run of changes between kept tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Region {
    pub a: Range<usize>,
    pub b: Range<usize>,
}

impl Region {
    fn empty_at(a: usize, b: usize) -> Self {
        Self { a: a..a, b: b..b }
    }

    pub fn is_modification(&self) -> bool {
        !self.a.is_empty() && !self.b.is_empty()
    }
}

/// Group an edit script into change regions.
pub(crate) fn regions(ops: &[EditOp]) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut open: Option<Region> = None;
    let mut a_pos = 0;
    let mut b_pos = 0;

    for op in ops {
        match op {
            EditOp::Keep { .. } => {
                if let Some(region) = open.take() {
                    regions.push(region);
                }
                a_pos += 1;
                b_pos += 1;
            }
            EditOp::Delete(_) => {
                open.get_or_insert_with(|| Region::empty_at(a_pos, b_pos)).a.end += 1;
                a_pos += 1;
            }
            EditOp::Insert(_) => {
                open.get_or_insert_with(|| Region::empty_at(a_pos, b_pos)).b.end += 1;
                b_pos += 1;
            }
        }
    }
    if let Some(region) = open {
        regions.push(region);
    }
    regions
}

/// Expand change regions back into a script over sequences of the given
/// lengths. Within a region, deletions come before insertions.
pub(crate) fn ops_from_regions(regions: &[Region], a_len: usize, b_len: usize) -> Vec<EditOp> {
    let mut ops = Vec::with_capacity(a_len.max(b_len));
    let mut a_pos = 0;
    let mut b_pos = 0;

    for region in regions {
        debug_assert_eq!(region.a.start - a_pos, region.b.start - b_pos);
        while a_pos < region.a.start {
            ops.push(EditOp::Keep {
                original: a_pos,
                modified: b_pos,
            });
            a_pos += 1;
            b_pos += 1;
        }
        ops.extend(region.a.clone().map(EditOp::Delete));
        ops.extend(region.b.clone().map(EditOp::Insert));
        a_pos = region.a.end;
        b_pos = region.b.end;
    }

    debug_assert_eq!(a_len - a_pos, b_len - b_pos);
    while a_pos < a_len {
        ops.push(EditOp::Keep {
            original: a_pos,
            modified: b_pos,
        });
        a_pos += 1;
        b_pos += 1;
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_group_runs() {
        let ops = vec![
            EditOp::Keep {
                original: 0,
                modified: 0,
            },
            EditOp::Insert(1),
            EditOp::Delete(1),
            EditOp::Keep {
                original: 2,
                modified: 2,
            },
            EditOp::Delete(3),
        ];
        let regions = regions(&ops);
        assert_eq!(
            regions,
            vec![
                Region { a: 1..2, b: 1..2 },
                Region { a: 3..4, b: 3..3 },
            ]
        );
    }

    #[test]
    fn test_round_trip_through_regions_still_applies() {
        let original = ["a", "b", "c", "d"];
        let modified = ["a", "x", "c"];
        let ops = vec![
            EditOp::Keep {
                original: 0,
                modified: 0,
            },
            EditOp::Insert(1),
            EditOp::Delete(1),
            EditOp::Keep {
                original: 2,
                modified: 2,
            },
            EditOp::Delete(3),
        ];
        let rebuilt = ops_from_regions(&regions(&ops), original.len(), modified.len());
        assert_eq!(apply(&rebuilt, &original, &modified), Some(modified.to_vec()));
        assert_eq!(rebuilt[1], EditOp::Delete(1));
        assert_eq!(rebuilt[2], EditOp::Insert(1));
    }

    #[test]
    fn test_apply_rejects_out_of_order_script() {
        let original = ["a", "b"];
        let modified = ["b"];
        let ops = vec![
            EditOp::Keep {
                original: 1,
                modified: 0,
            },
            EditOp::Delete(0),
        ];
        assert_eq!(apply(&ops, &original, &modified), None);
    }
}
