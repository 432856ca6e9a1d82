//! Minimal edit scripts between two token sequences.
//!
//! The cost table is the classic insert/delete edit distance:
//!
//! ```text
//! cost(i, j) = cost(i-1, j-1)                          if a[i-1] == b[j-1]
//!            = 1 + min(cost(i-1, j), cost(i, j-1))     otherwise
//! ```
//!
//! Only every k-th row (k ≈ √|a|) is stored while filling the table. The
//! backtrack walks from `(|a|, |b|)` to the origin one block at a time,
//! recomputing the at most k rows of the current block from its checkpoint.
//! Memory stays at O(√|a|·|b|) and the script is exactly the one a full table
//! would produce: Keep on a match, otherwise Delete when
//! `cost(i-1, j) <= cost(i, j-1)`, otherwise Insert.

use log::{debug, trace};

use crate::deadline::Deadline;
use crate::edit::EditOp;
use crate::normalize::{Sequence, Token};

/// Number of table cells filled between two deadline polls.
const POLL_CELLS: usize = 1 << 14;

/// Result of aligning two sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Complete script transforming the first sequence into the second
    pub ops: Vec<EditOp>,

    /// The deadline expired; `ops` is valid but may not be minimal
    pub timed_out: bool,
}

impl Alignment {
    /// Number of inserted plus deleted tokens.
    pub fn edit_distance(&self) -> usize {
        self.ops.iter().filter(|op| op.is_change()).count()
    }
}

/// Compute the edit script between `a` and `b`, giving up on minimality once
/// `deadline` expires.
pub fn align<K: Eq>(a: &Sequence<K>, b: &Sequence<K>, deadline: Deadline) -> Alignment {
    let a = a.tokens();
    let b = b.tokens();

    if a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.key == y.key) {
        let ops = (0..a.len())
            .map(|i| EditOp::Keep {
                original: i,
                modified: i,
            })
            .collect();
        return Alignment {
            ops,
            timed_out: false,
        };
    }

    // The backtrack keeps every trailing match, so the common suffix never
    // needs a table.
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x.key == y.key)
        .count();
    let n = a.len() - suffix;
    let m = b.len() - suffix;

    // Built back to front, reversed at the end.
    let mut rev_ops = Vec::with_capacity(a.len() + b.len());
    for k in 0..suffix {
        rev_ops.push(EditOp::Keep {
            original: a.len() - 1 - k,
            modified: b.len() - 1 - k,
        });
    }

    let timed_out = CostTable::new(&a[..n], &b[..m], deadline).backtrack_into(&mut rev_ops);
    rev_ops.reverse();

    Alignment {
        ops: rev_ops,
        timed_out,
    }
}

/// Edit distance between two sequences without a deadline.
pub fn edit_distance<K: Eq>(a: &Sequence<K>, b: &Sequence<K>) -> usize {
    align(a, b, Deadline::never()).edit_distance()
}

struct CostTable<'a, K> {
    a: &'a [Token<K>],
    b: &'a [Token<K>],
    deadline: Deadline,
    /// Row length, `|b| + 1`
    width: usize,
    /// Rows between two checkpoints
    stride: usize,
    /// Rows 0, stride, 2*stride, ... back to back
    checkpoints: Vec<u32>,
    cells_since_poll: usize,
}

impl<'a, K: Eq> CostTable<'a, K> {
    fn new(a: &'a [Token<K>], b: &'a [Token<K>], deadline: Deadline) -> Self {
        Self {
            a,
            b,
            deadline,
            width: b.len() + 1,
            stride: checkpoint_stride(a.len()),
            checkpoints: Vec::new(),
            cells_since_poll: 0,
        }
    }

    /// Fill `row` (row `i`) from `prev` (row `i - 1`).
    fn fill_row(&self, i: usize, prev: &[u32], row: &mut [u32]) {
        let key = &self.a[i - 1].key;
        row[0] = i as u32;
        for j in 1..self.width {
            row[j] = if *key == self.b[j - 1].key {
                prev[j - 1]
            } else {
                1 + prev[j].min(row[j - 1])
            };
        }
    }

    /// Account for `cells` of work and poll the clock when enough piled up.
    fn expired_after(&mut self, cells: usize) -> bool {
        self.cells_since_poll += cells;
        if self.cells_since_poll < POLL_CELLS {
            return false;
        }
        self.cells_since_poll = 0;
        self.deadline.is_expired()
    }

    /// Forward pass keeping only checkpoint rows. Returns `false` when the
    /// deadline expired before the table was complete.
    fn fill_checkpoints(&mut self) -> bool {
        let n = self.a.len();
        let mut prev: Vec<u32> = (0..self.width as u32).collect();
        let mut row = vec![0u32; self.width];
        self.checkpoints.extend_from_slice(&prev);

        for i in 1..=n {
            self.fill_row(i, &prev, &mut row);
            std::mem::swap(&mut prev, &mut row);
            if i % self.stride == 0 {
                self.checkpoints.extend_from_slice(&prev);
            }
            if self.expired_after(self.width) {
                return false;
            }
        }
        true
    }

    /// Push the reversed script for `a -> b` onto `rev_ops`. Returns whether
    /// the deadline cut the search short.
    fn backtrack_into(mut self, rev_ops: &mut Vec<EditOp>) -> bool {
        let n = self.a.len();
        let m = self.b.len();
        if n == 0 || m == 0 {
            push_remainder(rev_ops, n, m);
            return false;
        }

        trace!("aligning {}x{} cells with checkpoint stride {}", n, m, self.stride);
        if self.deadline.is_expired() || !self.fill_checkpoints() {
            debug!("alignment deadline expired while filling {}x{} table", n, m);
            push_remainder(rev_ops, n, m);
            return true;
        }

        let width = self.width;
        let mut block = vec![0u32; (self.stride + 1) * width];
        let mut i = n;
        let mut j = m;
        let mut timed_out = false;

        while i > 0 && j > 0 {
            let base = (i - 1) / self.stride * self.stride;
            let rows = i - base;
            if self.expired_after(rows * width) {
                debug!("alignment deadline expired during backtrack at ({}, {})", i, j);
                timed_out = true;
                break;
            }

            let checkpoint = base / self.stride * width;
            block[..width].copy_from_slice(&self.checkpoints[checkpoint..checkpoint + width]);
            for r in 1..=rows {
                let (done, rest) = block.split_at_mut(r * width);
                self.fill_row(base + r, &done[(r - 1) * width..], &mut rest[..width]);
            }

            while i > base && j > 0 {
                let r = i - base;
                if self.a[i - 1].key == self.b[j - 1].key {
                    rev_ops.push(EditOp::Keep {
                        original: i - 1,
                        modified: j - 1,
                    });
                    i -= 1;
                    j -= 1;
                } else if block[(r - 1) * width + j] <= block[r * width + j - 1] {
                    rev_ops.push(EditOp::Delete(i - 1));
                    i -= 1;
                } else {
                    rev_ops.push(EditOp::Insert(j - 1));
                    j -= 1;
                }
            }
        }

        push_remainder(rev_ops, i, j);
        timed_out
    }
}

/// Rows between checkpoints for a table with `rows` rows after row 0.
fn checkpoint_stride(rows: usize) -> usize {
    let mut stride = 1;
    while stride * stride < rows {
        stride += 1;
    }
    stride
}

/// Reversed script for `a[..n] -> b[..m]` as delete-all then insert-all.
fn push_remainder(rev_ops: &mut Vec<EditOp>, n: usize, m: usize) {
    rev_ops.extend((0..m).rev().map(EditOp::Insert));
    rev_ops.extend((0..n).rev().map(EditOp::Delete));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::apply;
    use std::time::Instant;

    fn seq(s: &str) -> Sequence<char> {
        let tokens = s
            .chars()
            .enumerate()
            .map(|(original_index, key)| Token {
                key,
                original_index,
            })
            .collect();
        Sequence::new(tokens, 0..s.chars().count())
    }

    fn full_table_distance(a: &[char], b: &[char]) -> usize {
        let mut cost = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for (i, row) in cost.iter_mut().enumerate() {
            row[0] = i;
        }
        for j in 0..=b.len() {
            cost[0][j] = j;
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                cost[i][j] = if a[i - 1] == b[j - 1] {
                    cost[i - 1][j - 1]
                } else {
                    1 + cost[i - 1][j].min(cost[i][j - 1])
                };
            }
        }
        cost[a.len()][b.len()]
    }

    #[test]
    fn test_identical_sequences_keep_everything() {
        let alignment = align(&seq("abc"), &seq("abc"), Deadline::never());
        assert!(!alignment.timed_out);
        assert_eq!(alignment.edit_distance(), 0);
        assert_eq!(alignment.ops.len(), 3);
    }

    #[test]
    fn test_delete_wins_ties() {
        let alignment = align(&seq("abc"), &seq("axc"), Deadline::never());
        assert_eq!(
            alignment.ops,
            vec![
                EditOp::Keep {
                    original: 0,
                    modified: 0
                },
                EditOp::Insert(1),
                EditOp::Delete(1),
                EditOp::Keep {
                    original: 2,
                    modified: 2
                },
            ]
        );
    }

    #[test]
    fn test_empty_sides() {
        let inserted = align(&seq(""), &seq("ab"), Deadline::never());
        assert_eq!(inserted.ops, vec![EditOp::Insert(0), EditOp::Insert(1)]);

        let deleted = align(&seq("ab"), &seq(""), Deadline::never());
        assert_eq!(deleted.ops, vec![EditOp::Delete(0), EditOp::Delete(1)]);
    }

    #[test]
    fn test_matches_full_table_across_blocks() {
        // Long enough for several checkpoint blocks
        let a: String = "the quick brown fox jumps over the lazy dog".repeat(3);
        let b: String = "a quick brown cat jumped over lazy dogs".repeat(3);
        let alignment = align(&seq(&a), &seq(&b), Deadline::never());

        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        assert_eq!(
            alignment.edit_distance(),
            full_table_distance(&a_chars, &b_chars)
        );
        assert_eq!(apply(&alignment.ops, &a_chars, &b_chars), Some(b_chars));
    }

    #[test]
    fn test_expired_deadline_falls_back_to_replace() {
        let alignment = align(&seq("abcdef"), &seq("xbcdy"), Deadline::at(Instant::now()));
        assert!(alignment.timed_out);

        let a: Vec<char> = "abcdef".chars().collect();
        let b: Vec<char> = "xbcdy".chars().collect();
        assert_eq!(apply(&alignment.ops, &a, &b), Some(b.clone()));
        assert_eq!(alignment.edit_distance(), a.len() + b.len());
    }

    #[test]
    fn test_checkpoint_stride() {
        assert_eq!(checkpoint_stride(0), 1);
        assert_eq!(checkpoint_stride(1), 1);
        assert_eq!(checkpoint_stride(10), 4);
        assert_eq!(checkpoint_stride(100), 10);
    }
}
