//! Heuristic clean-up of raw edit scripts.
//!
//! A minimal script often has several equally minimal placements for a run
//! of insertions or deletions. These rewrites pick the placement a reader
//! expects (around blank lines, on word boundaries) and fold modifications
//! separated by a lone blank token into one. The result still transforms
//! the first sequence into the second.

use log::trace;

use crate::edit::{ops_from_regions, regions, EditOp, Region};
use crate::normalize::Sequence;

/// Upper bound on rewrite passes over one script.
pub const MAX_PASSES: usize = 8;

/// Boundary scoring for one side of a diff, indexed by sequence position.
pub trait Prettify {
    /// Number of tokens on this side
    fn len(&self) -> usize;

    /// Whether the token at `pos` carries no meaningful content
    fn is_blank(&self, pos: usize) -> bool;

    /// How natural a change boundary just before `pos` looks (`pos` may be
    /// `len()`). Higher is better.
    fn boundary_score(&self, pos: usize) -> u32;
}

/// Line view: boundaries next to blank lines score highest.
pub struct LineView<'a, S> {
    lines: &'a [S],
}

impl<'a, S: AsRef<str>> LineView<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self { lines }
    }
}

impl<S: AsRef<str>> Prettify for LineView<'_, S> {
    fn len(&self) -> usize {
        self.lines.len()
    }

    fn is_blank(&self, pos: usize) -> bool {
        self.lines[pos].as_ref().trim().is_empty()
    }

    fn boundary_score(&self, pos: usize) -> u32 {
        if pos == 0 || pos == self.len() {
            return 3;
        }
        let mut score = 0;
        if self.is_blank(pos - 1) {
            score += 2;
        }
        if self.is_blank(pos) {
            score += 1;
        }
        score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Punctuation,
    Word,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_alphanumeric() || c == '_' {
            CharClass::Word
        } else {
            CharClass::Punctuation
        }
    }
}

/// Character view: boundaries at whitespace and word edges score highest.
pub struct CharView {
    chars: Vec<char>,
}

impl CharView {
    /// Build the view for `seq`, whose tokens were taken from `raw`.
    pub fn new(seq: &Sequence<char>, raw: &[char]) -> Self {
        let chars = seq
            .tokens()
            .iter()
            .map(|token| raw[token.original_index])
            .collect();
        Self { chars }
    }
}

impl Prettify for CharView {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn is_blank(&self, pos: usize) -> bool {
        self.chars[pos].is_whitespace()
    }

    fn boundary_score(&self, pos: usize) -> u32 {
        if pos == 0 || pos == self.len() {
            return 3;
        }
        let before = CharClass::of(self.chars[pos - 1]);
        let after = CharClass::of(self.chars[pos]);
        let mut score = 0;
        if before == CharClass::Whitespace {
            score += 2;
        }
        if after == CharClass::Whitespace {
            score += 1;
        }
        if before != after {
            score += 1;
        }
        score
    }
}

/// Rewrite `ops` (a script from `a` to `b`) into a prettier equivalent.
pub fn post_process<K: Eq, P: Prettify>(
    ops: Vec<EditOp>,
    a: &Sequence<K>,
    b: &Sequence<K>,
    a_view: &P,
    b_view: &P,
) -> Vec<EditOp> {
    let mut regions = regions(&ops);
    if regions.is_empty() {
        return ops;
    }

    for pass in 0..MAX_PASSES {
        let slid = slide_regions(&mut regions, a, b, a_view, b_view);
        let merged = merge_regions(&mut regions, a_view, b_view);
        if !slid && !merged {
            trace!("post-processing settled after {} passes", pass + 1);
            break;
        }
    }

    ops_from_regions(&regions, a.len(), b.len())
}

/// Move pure insertions/deletions to their best-scoring legal position.
fn slide_regions<K: Eq, P: Prettify>(
    regions: &mut [Region],
    a: &Sequence<K>,
    b: &Sequence<K>,
    a_view: &P,
    b_view: &P,
) -> bool {
    let mut changed = false;

    for idx in 0..regions.len() {
        let region = &regions[idx];
        let gap_before = match idx.checked_sub(1) {
            // One kept token must stay between neighbours
            Some(prev) => (region.a.start - regions[prev].a.end).saturating_sub(1),
            None => region.a.start,
        };
        let gap_after = match regions.get(idx + 1) {
            Some(next) => (next.a.start - region.a.end).saturating_sub(1),
            None => a.len() - region.a.end,
        };

        let offset = if region.b.is_empty() && !region.a.is_empty() {
            best_offset(region.a.clone(), gap_before, gap_after, a, a_view)
        } else if region.a.is_empty() && !region.b.is_empty() {
            best_offset(region.b.clone(), gap_before, gap_after, b, b_view)
        } else {
            0
        };

        if offset != 0 {
            let region = &mut regions[idx];
            region.a = shift(&region.a, offset);
            region.b = shift(&region.b, offset);
            changed = true;
        }
    }
    changed
}

/// Best offset for the changed run `range` on one side, moving at most
/// `max_up` tokens up or `max_down` tokens down.
fn best_offset<K: Eq, P: Prettify>(
    range: std::ops::Range<usize>,
    max_up: usize,
    max_down: usize,
    seq: &Sequence<K>,
    view: &P,
) -> isize {
    let mut up = 0;
    while up < max_up && seq.key(range.start - up - 1) == seq.key(range.end - up - 1) {
        up += 1;
    }
    let mut down = 0;
    while down < max_down && seq.key(range.start + down) == seq.key(range.end + down) {
        down += 1;
    }

    let score = |offset: isize| {
        let start = range.start.wrapping_add_signed(offset);
        let end = range.end.wrapping_add_signed(offset);
        view.boundary_score(start) + view.boundary_score(end)
    };

    let mut best = 0;
    let mut best_score = score(0);
    for offset in -(up as isize)..=(down as isize) {
        if offset == 0 {
            continue;
        }
        let candidate = score(offset);
        if candidate > best_score {
            best = offset;
            best_score = candidate;
        }
    }
    best
}

fn shift(range: &std::ops::Range<usize>, offset: isize) -> std::ops::Range<usize> {
    range.start.wrapping_add_signed(offset)..range.end.wrapping_add_signed(offset)
}

/// Fold modifications separated by one blank kept token.
fn merge_regions<P: Prettify>(regions: &mut Vec<Region>, a_view: &P, b_view: &P) -> bool {
    let mut changed = false;
    let mut idx = 1;

    while idx < regions.len() {
        let prev = &regions[idx - 1];
        let next = &regions[idx];
        let foldable = prev.is_modification()
            && next.is_modification()
            && next.a.start - prev.a.end == 1
            && a_view.is_blank(prev.a.end)
            && b_view.is_blank(prev.b.end);

        if foldable {
            let next = regions.remove(idx);
            let prev = &mut regions[idx - 1];
            prev.a.end = next.a.end;
            prev.b.end = next.b.end;
            changed = true;
        } else {
            idx += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::deadline::Deadline;
    use crate::edit::apply;
    use crate::normalize::Normalizer;
    use crate::options::DiffOptions;

    fn lines_pretty(a: &[&str], b: &[&str]) -> Vec<Region> {
        let options = DiffOptions::default();
        let mut normalizer = Normalizer::new(&options);
        let sa = normalizer.normalize_lines(a);
        let sb = normalizer.normalize_lines(b);
        let raw = align(&sa, &sb, Deadline::never()).ops;
        let ops = post_process(raw, &sa, &sb, &LineView::new(a), &LineView::new(b));
        assert_eq!(apply(&ops, a, b), Some(b.to_vec()));
        regions(&ops)
    }

    #[test]
    fn test_insertion_starts_after_blank_line() {
        let a = ["fn a() {}", "", "fn c() {}"];
        let b = ["fn a() {}", "", "fn b() {}", "", "fn c() {}"];
        assert_eq!(lines_pretty(&a, &b), vec![Region { a: 2..2, b: 2..4 }]);
    }

    #[test]
    fn test_appended_block_includes_closing_line() {
        let a = ["}"];
        let b = ["}", "", "fn x() {", "}"];
        assert_eq!(lines_pretty(&a, &b), vec![Region { a: 1..1, b: 1..4 }]);
    }

    #[test]
    fn test_modifications_around_blank_line_merge() {
        let a = ["one", "", "two"];
        let b = ["uno", "", "dos"];
        assert_eq!(lines_pretty(&a, &b), vec![Region { a: 0..3, b: 0..3 }]);
    }

    #[test]
    fn test_pure_regions_around_blank_line_stay_apart() {
        let a = ["one", "", "two"];
        let b = [""];
        let regions = lines_pretty(&a, &b);
        assert!(regions.iter().all(|r| r.b.is_empty()));
    }

    #[test]
    fn test_char_insertion_lands_on_word_boundary() {
        let options = DiffOptions::default();
        let normalizer = Normalizer::new(&options);
        let a_raw: Vec<char> = "foo bar".chars().collect();
        let b_raw: Vec<char> = "foo baz bar".chars().collect();
        let sa = normalizer.normalize_chars("foo bar");
        let sb = normalizer.normalize_chars("foo baz bar");
        let raw = align(&sa, &sb, Deadline::never()).ops;
        let ops = post_process(
            raw,
            &sa,
            &sb,
            &CharView::new(&sa, &a_raw),
            &CharView::new(&sb, &b_raw),
        );

        assert_eq!(apply(&ops, &a_raw, &b_raw), Some(b_raw.clone()));
        assert_eq!(regions(&ops), vec![Region { a: 4..4, b: 4..8 }]);
    }

    #[test]
    fn test_boundary_scores() {
        let lines = ["a", "", "b"];
        let view = LineView::new(&lines);
        assert_eq!(view.boundary_score(0), 3);
        assert_eq!(view.boundary_score(1), 1);
        assert_eq!(view.boundary_score(2), 2);
        assert_eq!(view.boundary_score(3), 3);
    }
}
