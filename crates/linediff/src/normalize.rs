//! Conversion of raw lines and characters into comparable tokens.
//!
//! Every token keeps the index of the raw element it was built from, so the
//! results always point at original content even when the equivalence rules
//! made distinct raw elements compare equal.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;

use crate::options::DiffOptions;

/// A comparable unit: a normalized line or character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<K> {
    /// Equality key after normalization
    pub key: K,

    /// Index of the untouched raw element
    pub original_index: usize,
}

/// An immutable ordered sequence of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence<K> {
    tokens: Vec<Token<K>>,

    /// Range of raw indices the sequence was built from
    span: Range<usize>,
}

impl<K> Sequence<K> {
    /// Build a sequence from tokens covering the raw range `span`.
    pub fn new(tokens: Vec<Token<K>>, span: Range<usize>) -> Self {
        Self { tokens, span }
    }

    /// Get the tokens
    pub fn tokens(&self) -> &[Token<K>] {
        &self.tokens
    }

    /// Get the number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the sequence has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the key of the token at `pos`
    pub fn key(&self, pos: usize) -> &K {
        &self.tokens[pos].key
    }

    /// Raw index of the boundary before position `pos` (`pos == len()` is
    /// the end of the covered raw range).
    pub fn raw_offset(&self, pos: usize) -> usize {
        match self.tokens.get(pos) {
            Some(token) => token.original_index,
            None => self.span.end,
        }
    }
}

/// Interned identity of a normalized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(u32);

/// Applies the configured equivalence rules.
///
/// A normalizer is meant to be used for one diff call: lines from both sides
/// are interned into the same table so equal lines share a [`LineId`].
#[derive(Debug)]
pub struct Normalizer<'o> {
    options: &'o DiffOptions,
    interned: HashMap<String, LineId>,
}

impl<'o> Normalizer<'o> {
    pub fn new(options: &'o DiffOptions) -> Self {
        Self {
            options,
            interned: HashMap::new(),
        }
    }

    /// Normalize a single line: case folding first, then trimming.
    pub fn normalize_line<'s>(&self, line: &'s str) -> Cow<'s, str> {
        let folded = if self.options.ignore_case {
            Cow::Owned(line.to_lowercase())
        } else {
            Cow::Borrowed(line)
        };

        if !self.options.ignore_whitespace {
            return folded;
        }
        match folded {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) => {
                let trimmed = s.trim();
                if trimmed.len() == s.len() {
                    Cow::Owned(s)
                } else {
                    Cow::Owned(trimmed.to_string())
                }
            }
        }
    }

    /// Turn raw lines into a sequence of interned line tokens.
    pub fn normalize_lines<S: AsRef<str>>(&mut self, raw: &[S]) -> Sequence<LineId> {
        let tokens = raw
            .iter()
            .enumerate()
            .map(|(index, line)| Token {
                key: self.intern(line.as_ref()),
                original_index: index,
            })
            .collect();
        Sequence::new(tokens, 0..raw.len())
    }

    fn intern(&mut self, line: &str) -> LineId {
        let normalized = self.normalize_line(line);
        if let Some(&id) = self.interned.get(normalized.as_ref()) {
            return id;
        }
        // More distinct lines than u32 can count cannot fit in memory anyway
        let id = LineId(self.interned.len() as u32);
        self.interned.insert(normalized.into_owned(), id);
        id
    }

    /// Turn the characters of one line into a token sequence.
    ///
    /// With `ignore_whitespace`, leading and trailing whitespace characters
    /// are left out; the remaining tokens keep their char offsets in `line`.
    pub fn normalize_chars(&self, line: &str) -> Sequence<char> {
        let chars: Vec<char> = line.chars().collect();
        let mut start = 0;
        let mut end = chars.len();
        if self.options.ignore_whitespace {
            while start < end && chars[start].is_whitespace() {
                start += 1;
            }
            while end > start && chars[end - 1].is_whitespace() {
                end -= 1;
            }
        }

        let tokens = chars[start..end]
            .iter()
            .enumerate()
            .map(|(offset, &c)| Token {
                key: self.fold_char(c),
                original_index: start + offset,
            })
            .collect();
        Sequence::new(tokens, start..end)
    }

    fn fold_char(&self, c: char) -> char {
        if self.options.ignore_case {
            // Multi-char lowercase mappings compare by their first char
            c.to_lowercase().next().unwrap_or(c)
        } else {
            c
        }
    }
}
