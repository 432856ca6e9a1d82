use log::debug;

use crate::align::align;
use crate::change::{CharChange, LineChange};
use crate::deadline::Deadline;
use crate::edit::regions;
use crate::normalize::Normalizer;
use crate::options::DiffOptions;
use crate::postprocess::{post_process, CharView};

/// Character level refinement of modified line regions.
///
/// Lines of a modification region are paired by position; each pair is
/// aligned on its own against an equal share of the time left.
pub struct IntralineRefiner<'o> {
    options: &'o DiffOptions,
}

impl<'o> IntralineRefiner<'o> {
    pub fn new(options: &'o DiffOptions) -> Self {
        Self { options }
    }

    /// Attach char changes to the modification regions of `changes`.
    ///
    /// Returns `true` if the deadline cut refinement short. Regions that were
    /// not fully refined carry no char detail at all.
    pub fn refine<S: AsRef<str>>(
        &self,
        changes: &mut [LineChange],
        original: &[S],
        modified: &[S],
        deadline: Deadline,
    ) -> bool {
        let mut pairs_left: usize = changes
            .iter()
            .filter(|c| c.is_modification())
            .map(|c| c.original_range().len().min(c.modified_range().len()))
            .sum();
        let mut timed_out = false;

        'regions: for change in changes.iter_mut().filter(|c| c.is_modification()) {
            let pairs = change.original_range().len().min(change.modified_range().len());
            let mut spans = Vec::new();

            for k in 0..pairs {
                if deadline.is_expired() {
                    debug!(
                        "skipping char refinement of {} remaining line pairs, deadline expired",
                        pairs_left
                    );
                    timed_out = true;
                    break 'regions;
                }

                let original_line = change.original_start + k;
                let modified_line = change.modified_start + k;
                let (pair_spans, pair_timed_out) = self.refine_pair(
                    original[original_line].as_ref(),
                    modified[modified_line].as_ref(),
                    original_line,
                    modified_line,
                    deadline.share(pairs_left),
                );
                spans.extend(pair_spans);
                timed_out |= pair_timed_out;
                pairs_left -= 1;
            }

            change.char_changes = Some(spans);
        }

        timed_out
    }

    /// Compute the char changes between one pair of lines.
    pub fn refine_pair(
        &self,
        original: &str,
        modified: &str,
        original_line: usize,
        modified_line: usize,
        deadline: Deadline,
    ) -> (Vec<CharChange>, bool) {
        let normalizer = Normalizer::new(self.options);
        let a = normalizer.normalize_chars(original);
        let b = normalizer.normalize_chars(modified);

        let alignment = align(&a, &b, deadline);
        let ops = if self.options.post_process {
            let a_raw: Vec<char> = original.chars().collect();
            let b_raw: Vec<char> = modified.chars().collect();
            post_process(
                alignment.ops,
                &a,
                &b,
                &CharView::new(&a, &a_raw),
                &CharView::new(&b, &b_raw),
            )
        } else {
            alignment.ops
        };

        let spans = regions(&ops)
            .into_iter()
            .map(|region| CharChange {
                original_line,
                modified_line,
                original_start: a.raw_offset(region.a.start),
                original_length: region.a.len(),
                modified_start: b.raw_offset(region.b.start),
                modified_length: region.b.len(),
            })
            .collect();

        (spans, alignment.timed_out)
    }
}
