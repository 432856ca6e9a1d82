use log::{debug, trace};

use crate::align::align;
use crate::change::{DiffResult, LineChange};
use crate::deadline::Deadline;
use crate::edit::regions;
use crate::error::DiffError;
use crate::intraline::IntralineRefiner;
use crate::normalize::Normalizer;
use crate::options::DiffOptions;
use crate::postprocess::{post_process, LineView};

/// Computes line and character level diffs between two revisions.
///
/// The engine only holds its options, so one instance can serve any number
/// of calls, including concurrent ones.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create an engine, rejecting nonsensical options.
    pub fn new(options: DiffOptions) -> Result<Self, DiffError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Get the options
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Diff two line sequences within the configured time budget.
    pub fn diff<S: AsRef<str>>(&self, original: &[S], modified: &[S]) -> DiffResult {
        self.diff_until(
            original,
            modified,
            Deadline::after(self.options.max_computation_time),
        )
    }

    /// Diff two line sequences against an explicit deadline.
    pub fn diff_until<S: AsRef<str>>(
        &self,
        original: &[S],
        modified: &[S],
        deadline: Deadline,
    ) -> DiffResult {
        trace!(
            "diffing {} original lines against {} modified lines",
            original.len(),
            modified.len()
        );

        let mut normalizer = Normalizer::new(&self.options);
        let a = normalizer.normalize_lines(original);
        let b = normalizer.normalize_lines(modified);

        let alignment = align(&a, &b, deadline);
        let mut timed_out = alignment.timed_out;
        if timed_out {
            debug!("line alignment exceeded its budget, result is not minimal");
        }

        let ops = if self.options.post_process {
            post_process(
                alignment.ops,
                &a,
                &b,
                &LineView::new(original),
                &LineView::new(modified),
            )
        } else {
            alignment.ops
        };

        let mut changes: Vec<LineChange> =
            regions(&ops).iter().map(LineChange::from_region).collect();

        if self.options.compute_char_changes {
            let refiner = IntralineRefiner::new(&self.options);
            timed_out |= refiner.refine(&mut changes, original, modified, deadline);
        }

        let result = DiffResult::new(changes, timed_out);
        debug_assert!(result.is_valid_cover(original.len(), modified.len()));
        result
    }
}

/// Diff two line sequences with the given options.
pub fn diff<S: AsRef<str>>(
    original: &[S],
    modified: &[S],
    options: DiffOptions,
) -> Result<DiffResult, DiffError> {
    Ok(DiffEngine::new(options)?.diff(original, modified))
}
