// Line and character level diff engine
// Computes minimal, readable edit scripts between two revisions of a text
// within a bounded time budget

mod align;
mod change;
mod deadline;
mod edit;
mod engine;
mod error;
mod files;
mod intraline;
mod normalize;
mod options;
mod postprocess;
mod text_diff;
mod unified;

pub use align::{align, edit_distance, Alignment};
pub use change::{ChangeType, CharChange, DiffResult, LineChange};
pub use deadline::Deadline;
pub use edit::{apply, EditOp};
pub use engine::{diff, DiffEngine};
pub use error::DiffError;
pub use files::{compare_files, read_rope};
pub use intraline::IntralineRefiner;
pub use normalize::{LineId, Normalizer, Sequence, Token};
pub use options::{DiffOptions, DEFAULT_MAX_COMPUTATION_TIME};
pub use postprocess::{post_process, CharView, LineView, Prettify, MAX_PASSES};
pub use text_diff::{line_count, split_lines, TextDiff};
pub use unified::{UnifiedDiff, DEFAULT_CONTEXT_LINES};
