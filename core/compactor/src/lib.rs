//! Branch compaction: deciding where to cut a session branch, producing a
//! cheap view-only micro-compaction, and summarizing the dropped window
//! into a single `CompactionEntry`.

mod compact;
mod cutpoint;
mod error;
mod micro;
mod render;
mod summarize;

pub use compact::HookDecision;
pub use compact::Outcome;
pub use compact::compact_branch;
pub use cutpoint::find_cut_index;
pub use error::CompactError;
pub use micro::micro_compact_view;
pub use render::render_for_summary;
pub use summarize::Summarizer;
pub use summarize::split_turn_summarize;
