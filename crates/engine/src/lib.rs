//! # Recast Engine
//!
//! The rewrite pipelines: what happens between "here are my files and what
//! I want changed" and "the files on disk now say something else".
//!
//! ## Chunked pipeline
//!
//! ```text
//! files ──> chunk ──> select relevant ──> rewrite selected ──> reassemble
//!            │              │                    │                  │
//!            │        one model call       one model call      full-file
//!            │        (chunk-ref ids)      (rewritten-chunk)   write-back
//!            └── every chunk survives in the original map ─────────┘
//! ```
//!
//! Rewritten chunks override originals by id; chunks the model skipped fall
//! back to their original content; ids the model invented are dropped at
//! the stage that first sees them. Reassembly groups by file and restores
//! numeric sequence order within each file.
//!
//! ## Plan pipeline
//!
//! The whole-file variant: generate a short plan, let the user add
//! clarifications, then ask for complete `<updated-file>` bodies and write
//! back only the files that were explicitly offered for modification.
//!
//! Both pipelines are strictly sequential, make every model call exactly
//! once, and stream response fragments to a caller-supplied display
//! callback while parsing only the buffered whole.

mod assemble;
mod chunked;
mod error;
mod plan;
mod rewriter;
mod selector;

pub use assemble::apply_chunks;
pub use chunked::{run_chunked, ChunkedOutcome, ChunkedRequest};
pub use error::{EngineError, Result};
pub use plan::{PlanRequest, PlanSession};
pub use rewriter::rewrite_chunks;
pub use selector::select_relevant_chunks;
