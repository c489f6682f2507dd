//! # Recast Protocol
//!
//! The tagged-block mini-format spoken between recast and the model.
//!
//! Requests carry chunks as `<chunk-content id="...">` blocks; responses
//! wrap their machine-readable part in a single `<final-answer>` block
//! containing either `<chunk-ref id="..."/>` entries (selection) or
//! `<rewritten-chunk id="...">` entries (rewriting). The whole-file pipeline
//! additionally consumes `<updated-file name="...">` blocks and a `<plan>`
//! block.
//!
//! Parsing here is substring/pattern matching, not XML: models pad their
//! answers with commentary, and that free text must be ignored rather than
//! rejected. The flip side is that the markers themselves have to appear
//! verbatim: a response without a well-formed final-answer block parses as
//! *zero results*, never as an error. Deciding whether zero results is fatal
//! belongs to the caller.

mod parse;
mod render;

pub use parse::{between_tags, chunk_refs, final_answer, rewritten_chunks, updated_files};
pub use render::{line_join, render_chunks, tagged};
