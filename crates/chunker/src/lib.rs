//! # Recast Chunker
//!
//! Indentation-driven chunking of source files for selective rewriting.
//!
//! ## Philosophy
//!
//! The chunker is deliberately *not* a parser. It splits a file into
//! contiguous runs of lines using a single structural cue, the transition
//! from an indented line back to column zero, which in practice lands on
//! top-level declaration boundaries for most indentation-based and
//! brace-based languages alike. The payoff is a splitter that:
//!
//! - works on any text file, broken or half-written code included
//! - reconstructs the original content byte-for-byte when chunks are
//!   re-joined in sequence order
//! - produces chunks large enough (configurable minimum) to carry meaning
//!   into a model prompt
//!
//! ## Architecture
//!
//! ```text
//! Source file
//!     │
//!     ├──> Line scan (indented → non-indented transitions)
//!     │
//!     └──> ChunkMap: "path::10" → lines, "path::20" → lines, ...
//!               │
//!               └──> selection / rewrite / reassembly (recast-engine)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use recast_chunker::{Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig::default());
//! let source = "fn main() {\n    one();\n    two();\n    three();\n    four();\n}\nconst X: u8 = 0;";
//!
//! let chunks = chunker.chunk_str(source, "src/main.rs").unwrap();
//! let joined: Vec<&str> = chunks.iter().map(|(_, content)| content).collect();
//! assert_eq!(joined.join("\n"), source);
//! ```

mod config;
mod error;
mod splitter;
mod types;

pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use splitter::Chunker;
pub use types::{ChunkId, ChunkMap};
