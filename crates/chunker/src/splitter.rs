use std::path::Path;

use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::types::{ChunkId, ChunkMap};

/// Main chunker interface for splitting source files
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker with configuration
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        config
            .validate()
            .expect("Invalid chunker configuration provided");
        Self { config }
    }

    /// Chunk a file read from disk
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<ChunkMap> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file_path = path.to_str().unwrap_or("unknown");

        self.chunk_str(&content, file_path)
    }

    /// Chunk source text into contiguous runs of lines.
    ///
    /// A boundary closes the accumulated run when an indented line is
    /// followed by a non-indented one and the run (including that
    /// non-indented line) has reached `min_chunk_size` lines. A line counts
    /// as indented when it is non-blank and starts with a space or tab.
    /// Whatever remains after the scan becomes the final chunk, regardless
    /// of size. Ids are `file_path::10·(1+n)` with `n` the number of chunks
    /// already closed for this file.
    ///
    /// Joining the resulting chunks with `\n` in sequence order reproduces
    /// `content` exactly, except that a trailing newline on the input is not
    /// represented (chunking iterates lines and reassembly re-joins them).
    pub fn chunk_str(&self, content: &str, file_path: &str) -> Result<ChunkMap> {
        if content.is_empty() {
            return Err(ChunkerError::EmptyContent);
        }

        let mut chunks = ChunkMap::new();
        let mut run: Vec<&str> = Vec::new();
        let mut was_indented = false;

        for line in content.lines() {
            run.push(line);
            let is_indented =
                !line.trim().is_empty() && (line.starts_with(' ') || line.starts_with('\t'));

            if was_indented && !is_indented && run.len() >= self.config.min_chunk_size {
                let id = ChunkId::new(file_path, next_seq(&chunks));
                chunks.insert(id, run.join("\n"));
                run.clear();
            }

            was_indented = is_indented;
        }

        if !run.is_empty() {
            let id = ChunkId::new(file_path, next_seq(&chunks));
            chunks.insert(id, run.join("\n"));
        }

        log::debug!("chunked {file_path} into {} chunk(s)", chunks.len());

        Ok(chunks)
    }
}

fn next_seq(chunks: &ChunkMap) -> u64 {
    10 * (1 + chunks.len() as u64)
}
