use std::path::PathBuf;

use recast_chunker::{ChunkId, ChunkMap, Chunker, ChunkerConfig};
use recast_llm::{GenerateConfig, TextGenerator};

use crate::assemble::apply_chunks;
use crate::error::{EngineError, Result};
use crate::rewriter::rewrite_chunks;
use crate::selector::select_relevant_chunks;

/// One chunked-rewrite invocation
pub struct ChunkedRequest {
    /// Files offered for modification
    pub files: Vec<PathBuf>,

    /// The natural-language change request
    pub change_request: String,

    /// Settings for the selection call
    pub selector_config: GenerateConfig,

    /// Settings for the rewrite call
    pub rewriter_config: GenerateConfig,
}

impl ChunkedRequest {
    /// A request with the default model settings
    pub fn new(files: Vec<PathBuf>, change_request: impl Into<String>) -> Self {
        Self {
            files,
            change_request: change_request.into(),
            selector_config: GenerateConfig::selector(),
            rewriter_config: GenerateConfig::rewriter(),
        }
    }
}

/// What a chunked run did
#[derive(Debug)]
pub struct ChunkedOutcome {
    /// Ids the model selected (post-filtering)
    pub selected: Vec<ChunkId>,

    /// Files written back to disk
    pub written: Vec<PathBuf>,
}

/// Run the full chunked pipeline: chunk every input file, select relevant
/// chunks, rewrite them, reassemble and write back.
///
/// Strictly sequential; both model calls happen exactly once. An empty
/// selection aborts before the rewrite call: rewriting nothing would
/// silently no-op, which is worse than failing.
pub fn run_chunked(
    generator: &dyn TextGenerator,
    request: &ChunkedRequest,
    on_fragment: &mut dyn FnMut(&str),
) -> Result<ChunkedOutcome> {
    let chunker = Chunker::new(ChunkerConfig::default());

    let mut original = ChunkMap::new();
    for path in &request.files {
        original.extend(chunker.chunk_file(path)?);
    }
    log::info!(
        "chunked {} file(s) into {} chunk(s)",
        request.files.len(),
        original.len()
    );

    let selected = select_relevant_chunks(
        generator,
        &original,
        &request.change_request,
        &request.selector_config,
        on_fragment,
    )?;
    if selected.is_empty() {
        return Err(EngineError::NoRelevantChunks);
    }
    log::debug!(
        "relevant chunk ids: {:?}",
        selected.iter().map(ChunkId::as_str).collect::<Vec<_>>()
    );

    let relevant = original.subset(selected.iter());
    let rewritten = rewrite_chunks(
        generator,
        &relevant,
        &request.change_request,
        &request.rewriter_config,
        on_fragment,
    )?;

    let written = apply_chunks(&original, &rewritten)?;

    Ok(ChunkedOutcome { selected, written })
}
