use recast_chunker::ChunkMap;
use recast_llm::{collect_stream, GenerateConfig, TextGenerator};
use recast_protocol as protocol;

use crate::error::Result;

/// Ask the model to rewrite the selected chunks.
///
/// Returns a map of replacements keyed by chunk id. Ids the model was not
/// asked about are dropped with a warning; ids the model omitted are simply
/// absent, and reassembly falls back to the original content for them.
pub fn rewrite_chunks(
    generator: &dyn TextGenerator,
    selected: &ChunkMap,
    change_request: &str,
    config: &GenerateConfig,
    on_fragment: &mut dyn FnMut(&str),
) -> Result<ChunkMap> {
    let prompt = rewrite_prompt(selected, change_request);
    log::debug!("rewrite prompt:\n{prompt}");

    let stream = generator.generate(&prompt, config)?;
    let response = collect_stream(stream, on_fragment)?;

    let mut rewritten = ChunkMap::new();
    for (id, content) in protocol::rewritten_chunks(&response) {
        if selected.contains(&id) {
            rewritten.insert(id, content);
        } else {
            log::warn!("model rewrote unrequested chunk id {id}, ignoring");
        }
    }

    for id in selected.keys() {
        if !rewritten.contains(id) {
            log::warn!("model omitted chunk {id}; keeping original content");
        }
    }

    Ok(rewritten)
}

fn rewrite_prompt(chunks: &ChunkMap, change_request: &str) -> String {
    format!(
        "Rewrite the following code chunks to implement the change: \"{change_request}\".\n\
         Think carefully about it step-by-step before you answer.\n\
         \n\
         {chunks}\n\
         \n\
         Output the updated code within XML tags, like this:\n\
         \n\
         <final-answer>\n\
         <rewritten-chunk id=\"[chunk_id_1]\">\n\
         ...\n\
         </rewritten-chunk>\n\
         <rewritten-chunk id=\"[chunk_id_2]\">\n\
         ...\n\
         </rewritten-chunk>\n\
         ...\n\
         </final-answer>\n\
         \n\
         Again, the requested change is: \"{change_request}\".",
        chunks = protocol::render_chunks(chunks),
    )
}
