use recast_chunker::{ChunkId, ChunkMap};
use recast_llm::{collect_stream, GenerateConfig, TextGenerator};
use recast_protocol as protocol;

use crate::error::Result;

/// Ask the model which chunks need to change.
///
/// Returns the chunk ids the model referenced, in the model's order,
/// duplicates preserved. Ids that do not exist in `all_chunks` are dropped
/// with a warning; selection output is untrusted input. An empty result
/// means the model named nothing usable; deciding that this is fatal is the
/// caller's job.
pub fn select_relevant_chunks(
    generator: &dyn TextGenerator,
    all_chunks: &ChunkMap,
    change_request: &str,
    config: &GenerateConfig,
    on_fragment: &mut dyn FnMut(&str),
) -> Result<Vec<ChunkId>> {
    let prompt = selection_prompt(all_chunks, change_request);
    log::debug!("selection prompt:\n{prompt}");

    let stream = generator.generate(&prompt, config)?;
    let response = collect_stream(stream, on_fragment)?;

    let mut ids = protocol::chunk_refs(&response);
    ids.retain(|id| {
        if all_chunks.contains(id) {
            true
        } else {
            log::warn!("model selected unknown chunk id {id}, ignoring");
            false
        }
    });

    log::info!("model selected {} chunk(s)", ids.len());

    Ok(ids)
}

fn selection_prompt(chunks: &ChunkMap, change_request: &str) -> String {
    format!(
        "I have the following code chunks. Please think step by step and identify which \
         chunks need to be changed to implement the following: \"{change_request}\". Only \
         list the chunks that require changes. Think carefully about it for a long time \
         before you answer.\n\
         \n\
         {chunks}\n\
         \n\
         Output your final answer in XML like this:\n\
         <final-answer>\n\
         <chunk-ref id=\"...\"/>\n\
         <chunk-ref id=\"...\"/>\n\
         </final-answer>\n\
         \n\
         Again, the requested change is: \"{change_request}\".",
        chunks = protocol::render_chunks(chunks),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_chunker::ChunkId;
    use recast_llm::ScriptedGenerator;

    fn two_chunks() -> ChunkMap {
        [
            (ChunkId::from_raw("f::10"), "first".to_string()),
            (ChunkId::from_raw("f::20"), "second".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn known_ids_pass_through_in_model_order() {
        let generator = ScriptedGenerator::new(vec![
            "<final-answer><chunk-ref id=\"f::20\"/><chunk-ref id=\"f::10\"/></final-answer>"
                .to_string(),
        ]);

        let ids = select_relevant_chunks(
            &generator,
            &two_chunks(),
            "swap things",
            &GenerateConfig::selector(),
            &mut |_| {},
        )
        .unwrap();

        let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["f::20", "f::10"]);
    }

    #[test]
    fn unknown_ids_are_filtered_out() {
        let generator = ScriptedGenerator::new(vec![
            "<final-answer><chunk-ref id=\"f::10\"/><chunk-ref id=\"ghost::30\"/></final-answer>"
                .to_string(),
        ]);

        let ids = select_relevant_chunks(
            &generator,
            &two_chunks(),
            "anything",
            &GenerateConfig::selector(),
            &mut |_| {},
        )
        .unwrap();

        let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["f::10"]);
    }

    #[test]
    fn unparseable_response_yields_an_empty_selection() {
        let generator = ScriptedGenerator::new(vec!["no tags here".to_string()]);

        let ids = select_relevant_chunks(
            &generator,
            &two_chunks(),
            "anything",
            &GenerateConfig::selector(),
            &mut |_| {},
        )
        .unwrap();

        assert!(ids.is_empty());
    }
}
