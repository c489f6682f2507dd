use once_cell::sync::Lazy;
use regex::Regex;

use recast_chunker::{ChunkId, ChunkMap};

static FINAL_ANSWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<final-answer>(.*?)</final-answer>").unwrap());

static CHUNK_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<chunk-ref id="([^"]*)"/>"#).unwrap());

static REWRITTEN_CHUNK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<rewritten-chunk id="([^"]*)">\n(.*?)\n</rewritten-chunk>"#).unwrap()
});

static UPDATED_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<updated-file name="([^"]+)">(.*?)</updated-file>"#).unwrap());

/// The body of the first `<final-answer>` block, or `None` when the
/// response carries no such block.
pub fn final_answer(text: &str) -> Option<&str> {
    FINAL_ANSWER
        .captures(text)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Every `<chunk-ref id="..."/>` inside the final-answer block, in document
/// order, duplicates preserved. Empty ids are skipped; a missing
/// final-answer block yields an empty list.
pub fn chunk_refs(text: &str) -> Vec<ChunkId> {
    let Some(answer) = final_answer(text) else {
        return Vec::new();
    };

    CHUNK_REF
        .captures_iter(answer)
        .map(|caps| caps.get(1).unwrap().as_str())
        .filter(|id| !id.is_empty())
        .map(ChunkId::from_raw)
        .collect()
}

/// Every `<rewritten-chunk id="...">` inside the final-answer block, keyed
/// by id. A missing final-answer block yields an empty map; a repeated id
/// keeps the last occurrence.
pub fn rewritten_chunks(text: &str) -> ChunkMap {
    let Some(answer) = final_answer(text) else {
        return ChunkMap::new();
    };

    REWRITTEN_CHUNK
        .captures_iter(answer)
        .filter_map(|caps| {
            let id = caps.get(1).unwrap().as_str();
            if id.is_empty() {
                return None;
            }
            let content = caps.get(2).unwrap().as_str();
            Some((ChunkId::from_raw(id), content.to_string()))
        })
        .collect()
}

/// Every `<updated-file name="...">` block in the response, in document
/// order, content trimmed. Used by the whole-file pipeline, which scans the
/// entire response rather than a final-answer block.
pub fn updated_files(text: &str) -> Vec<(String, String)> {
    UPDATED_FILE
        .captures_iter(text)
        .map(|caps| {
            let name = caps.get(1).unwrap().as_str().to_string();
            let content = caps.get(2).unwrap().as_str().trim().to_string();
            (name, content)
        })
        .collect()
}

/// The text between `<tag>` and `</tag>`, or `None` when either marker is
/// absent. The tag is matched literally, first occurrence wins.
pub fn between_tags<'a>(tag: &str, text: &'a str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = text.find(&open)? + open.len();
    let end = text[start..].find(&close)? + start;
    Some(&text[start..end])
}
