use std::path::PathBuf;

use recast_chunker::ChunkMap;

use crate::error::Result;

/// Merge rewritten chunks over the originals and write every affected file
/// back to disk in full.
///
/// Grouping by file path is the primary key; the numeric sequence component
/// orders chunks within each file. Files are written in first-seen chunk
/// order and the written paths are returned. Writes are not transactional
/// across files: an interruption leaves earlier files rewritten and later
/// ones untouched.
pub fn apply_chunks(original: &ChunkMap, rewritten: &ChunkMap) -> Result<Vec<PathBuf>> {
    let combined = original.merged(rewritten);

    let mut files: Vec<(String, Vec<(u64, String)>)> = Vec::new();
    for (id, content) in combined.iter() {
        let seq = id.seq()?;
        let path = id.file_path();
        match files.iter_mut().find(|(existing, _)| existing == path) {
            Some((_, chunks)) => chunks.push((seq, content.to_string())),
            None => files.push((path.to_string(), vec![(seq, content.to_string())])),
        }
    }

    let mut written = Vec::with_capacity(files.len());
    for (path, mut chunks) in files {
        chunks.sort_by_key(|(seq, _)| *seq);
        let content = chunks
            .iter()
            .map(|(_, chunk)| chunk.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        std::fs::write(&path, content)?;
        log::info!("wrote {path}");
        written.push(PathBuf::from(path));
    }

    Ok(written)
}
