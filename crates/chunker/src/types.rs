use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChunkerError, Result};

/// Separator between the file path and the sequence number in a chunk id
const ID_SEPARATOR: &str = "::";

/// Identifier of a single chunk: `<file_path>::<sequence_number>`.
///
/// Sequence numbers are multiples of 10, assigned in file order, so ids sort
/// numerically into the original chunk order within one file. The file path
/// component keeps ids unique across all files of one invocation. Ids also
/// arrive from the *model* side (selection and rewrite responses), so any
/// string is representable; only the numeric accessor can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(String);

impl ChunkId {
    /// Build an id from its components
    pub fn new(file_path: &str, seq: u64) -> Self {
        Self(format!("{file_path}{ID_SEPARATOR}{seq}"))
    }

    /// Wrap a raw id string as received from a model response
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The full id string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file path component (everything before the last `::`).
    ///
    /// Splitting on the last separator keeps paths that themselves contain
    /// `::` intact.
    pub fn file_path(&self) -> &str {
        match self.0.rsplit_once(ID_SEPARATOR) {
            Some((path, _)) => path,
            None => &self.0,
        }
    }

    /// The numeric sequence component (everything after the last `::`)
    pub fn seq(&self) -> Result<u64> {
        self.0
            .rsplit_once(ID_SEPARATOR)
            .and_then(|(_, seq)| seq.parse().ok())
            .ok_or_else(|| ChunkerError::malformed_id(&self.0))
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insertion-ordered map from [`ChunkId`] to chunk content.
///
/// Iteration order is first-insertion order, which for maps produced by the
/// chunker is file order. The same type carries the full original chunk set,
/// the subset selected for rewriting, and the rewritten replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMap {
    entries: Vec<(ChunkId, String)>,
}

impl ChunkMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no chunks
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a chunk. A repeated id overwrites the content in place,
    /// keeping the original position.
    pub fn insert(&mut self, id: ChunkId, content: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = content,
            None => self.entries.push((id, content)),
        }
    }

    /// Content for an id, if present
    pub fn get(&self, id: &ChunkId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, content)| content.as_str())
    }

    /// Whether an id is present
    pub fn contains(&self, id: &ChunkId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate `(id, content)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkId, &str)> {
        self.entries
            .iter()
            .map(|(id, content)| (id, content.as_str()))
    }

    /// Iterate ids in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &ChunkId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Merge `other` over `self`: ids present in `other` win, ids unique to
    /// either side are retained. Positions follow `self`'s order, with ids
    /// unique to `other` appended in `other`'s order.
    #[must_use]
    pub fn merged(&self, other: &ChunkMap) -> ChunkMap {
        let mut out = self.clone();
        for (id, content) in other.iter() {
            out.insert(id.clone(), content.to_string());
        }
        out
    }

    /// Project the map onto `ids`, preserving the given id order. Unknown
    /// ids are skipped; duplicate ids collapse to their first occurrence.
    #[must_use]
    pub fn subset<'a>(&self, ids: impl IntoIterator<Item = &'a ChunkId>) -> ChunkMap {
        let mut out = ChunkMap::new();
        for id in ids {
            if let Some(content) = self.get(id) {
                out.insert(id.clone(), content.to_string());
            }
        }
        out
    }
}

impl Extend<(ChunkId, String)> for ChunkMap {
    fn extend<I: IntoIterator<Item = (ChunkId, String)>>(&mut self, iter: I) {
        for (id, content) in iter {
            self.insert(id, content);
        }
    }
}

impl FromIterator<(ChunkId, String)> for ChunkMap {
    fn from_iter<I: IntoIterator<Item = (ChunkId, String)>>(iter: I) -> Self {
        let mut map = ChunkMap::new();
        for (id, content) in iter {
            map.insert(id, content);
        }
        map
    }
}

impl IntoIterator for ChunkMap {
    type Item = (ChunkId, String);
    type IntoIter = std::vec::IntoIter<(ChunkId, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: &str) -> ChunkId {
        ChunkId::from_raw(raw)
    }

    #[test]
    fn chunk_id_components_round_trip() {
        let chunk_id = ChunkId::new("src/lib.rs", 30);
        assert_eq!(chunk_id.as_str(), "src/lib.rs::30");
        assert_eq!(chunk_id.file_path(), "src/lib.rs");
        assert_eq!(chunk_id.seq().unwrap(), 30);
    }

    #[test]
    fn chunk_id_splits_on_last_separator() {
        let chunk_id = id("weird::path.rs::20");
        assert_eq!(chunk_id.file_path(), "weird::path.rs");
        assert_eq!(chunk_id.seq().unwrap(), 20);
    }

    #[test]
    fn chunk_id_without_sequence_is_malformed() {
        assert!(id("no-separator").seq().is_err());
        assert!(id("file.rs::not-a-number").seq().is_err());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut map = ChunkMap::new();
        map.insert(id("f::20"), "second".into());
        map.insert(id("f::10"), "first".into());

        let ids: Vec<&str> = map.keys().map(ChunkId::as_str).collect();
        assert_eq!(ids, vec!["f::20", "f::10"]);
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = ChunkMap::new();
        map.insert(id("f::10"), "old".into());
        map.insert(id("f::20"), "other".into());
        map.insert(id("f::10"), "new".into());

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&id("f::10")), Some("new"));
        assert_eq!(map.keys().next().unwrap().as_str(), "f::10");
    }

    #[test]
    fn merged_prefers_other_and_keeps_extras() {
        let original: ChunkMap = [
            (id("f::10"), "1".to_string()),
            (id("f::20"), "2".to_string()),
        ]
        .into_iter()
        .collect();
        let rewritten: ChunkMap = [
            (id("f::20"), "2'".to_string()),
            (id("f::99"), "ghost".to_string()),
        ]
        .into_iter()
        .collect();

        let merged = original.merged(&rewritten);
        assert_eq!(merged.get(&id("f::10")), Some("1"));
        assert_eq!(merged.get(&id("f::20")), Some("2'"));
        assert_eq!(merged.get(&id("f::99")), Some("ghost"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn subset_preserves_requested_order_and_drops_unknowns() {
        let map: ChunkMap = [
            (id("f::10"), "1".to_string()),
            (id("f::20"), "2".to_string()),
            (id("f::30"), "3".to_string()),
        ]
        .into_iter()
        .collect();

        let wanted = [id("f::30"), id("f::10"), id("f::404"), id("f::30")];
        let subset = map.subset(wanted.iter());

        let ids: Vec<&str> = subset.keys().map(ChunkId::as_str).collect();
        assert_eq!(ids, vec!["f::30", "f::10"]);
    }
}
