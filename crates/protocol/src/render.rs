use recast_chunker::ChunkMap;

/// Render every chunk as a `<chunk-content id="...">` block, blocks
/// separated by one blank line, in map insertion order.
pub fn render_chunks(chunks: &ChunkMap) -> String {
    chunks
        .iter()
        .map(|(id, content)| format!("<chunk-content id=\"{id}\">\n{content}\n</chunk-content>"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Join parts with exactly one newline between them, stripping any leading
/// or trailing newlines each part already carries.
pub fn line_join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .map(|part| part.as_ref().trim_matches('\n').to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap children in an XML-style tag with optional attributes, one newline
/// between opening tag, each child, and closing tag.
pub fn tagged(tag: &str, attrs: &[(&str, &str)], children: &[&str]) -> String {
    let attr_str: String = attrs
        .iter()
        .map(|(key, value)| format!(" {key}=\"{value}\""))
        .collect();

    let mut parts: Vec<String> = Vec::with_capacity(children.len() + 2);
    parts.push(format!("<{tag}{attr_str}>"));
    parts.extend(children.iter().map(|child| (*child).to_string()));
    parts.push(format!("</{tag}>"));

    line_join(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use recast_chunker::ChunkId;

    #[test]
    fn chunks_render_as_tagged_blocks_in_order() {
        let chunks: ChunkMap = [
            (ChunkId::from_raw("f::10"), "line one\nline two".to_string()),
            (ChunkId::from_raw("f::20"), "tail".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            render_chunks(&chunks),
            "<chunk-content id=\"f::10\">\nline one\nline two\n</chunk-content>\n\n\
             <chunk-content id=\"f::20\">\ntail\n</chunk-content>"
        );
    }

    #[test]
    fn empty_map_renders_empty() {
        assert_eq!(render_chunks(&ChunkMap::new()), "");
    }

    #[test]
    fn line_join_collapses_newline_padding() {
        assert_eq!(line_join(["a\n", "\nb", "c"]), "a\nb\nc");
    }

    #[test]
    fn tagged_wraps_children_with_attributes() {
        assert_eq!(
            tagged("note", &[("name", "x.rs")], &["body"]),
            "<note name=\"x.rs\">\nbody\n</note>"
        );
        assert_eq!(tagged("empty", &[], &[]), "<empty>\n</empty>");
    }
}
