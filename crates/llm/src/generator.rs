use crate::config::GenerateConfig;
use crate::error::Result;

/// A finite, non-restartable sequence of text fragments from one
/// generation call.
pub type TextStream = Box<dyn Iterator<Item = Result<String>>>;

/// An injectable text-generation capability.
///
/// One call, one stream. Implementations must not retry internally; the
/// pipeline's contract is that every model call is attempted exactly once.
pub trait TextGenerator {
    /// Human-readable backend name, for logs
    fn backend_name(&self) -> &'static str;

    /// Generate a completion for `prompt` under `config`
    fn generate(&self, prompt: &str, config: &GenerateConfig) -> Result<TextStream>;
}

/// Drain a stream into the full response text, handing each fragment to
/// `on_fragment` as it arrives (display only; structural parsing must run
/// on the returned concatenation).
pub fn collect_stream(stream: TextStream, mut on_fragment: impl FnMut(&str)) -> Result<String> {
    let mut full = String::new();
    for fragment in stream {
        let fragment = fragment?;
        on_fragment(&fragment);
        full.push_str(&fragment);
    }
    Ok(full)
}
