use std::path::Path;
use std::sync::Mutex;

use crate::config::GenerateConfig;
use crate::error::{LlmError, Result};
use crate::generator::{TextGenerator, TextStream};

/// A generator that replays canned responses in call order.
///
/// Each response is split into line fragments so consumers exercise the
/// same buffer-then-parse path they use against the live backend. Asking
/// for more responses than were scripted is an error: a test that makes an
/// unexpected extra model call should fail loudly.
pub struct ScriptedGenerator {
    responses: Vec<String>,
    cursor: Mutex<usize>,
}

impl ScriptedGenerator {
    /// Script responses directly
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            cursor: Mutex::new(0),
        }
    }

    /// Load responses from a directory holding `1.txt`, `2.txt`, ...
    /// (consumed in numeric order; the sequence stops at the first gap).
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut responses = Vec::new();

        for index in 1.. {
            let path = dir.join(format!("{index}.txt"));
            if !path.exists() {
                break;
            }
            responses.push(std::fs::read_to_string(path)?);
        }

        log::debug!(
            "scripted backend loaded {} response(s) from {}",
            responses.len(),
            dir.display()
        );

        Ok(Self::new(responses))
    }
}

impl TextGenerator for ScriptedGenerator {
    fn backend_name(&self) -> &'static str {
        "stub"
    }

    fn generate(&self, _prompt: &str, _config: &GenerateConfig) -> Result<TextStream> {
        let mut cursor = self.cursor.lock().expect("scripted cursor poisoned");
        let response = self
            .responses
            .get(*cursor)
            .ok_or(LlmError::ScriptExhausted(self.responses.len()))?
            .clone();
        *cursor += 1;

        let fragments: Vec<String> = response
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();

        Ok(Box::new(fragments.into_iter().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::collect_stream;
    use pretty_assertions::assert_eq;

    #[test]
    fn responses_replay_in_call_order() {
        let generator =
            ScriptedGenerator::new(vec!["first\nanswer".to_string(), "second".to_string()]);
        let config = GenerateConfig::default();

        let one = collect_stream(generator.generate("p1", &config).unwrap(), |_| {}).unwrap();
        let two = collect_stream(generator.generate("p2", &config).unwrap(), |_| {}).unwrap();

        assert_eq!(one, "first\nanswer");
        assert_eq!(two, "second");
    }

    #[test]
    fn extra_calls_fail_loudly() {
        let generator = ScriptedGenerator::new(vec!["only".to_string()]);
        let config = GenerateConfig::default();

        generator.generate("p1", &config).unwrap();
        assert!(matches!(
            generator.generate("p2", &config),
            Err(LlmError::ScriptExhausted(1))
        ));
    }

    #[test]
    fn from_dir_reads_numbered_files_until_the_first_gap() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.txt"), "one").unwrap();
        std::fs::write(dir.path().join("2.txt"), "two").unwrap();
        std::fs::write(dir.path().join("4.txt"), "unreachable").unwrap();

        let generator = ScriptedGenerator::from_dir(dir.path()).unwrap();
        let config = GenerateConfig::default();

        let one = collect_stream(generator.generate("a", &config).unwrap(), |_| {}).unwrap();
        let two = collect_stream(generator.generate("b", &config).unwrap(), |_| {}).unwrap();

        assert_eq!(one, "one");
        assert_eq!(two, "two");
        assert!(generator.generate("c", &config).is_err());
    }
}
