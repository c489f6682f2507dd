//! # Recast LLM
//!
//! The text-generation capability behind the rewrite pipelines, kept behind
//! a trait so the pipelines can run against a scripted fake in tests.
//!
//! A generator takes one prompt plus a [`GenerateConfig`] and yields a
//! finite, non-restartable stream of text fragments. Fragments exist for
//! display only; callers buffer the whole stream with [`collect_stream`]
//! before any structural parsing, because the tagged-block format is not
//! parseable mid-stream. Each call is attempted exactly once; there are no
//! retries at this layer.
//!
//! Backends:
//! - [`GeminiClient`]: the Gemini `streamGenerateContent` REST endpoint,
//!   blocking HTTP with server-sent events.
//! - [`ScriptedGenerator`]: canned responses in call order, selected in the
//!   binaries with `RECAST_LLM=stub` so integration tests run offline.

mod config;
mod error;
mod gemini;
mod generator;
mod scripted;

pub use config::GenerateConfig;
pub use error::{LlmError, Result};
pub use gemini::GeminiClient;
pub use generator::{collect_stream, TextGenerator, TextStream};
pub use scripted::ScriptedGenerator;

/// Environment variable selecting the generation backend (`gemini`|`stub`)
pub const ENV_BACKEND: &str = "RECAST_LLM";

/// Environment variable pointing the stub backend at its response directory
pub const ENV_SCRIPT_DIR: &str = "RECAST_LLM_SCRIPT_DIR";

/// Resolve the generation backend from the environment. Defaults to the
/// live Gemini backend; `RECAST_LLM=stub` loads scripted responses from
/// `RECAST_LLM_SCRIPT_DIR` (files `1.txt`, `2.txt`, ... consumed in call
/// order).
pub fn generator_from_env() -> Result<Box<dyn TextGenerator>> {
    let backend = std::env::var(ENV_BACKEND).unwrap_or_default();
    match backend.as_str() {
        "" | "gemini" => Ok(Box::new(GeminiClient::from_env()?)),
        "stub" => {
            let dir = std::env::var(ENV_SCRIPT_DIR)
                .map_err(|_| LlmError::MissingScriptDir(ENV_SCRIPT_DIR))?;
            Ok(Box::new(ScriptedGenerator::from_dir(dir)?))
        }
        other => Err(LlmError::UnknownBackend(other.to_string())),
    }
}
