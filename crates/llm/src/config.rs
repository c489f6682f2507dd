use serde::{Deserialize, Serialize};

/// Model used for relevance selection and planning: fast, cheap, and good
/// enough at pointing.
pub const SELECTOR_MODEL: &str = "gemini-2.0-flash-thinking-exp-01-21";

/// Model used for rewriting: slower, but the one that actually writes code.
pub const REWRITER_MODEL: &str = "gemini-2.0-pro-exp-02-05";

/// Per-call generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Output token ceiling
    pub max_output_tokens: u32,

    /// Optional system instruction sent alongside the prompt
    pub system_instruction: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            model: SELECTOR_MODEL.to_string(),
            temperature: 1.0,
            max_output_tokens: 20_000,
            system_instruction: None,
        }
    }
}

impl GenerateConfig {
    /// Settings for the relevance-selection call
    pub fn selector() -> Self {
        Self::default()
    }

    /// Settings for the chunk-rewrite call
    pub fn rewriter() -> Self {
        Self {
            model: REWRITER_MODEL.to_string(),
            max_output_tokens: 60_000,
            ..Default::default()
        }
    }

    /// Settings for the plan-generation call
    pub fn planner(system_instruction: String) -> Self {
        Self {
            temperature: 0.95,
            system_instruction: Some(system_instruction),
            ..Default::default()
        }
    }

    /// Settings for the whole-file rewrite call
    pub fn full_rewrite(system_instruction: String) -> Self {
        Self {
            temperature: 0.95,
            max_output_tokens: 60_000,
            system_instruction: Some(system_instruction),
            ..Default::default()
        }
    }

    /// Replace the model identifier
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
