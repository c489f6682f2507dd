use std::io::{BufRead, BufReader};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::GenerateConfig;
use crate::error::{LlmError, Result};
use crate::generator::{TextGenerator, TextStream};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Generation can take minutes on the large rewrite calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Blocking client for the Gemini `streamGenerateContent` endpoint.
///
/// Responses are consumed as server-sent events; each `data:` line carries
/// one JSON event whose candidate text becomes one stream fragment. The
/// transport timeout above is the only deadline: no retries, no
/// cancellation once the request is in flight.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client reading the API key from `GEMINI_API_KEY`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| LlmError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Build a client against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Build a client against a custom endpoint (tests, proxies)
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl TextGenerator for GeminiClient {
    fn backend_name(&self) -> &'static str {
        "gemini"
    }

    fn generate(&self, prompt: &str, config: &GenerateConfig) -> Result<TextStream> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.endpoint, config.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: config.system_instruction.as_deref().map(|text| Content {
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        };

        log::debug!(
            "calling {} ({} prompt chars)",
            config.model,
            prompt.chars().count()
        );

        let response = self.http.post(&url).json(&request).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Box::new(SseTextStream::new(BufReader::new(response))))
    }
}

/// Decode `data:` events off an SSE byte stream into text fragments.
/// Events without candidate text (keepalives, usage metadata) are skipped.
struct SseTextStream<R: BufRead> {
    lines: std::io::Lines<R>,
}

impl<R: BufRead> SseTextStream<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for SseTextStream<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };

            let Some(payload) = line.strip_prefix("data:") else {
                continue;
            };
            let payload = payload.trim();
            if payload.is_empty() || payload == "[DONE]" {
                continue;
            }

            match serde_json::from_str::<StreamEvent>(payload) {
                Ok(event) => {
                    let text = event.text();
                    if text.is_empty() {
                        continue;
                    }
                    return Some(Ok(text));
                }
                Err(err) => return Some(Err(err.into())),
            }
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct StreamEvent {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl StreamEvent {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<EventContent>,
}

#[derive(Deserialize)]
struct EventContent {
    #[serde(default)]
    parts: Vec<EventPart>,
}

#[derive(Deserialize)]
struct EventPart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn fragments(raw: &str) -> Vec<String> {
        SseTextStream::new(Cursor::new(raw.to_string()))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn data_events_become_fragments() {
        let raw = concat!(
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hello \"}]}}]}\n",
            "\n",
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"world\"}]}}]}\n",
        );
        assert_eq!(fragments(raw), vec!["Hello ", "world"]);
    }

    #[test]
    fn textless_events_and_noise_are_skipped() {
        let raw = concat!(
            ": keepalive comment\n",
            "data: {\"candidates\":[]}\n",
            "data: {\"usageMetadata\":{\"totalTokenCount\":3}}\n",
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"ok\"}]}}]}\n",
            "data: [DONE]\n",
        );
        assert_eq!(fragments(raw), vec!["ok"]);
    }

    #[test]
    fn multiple_parts_concatenate_within_one_event() {
        let raw =
            "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"a\"},{\"text\":\"b\"}]}}]}\n";
        assert_eq!(fragments(raw), vec!["ab"]);
    }

    #[test]
    fn malformed_event_surfaces_an_error() {
        let raw = "data: {not json}\n";
        let result: Result<Vec<_>> =
            SseTextStream::new(Cursor::new(raw.to_string())).collect();
        assert!(matches!(result, Err(LlmError::MalformedEvent(_))));
    }

    #[test]
    fn request_body_shape_matches_the_api() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi" }],
            }],
            system_instruction: Some(Content {
                parts: vec![Part { text: "sys" }],
            }),
            generation_config: GenerationConfig {
                temperature: 0.95,
                max_output_tokens: 100,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 100);
    }
}
