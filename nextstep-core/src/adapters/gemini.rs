//! Gemini API client
//!
//! Blocking client for the Generative Language REST API. One request per
//! call, no retries. Streaming uses server-sent events, read line by line
//! from the open response body.

use std::io::{BufRead, BufReader, Lines};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::{ChatMessage, GroundingSource, JobSearchResult};
use crate::ports::{LanguageModel, TextStream};
use crate::prompts;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Returned in place of an empty completion
pub const NO_RESPONSE: &str = "No response generated.";

const REQUEST_TIMEOUT_SECS: u64 = 120;

// === Wire format ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a JsonValue,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: JsonValue,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<GroundingSource>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.iter().filter_map(|c| c.web.clone()).collect())
            .unwrap_or_default()
    }
}

/// Strip Markdown code fences some models wrap around JSON output
pub fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

// === Client ===

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    /// Client for the public endpoint. A missing or blank key leaves the
    /// client unconfigured; every call then fails with `NotConfigured`.
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Result<Self> {
        Self::new_with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Client pointed at a custom endpoint (used for testing)
    pub fn new_with_base_url(api_key: Option<&str>, model: Option<&str>, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            model: model
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MODEL)
                .to_string(),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::NotConfigured(
                "Gemini API key not configured. Run 'nextstep config set gemini.apiKey <key>' \
                 or set NEXTSTEP_GEMINI_API_KEY."
                    .to_string(),
            )
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, self.model, method)
    }

    fn send(&self, url: &str, request: &GenerateRequest<'_>) -> Result<Response> {
        let key = self.api_key()?;
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", key)
            .json(request)
            .send()
            .map_err(|e| self.map_request_error(e))?;
        self.check_response_status(response)
    }

    fn generate(&self, request: &GenerateRequest<'_>) -> Result<GenerateResponse> {
        let response = self.send(&self.endpoint("generateContent"), request)?;
        response
            .json::<GenerateResponse>()
            .map_err(|e| Error::llm(format!("Failed to parse Gemini response: {}", e)))
    }

    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::llm(format!("Request timed out after {} seconds", REQUEST_TIMEOUT_SECS))
        } else if error.is_connect() {
            Error::llm("Unable to connect to the Gemini API")
        } else {
            Error::llm(format!("Gemini request failed: {}", error))
        }
    }

    /// Map non-success statuses to errors, keeping the API's own message
    fn check_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        Err(match status {
            401 | 403 => Error::llm(format!("Gemini rejected the API key: {}", message)),
            429 => Error::llm("Gemini rate limit exceeded. Please try again later."),
            _ => Error::llm(format!("Gemini API error: HTTP {}: {}", status, message)),
        })
    }
}

impl LanguageModel for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_text(&self, prompt: &str, system_instruction: Option<&str>) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: system_instruction.map(|s| Content::text(None, s)),
            generation_config: None,
            tools: None,
        };
        let text = self.generate(&request)?.text();
        if text.trim().is_empty() {
            Ok(NO_RESPONSE.to_string())
        } else {
            Ok(text)
        }
    }

    fn generate_json(&self, prompt: &str, schema: &JsonValue) -> Result<JsonValue> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
            tools: None,
        };
        let text = self.generate(&request)?.text();
        if text.trim().is_empty() {
            return Err(Error::llm(NO_RESPONSE));
        }
        serde_json::from_str(strip_json_fences(&text))
            .map_err(|e| Error::llm(format!("Model returned invalid JSON: {}", e)))
    }

    fn search_jobs(&self, query: &str) -> Result<JobSearchResult> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), &prompts::job_search(query))],
            system_instruction: None,
            generation_config: None,
            tools: Some(vec![Tool {
                google_search: serde_json::json!({}),
            }]),
        };
        let response = self.generate(&request)?;
        let text = response.text();
        Ok(JobSearchResult {
            query: query.to_string(),
            text: if text.trim().is_empty() {
                NO_RESPONSE.to_string()
            } else {
                text
            },
            sources: response.sources(),
        })
    }

    fn chat_stream(
        &self,
        history: &[ChatMessage],
        message: &str,
        system_instruction: &str,
    ) -> Result<TextStream> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| Content::text(Some(m.role.as_str()), &m.text))
            .collect();
        contents.push(Content::text(Some("user"), message));

        let request = GenerateRequest {
            contents,
            system_instruction: Some(Content::text(None, system_instruction)),
            generation_config: None,
            tools: None,
        };
        let url = format!("{}?alt=sse", self.endpoint("streamGenerateContent"));
        let response = self.send(&url, &request)?;

        Ok(Box::new(SseTextStream {
            lines: BufReader::new(response).lines(),
            finished: false,
        }))
    }
}

/// Text chunks from a `streamGenerateContent?alt=sse` response
struct SseTextStream {
    lines: Lines<BufReader<Response>>,
    finished: bool,
}

impl Iterator for SseTextStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::llm(format!("Stream interrupted: {}", e))));
                }
            };

            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data.is_empty() {
                continue;
            }

            match serde_json::from_str::<GenerateResponse>(data) {
                Ok(chunk) => {
                    let text = chunk.text();
                    if !text.is_empty() {
                        return Some(Ok(text));
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::llm(format!("Malformed stream chunk: {}", e))));
                }
            }
        }
    }
}
