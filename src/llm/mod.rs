pub mod gemini;

use async_trait::async_trait;
use futures::Stream;
use serde::{ Deserialize, Serialize };
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;
use self::gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("{0}")]
    Other(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part { text: Some(text.into()) }
    }
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Content {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// One incremental unit of a streaming generation response.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GenerateChunk {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateChunk {
    /// First candidate's first text part, the only piece surfaced to clients.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

pub type ChunkStream = Pin<
    Box<dyn Stream<Item = Result<GenerateChunk, LlmError>> + Send>
>;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Opens one streaming generation call. Errors after the stream is
    /// handed back are delivered through the stream itself.
    async fn stream_generate(
        &self,
        history: Vec<Content>,
        message: &str,
        system_instruction: &str
    ) -> Result<ChunkStream, LlmError>;
}

pub fn new_client(config: &AppConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let api_key = config.api_key
        .clone()
        .ok_or_else(|| LlmError::Other("GEMINI_API_KEY environment variable not set".to_string()))?;
    let client = GeminiClient::new(api_key, config.model.clone(), config.base_url.clone())?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_chunk(text: &str) -> GenerateChunk {
        GenerateChunk {
            candidates: vec![Candidate {
                content: Content {
                    role: Some("model".to_string()),
                    parts: vec![Part::text(text)],
                },
            }],
        }
    }

    #[test]
    fn first_text_returns_first_candidate_first_part() {
        let chunk = GenerateChunk {
            candidates: vec![
                Candidate {
                    content: Content {
                        role: Some("model".to_string()),
                        parts: vec![Part::text("first"), Part::text("second")],
                    },
                },
                Candidate {
                    content: Content {
                        role: Some("model".to_string()),
                        parts: vec![Part::text("other candidate")],
                    },
                },
            ],
        };
        assert_eq!(chunk.first_text(), Some("first"));
    }

    #[test]
    fn first_text_handles_empty_chunks() {
        assert_eq!(GenerateChunk::default().first_text(), None);

        let no_parts = GenerateChunk {
            candidates: vec![Candidate { content: Content::default() }],
        };
        assert_eq!(no_parts.first_text(), None);

        let no_text = GenerateChunk {
            candidates: vec![Candidate {
                content: Content {
                    role: None,
                    parts: vec![Part { text: None }],
                },
            }],
        };
        assert_eq!(no_text.first_text(), None);
    }

    #[test]
    fn chunk_deserializes_from_upstream_json() {
        let chunk: GenerateChunk = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hi"}]}}]}"#
        ).unwrap();
        assert_eq!(chunk.first_text(), Some("Hi"));
        assert_eq!(text_chunk("Hi").first_text(), chunk.first_text());
    }
}
