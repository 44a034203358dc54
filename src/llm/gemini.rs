use async_trait::async_trait;
use futures_util::StreamExt;
use log::info;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::{ ChatClient, ChunkStream, Content, GenerateChunk, LlmError };

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, api_key, model, base_url })
    }
}

fn parse_sse_line(line: &str) -> Option<GenerateChunk> {
    let payload = line.trim().strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    serde_json::from_str(payload).ok()
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn stream_generate(
        &self,
        history: Vec<Content>,
        message: &str,
        system_instruction: &str
    ) -> Result<ChunkStream, LlmError> {
        let mut contents = history;
        contents.push(Content::user(message));

        let payload = GenerateRequest {
            contents,
            system_instruction: Content::system(system_instruction),
        };

        let url = format!(
            "{}/models/{}:streamGenerateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        info!("Opening generation stream (model={})", self.model);

        let request = self.http
            .post(url)
            .query(&[("alt", "sse"), ("key", self.api_key.as_str())])
            .json(&payload);

        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let resp = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    let _ = tx.send(Err(LlmError::Http(e))).await;
                    return;
                }
            };

            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                let _ = tx.send(Err(LlmError::Status { status, body })).await;
                return;
            }

            let mut bytes = resp.bytes_stream();
            let mut buf = Vec::<u8>::new();
            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(data) => {
                        buf.extend_from_slice(&data);
                        while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                            let line: Vec<u8> = buf.drain(..=pos).collect();
                            if let Some(parsed) = parse_sse_line(&String::from_utf8_lossy(&line)) {
                                if tx.send(Ok(parsed)).await.is_err() {
                                    // Receiver dropped: stop pulling from upstream.
                                    return;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(LlmError::Http(e))).await;
                        return;
                    }
                }
            }
            // Trailing line without a final newline.
            if let Some(parsed) = parse_sse_line(&String::from_utf8_lossy(&buf)) {
                let _ = tx.send(Ok(parsed)).await;
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}
