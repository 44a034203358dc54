use std::convert::Infallible;

use async_stream::stream;
use axum::body::{ Body, Bytes };
use axum::http::header;
use axum::response::{ IntoResponse, Response };
use futures::{ Stream, StreamExt };
use log::error;

use crate::llm::ChunkStream;

/// Turns an upstream chunk stream into SSE frames, in arrival order.
/// Chunks without a usable text part emit nothing. An upstream error
/// emits one terminal error frame and ends the stream; nothing further
/// is pulled from upstream after that.
pub fn sse_frames(chunks: ChunkStream) -> impl Stream<Item = Result<Bytes, Infallible>> {
    stream! {
        let mut chunks = chunks;
        while let Some(item) = chunks.next().await {
            match item {
                Ok(chunk) => {
                    if let Some(text) = chunk.first_text() {
                        yield Ok(Bytes::from(format!("data: {}\n\n", text)));
                    }
                }
                Err(e) => {
                    error!("Stream error: {}", e);
                    yield Ok(Bytes::from(format!("data: [ERROR] Stream failed: {}\n\n", e)));
                    break;
                }
            }
        }
    }
}

/// Streaming response for both chat and analysis. Each frame is written
/// as its own body chunk so the client sees incremental progress instead
/// of one buffered payload at connection close.
pub fn stream_response(chunks: ChunkStream) -> Response {
    let body = Body::from_stream(sse_frames(chunks));
    (
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        body,
    ).into_response()
}
