use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::post,
    Router,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{ IntoResponse, Response },
    Json,
};
use log::{ info, error };
use tower_http::cors::{ Any, CorsLayer };
use tower_http::services::{ ServeDir, ServeFile };

use crate::config::AppConfig;
use crate::config::prompt::PromptConfig;
use crate::history::translate_history;
use crate::llm::{ self, ChatClient };
use crate::models::chat::{ AnalyzeRequest, ChatRequest };
use crate::relay;

#[derive(Clone)]
struct AppState {
    config: AppConfig,
    prompts: Arc<PromptConfig>,
}

pub fn build_router(config: AppConfig, prompts: Arc<PromptConfig>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let index = ServeFile::new(Path::new(&config.static_dir).join(&config.index_page));
    let assets = ServeDir::new(&config.static_dir);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/analyze", post(analyze_handler))
        .route_service("/", index)
        .fallback_service(assets)
        .layer(cors)
        .with_state(AppState { config, prompts })
}

pub async fn start_http_server(
    addr: &str,
    config: AppConfig,
    prompts: Arc<PromptConfig>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    info!("Starting HTTP server on: http://{}", addr);

    let app = build_router(config, prompts);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Each request gets its own upstream client handle, built from the
/// injected configuration. A missing credential or a failed build is a
/// pre-stream failure and maps to 500.
fn new_upstream_client(config: &AppConfig) -> Result<Arc<dyn ChatClient>, Response> {
    llm::new_client(config).map_err(|e| {
        error!("Failed to create upstream client: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(e) => {
            error!("Decode error: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    if req.history.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "History must contain at least one message",
        ).into_response();
    }

    let client = match new_upstream_client(&state.config) {
        Ok(c) => c,
        Err(resp) => {
            return resp;
        }
    };

    let history = translate_history(&req.history);
    match
        client.stream_generate(
            history,
            &req.new_message,
            &state.prompts.chat_system_instruction,
        ).await
    {
        Ok(chunks) => relay::stream_response(chunks),
        Err(e) => {
            error!("Failed to open generation stream: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to reach upstream model").into_response()
        }
    }
}

async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(e) => {
            error!("Decode error: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    if req.history.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "History must contain at least one message",
        ).into_response();
    }

    if !req.analysis_type.is_empty() {
        info!("Analysis requested (type tag: {})", req.analysis_type);
    }

    let client = match new_upstream_client(&state.config) {
        Ok(c) => c,
        Err(resp) => {
            return resp;
        }
    };

    // Same streaming mechanics as chat, driven by the fixed analysis
    // prompt instead of a caller-supplied message.
    let history = translate_history(&req.history);
    match
        client.stream_generate(
            history,
            &state.prompts.analysis_prompt,
            &state.prompts.analysis_system_instruction,
        ).await
    {
        Ok(chunks) => relay::stream_response(chunks),
        Err(e) => {
            error!("Failed to open generation stream: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to reach upstream model").into_response()
        }
    }
}
