//! HTTP routing for the chat proxy

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::error::ChatError;
use crate::proxy::{ChatProxy, ChatRequest};

pub type SharedProxy = Arc<ChatProxy>;

/// Successful chat response
#[derive(Serialize)]
struct ChatResponse {
    content: String,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error_response(status, self.to_string())
    }
}

/// Chat endpoint
async fn chat(
    State(proxy): State<SharedProxy>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected chat request body");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match proxy.chat(&request).await {
        Ok(content) => Json(ChatResponse { content }).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Build the axum router serving `POST /api/chat`.
pub fn build_router(proxy: SharedProxy) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(proxy)
}
