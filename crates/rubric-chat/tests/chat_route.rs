/*
 * chat_route.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Tests for the chat proxy and its HTTP route.
 */

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use rubric_chat::{
    ChatError, ChatMessage, ChatProxy, ChatRequest, Provider, StaticCredentials, Transport,
    TransportError, UpstreamRequest, UpstreamResponse, build_router,
};
use rubric_core::{ChatConfig, ProviderOverride};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Returns one canned reply and remembers what was sent.
struct CannedTransport {
    reply: Result<UpstreamResponse, TransportError>,
    sent: Mutex<Vec<UpstreamRequest>>,
}

impl CannedTransport {
    fn ok(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(UpstreamResponse {
                status,
                body: body.to_string(),
            }),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn raw(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(UpstreamResponse {
                status,
                body: body.to_string(),
            }),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(TransportError(message.to_string())),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<UpstreamRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn post(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.reply.clone()
    }
}

fn all_keys() -> Arc<StaticCredentials> {
    Arc::new(
        StaticCredentials::new()
            .with("OPENAI_API_KEY", "sk-openai")
            .with("ANTHROPIC_API_KEY", "sk-claude")
            .with("GOOGLE_API_KEY", "g-key")
            .with("DEEPSEEK_API_KEY", "sk-deepseek"),
    )
}

fn openai_reply(text: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] })
}

fn request(provider: &str, messages: Vec<ChatMessage>) -> ChatRequest {
    ChatRequest {
        messages,
        provider: Some(provider.to_string()),
    }
}

async fn post_json(proxy: ChatProxy, body: String) -> (StatusCode, Value) {
    let response = build_router(Arc::new(proxy))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_proxy_returns_reply_text() {
    let transport = CannedTransport::ok(200, openai_reply("ねこ means cat"));
    let proxy = ChatProxy::new(transport.clone(), all_keys());

    let reply = proxy
        .chat(&request("openai", vec![ChatMessage::user("猫?")]))
        .await
        .unwrap();
    assert_eq!(reply, "ねこ means cat");

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(sent[0].header("Authorization"), Some("Bearer sk-openai"));
}

#[tokio::test]
async fn test_empty_messages_checked_first() {
    let transport = CannedTransport::ok(200, openai_reply("x"));
    let proxy = ChatProxy::new(transport.clone(), Arc::new(StaticCredentials::new()));

    let err = proxy.chat(&request("nope", vec![])).await.unwrap_err();
    assert!(matches!(err, ChatError::NoMessages));
    assert_eq!(err.to_string(), "No messages provided");
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_provider() {
    let proxy = ChatProxy::new(CannedTransport::ok(200, json!({})), all_keys());
    let err = proxy
        .chat(&request("mistral", vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid provider");
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_missing_credential_names_the_variable() {
    let transport = CannedTransport::ok(200, json!({}));
    let proxy = ChatProxy::new(
        transport.clone(),
        Arc::new(StaticCredentials::new().with("OPENAI_API_KEY", "sk")),
    );
    let err = proxy
        .chat(&request("gemini", vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "API key not configured. Please set GOOGLE_API_KEY in your .env file."
    );
    assert!(!err.is_client_error());
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_carries_provider_and_body() {
    let transport = CannedTransport::raw(429, "rate limited");
    let proxy = ChatProxy::new(transport.clone(), all_keys());
    let err = proxy
        .chat(&request("claude", vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Claude API error: rate limited");
    assert!(matches!(err, ChatError::Upstream { status: 429, .. }));
    // Never retried
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn test_transport_and_malformed_failures() {
    let proxy = ChatProxy::new(CannedTransport::failing("connection refused"), all_keys());
    let err = proxy
        .chat(&request("deepseek", vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "DeepSeek request failed: connection refused");

    let proxy = ChatProxy::new(CannedTransport::raw(200, "not json"), all_keys());
    let err = proxy
        .chat(&request("gemini", vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ChatError::MalformedResponse {
            provider: Provider::Gemini
        }
    ));
}

#[tokio::test]
async fn test_config_overrides_and_default_provider() {
    let mut providers = BTreeMap::new();
    providers.insert(
        "deepseek".to_string(),
        ProviderOverride {
            model: Some("deepseek-reasoner".to_string()),
            url: Some("http://localhost:9000/v1/chat/completions".to_string()),
        },
    );
    providers.insert("mistral".to_string(), ProviderOverride::default());
    let config = ChatConfig {
        default_provider: Some("deepseek".to_string()),
        providers,
    };

    let transport = CannedTransport::ok(200, openai_reply("ok"));
    let proxy = ChatProxy::from_config(&config, transport.clone(), all_keys());
    assert_eq!(
        proxy.settings(Provider::OpenAi),
        Provider::OpenAi.default_settings()
    );

    let reply = proxy
        .chat(&ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            provider: None,
        })
        .await
        .unwrap();
    assert_eq!(reply, "ok");

    let sent = transport.sent();
    assert_eq!(sent[0].url, "http://localhost:9000/v1/chat/completions");
    assert_eq!(sent[0].body["model"], "deepseek-reasoner");
}

#[tokio::test]
async fn test_missing_provider_without_default_is_invalid() {
    let proxy = ChatProxy::new(CannedTransport::ok(200, json!({})), all_keys());
    let err = proxy
        .chat(&ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            provider: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::InvalidProvider(_)));
}

#[tokio::test]
async fn test_route_success() {
    let transport = CannedTransport::ok(
        200,
        json!({ "content": [{ "type": "text", "text": "Hello!" }] }),
    );
    let proxy = ChatProxy::new(transport.clone(), all_keys());
    let body = json!({
        "messages": [
            { "role": "assistant", "content": "Be brief." },
            { "role": "user", "content": "Hi" },
        ],
        "provider": "claude",
    });

    let (status, json) = post_json(proxy, body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "content": "Hello!" }));
    assert_eq!(transport.sent()[0].body["system"], "Be brief.");
}

#[tokio::test]
async fn test_route_status_codes() {
    let proxy = || ChatProxy::new(CannedTransport::raw(500, "boom"), all_keys());

    let (status, json) = post_json(
        proxy(),
        json!({ "messages": [], "provider": "openai" }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "No messages provided" }));

    let (status, json) = post_json(
        proxy(),
        json!({ "messages": [{ "role": "user", "content": "x" }], "provider": "bard" }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "Invalid provider" }));

    let (status, json) = post_json(
        proxy(),
        json!({ "messages": [{ "role": "user", "content": "x" }], "provider": "openai" })
            .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "OpenAI API error: boom" }));
}

#[tokio::test]
async fn test_route_rejects_malformed_body() {
    let proxy = ChatProxy::new(CannedTransport::ok(200, json!({})), all_keys());
    let (status, json) = post_json(proxy, "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}
