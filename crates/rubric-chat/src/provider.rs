/*
 * provider.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Provider table, upstream request shaping and response extraction.
 */

//! Provider table, upstream request shaping and response extraction.
//!
//! Each provider speaks its own dialect:
//!
//! | Provider | Auth                         | Reply at                             |
//! |----------|------------------------------|--------------------------------------|
//! | openai   | `Authorization: Bearer`      | `choices[0].message.content`         |
//! | claude   | `x-api-key`                  | `content[0].text`                    |
//! | gemini   | `?key=` query parameter      | `candidates[0].content.parts[0].text`|
//! | deepseek | `Authorization: Bearer`      | `choices[0].message.content`         |

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const CLAUDE_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// A supported upstream chat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    OpenAi,
    Claude,
    Gemini,
    DeepSeek,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::OpenAi,
        Provider::Claude,
        Provider::Gemini,
        Provider::DeepSeek,
    ];

    /// Parse a provider name as sent by clients (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Provider::OpenAi),
            "claude" => Some(Provider::Claude),
            "gemini" => Some(Provider::Gemini),
            "deepseek" => Some(Provider::DeepSeek),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::DeepSeek => "deepseek",
        }
    }

    /// Name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Claude => "Claude",
            Provider::Gemini => "Gemini",
            Provider::DeepSeek => "DeepSeek",
        }
    }

    /// Environment variable holding the API key.
    pub fn credential_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Claude => "ANTHROPIC_API_KEY",
            Provider::Gemini => "GOOGLE_API_KEY",
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    pub fn default_settings(&self) -> ProviderSettings {
        let (url, model) = match self {
            Provider::OpenAi => ("https://api.openai.com/v1/chat/completions", "gpt-4o-mini"),
            Provider::Claude => ("https://api.anthropic.com/v1/messages", "claude-3-haiku-20240307"),
            Provider::Gemini => (
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent",
                "gemini-1.5-flash",
            ),
            Provider::DeepSeek => ("https://api.deepseek.com/v1/chat/completions", "deepseek-chat"),
        };
        ProviderSettings {
            url: url.to_string(),
            model: model.to_string(),
        }
    }
}

/// Endpoint and model used for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub url: String,
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A request ready to be sent upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl UpstreamRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Shape the upstream request for `provider`.
pub fn build_request(
    provider: Provider,
    settings: &ProviderSettings,
    api_key: &str,
    messages: &[ChatMessage],
) -> UpstreamRequest {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    match provider {
        Provider::OpenAi | Provider::DeepSeek => {
            headers.push(("Authorization".to_string(), format!("Bearer {api_key}")));
            UpstreamRequest {
                url: settings.url.clone(),
                headers,
                body: json!({
                    "model": settings.model,
                    "messages": messages,
                }),
            }
        }
        Provider::Claude => {
            headers.push(("x-api-key".to_string(), api_key.to_string()));
            headers.push(("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string()));

            // A leading assistant message acts as the system prompt
            let (system, rest) = match messages.split_first() {
                Some((first, rest)) if first.role == Role::Assistant => {
                    (first.content.as_str(), rest)
                }
                _ => (DEFAULT_SYSTEM_PROMPT, messages),
            };
            let system = if system.is_empty() {
                DEFAULT_SYSTEM_PROMPT
            } else {
                system
            };
            UpstreamRequest {
                url: settings.url.clone(),
                headers,
                body: json!({
                    "model": settings.model,
                    "max_tokens": CLAUDE_MAX_TOKENS,
                    "system": system,
                    "messages": rest,
                }),
            }
        }
        Provider::Gemini => {
            let contents: Vec<Value> = messages
                .iter()
                .map(|m| {
                    let role = match m.role {
                        Role::Assistant => "model",
                        Role::User => "user",
                    };
                    json!({ "role": role, "parts": [{ "text": m.content }] })
                })
                .collect();
            UpstreamRequest {
                url: format!("{}?key={}", settings.url, api_key),
                headers,
                body: json!({ "contents": contents }),
            }
        }
    }
}

/// Pull the reply text out of an upstream response body.
pub fn extract_content(provider: Provider, body: &Value) -> Option<String> {
    let text = match provider {
        Provider::OpenAi | Provider::DeepSeek => body.pointer("/choices/0/message/content"),
        Provider::Claude => body.pointer("/content/0/text"),
        Provider::Gemini => body.pointer("/candidates/0/content/parts/0/text"),
    };
    text.and_then(Value::as_str).map(str::to_string)
}
