/*
 * proxy.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Validates chat requests and forwards them to the chosen provider.
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use rubric_core::ChatConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::credentials::CredentialSource;
use crate::error::{ChatError, Result};
use crate::provider::{ChatMessage, Provider, ProviderSettings, build_request, extract_content};
use crate::transport::Transport;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Falls back to the configured default provider when absent.
    #[serde(default)]
    pub provider: Option<String>,
}

/// Forwards chat conversations to an upstream provider.
pub struct ChatProxy {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialSource>,
    settings: BTreeMap<Provider, ProviderSettings>,
    default_provider: Option<Provider>,
}

impl ChatProxy {
    /// A proxy using the built-in endpoint and model of every provider.
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            transport,
            credentials,
            settings: Provider::ALL
                .iter()
                .map(|p| (*p, p.default_settings()))
                .collect(),
            default_provider: None,
        }
    }

    /// A proxy with the overrides from the `chat` configuration section.
    ///
    /// Unknown provider names in the configuration are logged and ignored.
    pub fn from_config(
        config: &ChatConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        let mut proxy = Self::new(transport, credentials);

        for (name, overrides) in &config.providers {
            let Some(provider) = Provider::from_str(name) else {
                warn!(provider = %name, "Ignoring configuration for unknown chat provider");
                continue;
            };
            let settings = proxy
                .settings
                .entry(provider)
                .or_insert_with(|| provider.default_settings());
            if let Some(url) = &overrides.url {
                settings.url = url.clone();
            }
            if let Some(model) = &overrides.model {
                settings.model = model.clone();
            }
        }

        if let Some(name) = &config.default_provider {
            proxy.default_provider = Provider::from_str(name);
            if proxy.default_provider.is_none() {
                warn!(provider = %name, "Unknown default chat provider");
            }
        }
        proxy
    }

    /// Endpoint and model in effect for `provider`.
    pub fn settings(&self, provider: Provider) -> ProviderSettings {
        self.settings
            .get(&provider)
            .cloned()
            .unwrap_or_else(|| provider.default_settings())
    }

    /// Resolve the provider named in a request.
    pub fn resolve_provider(&self, name: Option<&str>) -> Result<Provider> {
        match name {
            Some(name) => {
                Provider::from_str(name).ok_or_else(|| ChatError::InvalidProvider(name.to_string()))
            }
            None => self
                .default_provider
                .ok_or_else(|| ChatError::InvalidProvider(String::new())),
        }
    }

    /// Send the conversation upstream and return the reply text.
    ///
    /// Failures are returned as-is; nothing is retried.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        if request.messages.is_empty() {
            return Err(ChatError::NoMessages);
        }
        let provider = self.resolve_provider(request.provider.as_deref())?;

        let var = provider.credential_var();
        let api_key = self
            .credentials
            .get(var)
            .ok_or(ChatError::MissingCredential { var })?;

        let settings = self.settings(provider);
        let upstream = build_request(provider, &settings, &api_key, &request.messages);
        debug!(
            provider = provider.as_str(),
            model = %settings.model,
            messages = request.messages.len(),
            "Forwarding chat request"
        );

        let response = self.transport.post(upstream).await.map_err(|e| {
            warn!(provider = provider.as_str(), error = %e, "Chat transport failed");
            ChatError::Transport {
                provider,
                message: e.to_string(),
            }
        })?;

        if !response.is_success() {
            warn!(
                provider = provider.as_str(),
                status = response.status,
                "Chat provider returned an error"
            );
            return Err(ChatError::Upstream {
                provider,
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|body| extract_content(provider, &body))
            .ok_or(ChatError::MalformedResponse { provider })
    }
}
