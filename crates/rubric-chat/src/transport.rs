/*
 * transport.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The HTTP client seam of the chat proxy.
 */

//! The HTTP client seam of the chat proxy.
//!
//! The proxy never talks to the network itself. Embedders supply a
//! [`Transport`] backed by whatever HTTP client their application already
//! uses; tests supply a canned one.

use async_trait::async_trait;

use crate::provider::UpstreamRequest;

/// Status and raw body of an upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (connection refused, timeout, ...).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one JSON `POST` upstream.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}
