//! Chat proxy for rubric sites
//!
//! Forwards a conversation to one of several hosted chat APIs and returns the
//! reply text:
//!
//! - [`provider`] - provider table, upstream request shaping, reply extraction
//! - [`ChatProxy`] - validation, credential lookup and forwarding
//! - [`Transport`] - the HTTP client, supplied by the embedder
//! - [`build_router`] - `POST /api/chat` as an axum router
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rubric_chat::{ChatProxy, EnvCredentials, build_router};
//!
//! let proxy = ChatProxy::from_config(&config.chat, Arc::new(my_transport), Arc::new(EnvCredentials));
//! let router = build_router(Arc::new(proxy));
//! ```

pub mod credentials;
pub mod error;
pub mod provider;
pub mod proxy;
pub mod server;
pub mod transport;

pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use error::{ChatError, Result};
pub use provider::{ChatMessage, Provider, ProviderSettings, Role, UpstreamRequest};
pub use proxy::{ChatProxy, ChatRequest};
pub use server::{SharedProxy, build_router};
pub use transport::{Transport, TransportError, UpstreamResponse};
