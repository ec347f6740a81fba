/*
 * credentials.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Where API keys come from.
 */

use std::collections::BTreeMap;

/// Looks up provider API keys by environment variable name.
pub trait CredentialSource: Send + Sync {
    /// The key stored under `var`, if any. Empty values count as missing.
    fn get(&self, var: &str) -> Option<String>;
}

/// Reads keys from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn get(&self, var: &str) -> Option<String> {
        std::env::var(var).ok().filter(|value| !value.is_empty())
    }
}

/// A fixed set of keys, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    keys: BTreeMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, var: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(var.into(), key.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn get(&self, var: &str) -> Option<String> {
        self.keys.get(var).filter(|value| !value.is_empty()).cloned()
    }
}
