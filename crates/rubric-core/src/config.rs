/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * `rubric.yml` configuration.
 */

//! `rubric.yml` configuration.
//!
//! ```yaml
//! transforms:
//!   callout: true
//!   highlight: true
//!   weaken: true
//!   hover-reveal: true
//! callout:
//!   base-class: callout
//! chat:
//!   default-provider: openai
//!   providers:
//!     claude:
//!       model: claude-3-haiku-20240307
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that typos surface
//! as errors instead of silently doing nothing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RubricError};
use crate::transforms::DEFAULT_BASE_CLASS;

/// File names searched for by [`RubricConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["rubric.yml", "rubric.yaml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RubricConfig {
    pub transforms: TransformsConfig,
    pub callout: CalloutConfig,
    pub chat: ChatConfig,
}

/// Which transforms run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TransformsConfig {
    pub callout: bool,
    pub highlight: bool,
    pub weaken: bool,
    pub hover_reveal: bool,
}

impl Default for TransformsConfig {
    fn default() -> Self {
        Self {
            callout: true,
            highlight: true,
            weaken: true,
            hover_reveal: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CalloutConfig {
    /// First class of every callout container
    pub base_class: String,
}

impl Default for CalloutConfig {
    fn default() -> Self {
        Self {
            base_class: DEFAULT_BASE_CLASS.to_string(),
        }
    }
}

/// Chat proxy settings, keyed by provider name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChatConfig {
    pub default_provider: Option<String>,
    pub providers: BTreeMap<String, ProviderOverride>,
}

/// Replaces the built-in model or endpoint of one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProviderOverride {
    pub model: Option<String>,
    pub url: Option<String>,
}

impl RubricConfig {
    /// Parse configuration from YAML text.
    ///
    /// `origin` names the source in error messages. An empty document
    /// yields the defaults.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| RubricError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content, path)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Search for a config file in `start_dir` and its parents.
    pub fn discover(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
        let mut current = Some(start_dir.as_ref());
        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }
        None
    }

    /// Load the config file that applies to `input`, or the defaults if
    /// there is none.
    pub fn for_input(input: impl AsRef<Path>) -> Result<Self> {
        let input = input.as_ref();
        let start = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        match Self::discover(&start) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
