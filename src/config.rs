//! Configuration loading
//!
//! `defaults/combinators.default.toml` is embedded into the library so that
//! documentation and runtime behavior stay in sync. Applications layer their
//! own files and overrides on top of those defaults via [`Loader`] before
//! deserializing into [`CombinatorConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::tree::{DuplicateLabels, TreeBuilder};

const DEFAULT_TOML: &str = include_str!("../defaults/combinators.default.toml");

/// Top-level configuration consumed by the whole-input entry points.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CombinatorConfig {
    pub tree: TreeConfig,
    pub parsing: ParsingConfig,
    pub limits: LimitsConfig,
}

/// Parse-tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeConfig {
    pub duplicate_labels: DuplicateLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParsingConfig {
    pub allow_trailing_whitespace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    /// `0` disables the limit
    pub max_input_bytes: usize,
}

impl CombinatorConfig {
    /// Tree builder configured with this duplicate-label policy
    pub fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new(self.tree.duplicate_labels)
    }

    /// The input limit, if one is set
    pub fn input_limit(&self) -> Option<usize> {
        match self.limits.max_input_bytes {
            0 => None,
            limit => Some(limit),
        }
    }
}

/// Mirrors `defaults/combinators.default.toml`
impl Default for CombinatorConfig {
    fn default() -> Self {
        CombinatorConfig {
            tree: TreeConfig {
                duplicate_labels: DuplicateLabels::Collect,
            },
            parsing: ParsingConfig {
                allow_trailing_whitespace: true,
            },
            limits: LimitsConfig {
                max_input_bytes: 1024 * 1024,
            },
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text, e.g. settings embedded in a host application.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CombinatorConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CombinatorConfig, ConfigError> {
    Loader::new().build()
}
