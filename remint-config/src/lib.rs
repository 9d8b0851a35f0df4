//! Shared configuration loader for the remint toolchain.
//!
//! `defaults/remint.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! and CLI overrides on top of those defaults via [`Loader`] before
//! deserializing into [`RemintConfig`]. Out-of-range values are rejected at
//! build time, before any processing begins.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/remint.default.toml");

/// Legal bounds for the read window, in bytes.
pub const WINDOW_BYTES_MIN: usize = 1024;
pub const WINDOW_BYTES_MAX: usize = 8192;
/// Legal bounds for the cross-window word overlap.
pub const OVERLAP_WORDS_MIN: usize = 10;
pub const OVERLAP_WORDS_MAX: usize = 20;

/// Top-level configuration consumed by remint applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RemintConfig {
    pub chunking: ChunkingConfig,
}

/// Knobs for the chunk/overlap coordinator. Read-only after startup.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChunkingConfig {
    pub window_bytes: usize,
    pub overlap_words: usize,
}

impl ChunkingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "chunking.window_bytes",
            self.window_bytes,
            WINDOW_BYTES_MIN,
            WINDOW_BYTES_MAX,
        )?;
        check_range(
            "chunking.overlap_words",
            self.overlap_words,
            OVERLAP_WORDS_MIN,
            OVERLAP_WORDS_MAX,
        )
    }
}

fn check_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Message(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and bounds-check the configuration.
    pub fn build(self) -> Result<RemintConfig, ConfigError> {
        let cfg: RemintConfig = self.builder.build()?.try_deserialize()?;
        cfg.chunking.validate()?;
        Ok(cfg)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RemintConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.chunking.window_bytes, 4096);
        assert_eq!(config.chunking.overlap_words, 12);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("chunking.overlap_words", 15_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.chunking.overlap_words, 15);
    }

    #[test]
    fn rejects_out_of_range_window() {
        let err = Loader::new()
            .set_override("chunking.window_bytes", 100_i64)
            .expect("override to apply")
            .build()
            .expect_err("bounds check to fire");
        assert!(err.to_string().contains("chunking.window_bytes"));
    }

    #[test]
    fn rejects_out_of_range_overlap() {
        let err = Loader::new()
            .set_override("chunking.overlap_words", 5_i64)
            .expect("override to apply")
            .build()
            .expect_err("bounds check to fire");
        assert!(err.to_string().contains("chunking.overlap_words"));
    }
}
