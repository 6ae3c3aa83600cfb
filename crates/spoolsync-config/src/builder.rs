//! Configuration builder for flexible configuration loading

use crate::{Config, ConfigError, ConfigResult};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Configuration builder for loading configuration from multiple sources
#[derive(Debug)]
pub struct ConfigBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<ConfigSource>,
    env_separator: String,
}

#[derive(Debug, Clone)]
enum ConfigSource {
    File { path: PathBuf, format: FileFormat },
    Defaults,
    Environment { prefix: String },
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
            env_separator: "__".to_string(),
        }
    }

    /// Add default configuration values
    pub fn add_defaults(mut self) -> Self {
        self.sources.push(ConfigSource::Defaults);
        self
    }

    /// Add a configuration file source
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File { path, format });
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(ConfigSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Set environment variable separator (default: "__")
    pub fn env_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.env_separator = separator.into();
        self
    }

    /// Build the configuration
    pub fn build(mut self) -> ConfigResult<Config> {
        // Start with defaults as the base configuration
        let defaults = Config::default();
        let defaults_value = serde_yaml::to_value(&defaults)
            .map_err(|e| ConfigError::other(format!("Failed to serialize defaults: {}", e)))?;
        self.inner = self
            .inner
            .add_source(config::Config::try_from(&defaults_value)?);

        for source in &self.sources {
            match source {
                ConfigSource::File { path, format } => {
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                ConfigSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix).separator(&self.env_separator),
                    );
                }
                ConfigSource::Defaults => {
                    // Already handled above
                }
            }
        }

        let config = self.inner.build()?;
        let result: Config = config.try_deserialize()?;

        Self::validate(&result)?;
        Ok(result)
    }

    /// Try to build the configuration, returning defaults on error
    pub fn build_or_default(self) -> Config {
        self.build().unwrap_or_default()
    }

    fn validate(config: &Config) -> ConfigResult<()> {
        if config.sync.debounce_window_ms == 0 {
            return Err(ConfigError::invalid_value(
                "sync.debounce_window_ms",
                "quiet window must be at least one millisecond",
            ));
        }
        Ok(())
    }

    fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn yaml_file() -> tempfile::NamedTempFile {
        Builder::new().suffix(".yaml").tempfile().unwrap()
    }

    #[test]
    fn test_defaults_only() {
        let config = ConfigBuilder::new().add_defaults().build().unwrap();
        assert_eq!(config.sync.debounce_window_ms, 1000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = yaml_file();
        writeln!(file, "sync:\n  auto_sync: true\n  debounce_window_ms: 250").unwrap();

        let config = ConfigBuilder::new()
            .add_defaults()
            .add_source_file(file.path())
            .build()
            .unwrap();
        assert!(config.sync.auto_sync);
        assert_eq!(config.sync.debounce_window_ms, 250);
        // Untouched sections keep their defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_debounce_window_is_rejected() {
        let mut file = yaml_file();
        writeln!(file, "sync:\n  debounce_window_ms: 0").unwrap();

        let result = ConfigBuilder::new()
            .add_defaults()
            .add_source_file(file.path())
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let config = ConfigBuilder::new()
            .add_defaults()
            .add_source_file("/nonexistent/spoolsync.yaml")
            .build()
            .unwrap();
        assert_eq!(config.sync.debounce_window_ms, 1000);
    }
}
