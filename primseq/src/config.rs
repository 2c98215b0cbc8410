//! Configuration for parallel traversal.
//!
//! Settings come from defaults, the environment, or (with the `yaml`
//! feature) a YAML document:
//!
//! ```yaml
//! min_split_size: 512
//! max_threads: 4
//! ```

use thiserror::Error;

/// Errors raised while loading a [`TraversalConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting has a value that cannot be used.
    #[error("Invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        /// Setting name
        key: String,
        /// Offending value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The configuration document is not shaped as expected.
    #[error("Invalid configuration structure: {0}")]
    InvalidStructure(String),

    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// The traversal thread pool could not be built.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Controls how [`crate::traversal`] splits work and sizes its thread pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Pieces at or below this many elements are not split further.
    pub min_split_size: usize,

    /// Worker count of a [`Traversal`](crate::traversal::Traversal) pool.
    pub max_threads: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            min_split_size: 1024,
            max_threads: rayon::current_num_threads(),
        }
    }
}

impl TraversalConfig {
    /// Environment variable overriding `min_split_size`.
    pub const MIN_SPLIT_SIZE_ENV: &'static str = "PRIMSEQ_MIN_SPLIT_SIZE";

    /// Environment variable overriding `max_threads`.
    pub const MAX_THREADS_ENV: &'static str = "PRIMSEQ_MAX_THREADS";

    /// Defaults overridden by `PRIMSEQ_MIN_SPLIT_SIZE` and `PRIMSEQ_MAX_THREADS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to something other than a
    /// positive integer.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the variable names.
    ///
    /// # Errors
    ///
    /// Returns an error if a looked-up value is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(Self::MIN_SPLIT_SIZE_ENV) {
            config.min_split_size = parse_positive(Self::MIN_SPLIT_SIZE_ENV, &value)?;
        }
        if let Some(value) = lookup(Self::MAX_THREADS_ENV) {
            config.max_threads = parse_positive(Self::MAX_THREADS_ENV, &value)?;
        }
        tracing::debug!(?config, "loaded traversal config");
        Ok(config)
    }

    /// Defaults overridden by the keys of a YAML mapping.
    ///
    /// Recognized keys are `min_split_size` and `max_threads`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse, is not a mapping,
    /// contains unknown keys, or holds non-positive values.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        use yaml_rust2::YamlLoader;

        let docs = YamlLoader::load_from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();
        let Some(doc) = docs.first() else {
            return Ok(config);
        };
        let root = doc.as_hash().ok_or_else(|| {
            ConfigError::InvalidStructure("Root element must be a mapping".to_string())
        })?;

        for (key, value) in root {
            let key = key.as_str().ok_or_else(|| {
                ConfigError::InvalidStructure("Keys must be strings".to_string())
            })?;
            let raw = match value.as_i64() {
                Some(n) => n.to_string(),
                None => format!("{value:?}"),
            };
            match key {
                "min_split_size" => config.min_split_size = parse_positive(key, &raw)?,
                "max_threads" => config.max_threads = parse_positive(key, &raw)?,
                other => {
                    return Err(ConfigError::InvalidStructure(format!(
                        "Unknown key '{other}'"
                    )));
                }
            }
        }
        tracing::debug!(?config, "loaded traversal config");
        Ok(config)
    }
}

fn parse_positive(key: &str, value: &str) -> ConfigResult<usize> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let n: usize = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a positive integer"))?;
    if n == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(n)
}
