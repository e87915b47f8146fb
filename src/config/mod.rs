mod models;
mod normalizer;
mod token;

use regex::Regex;
use std::{fs, path::Path, sync::Arc};
use url::Url;

pub use models::ConfigFile; // Re-export the on-disk model for callers building configs in code.
pub use normalizer::{ReferenceNormalizer, UrlNormalizer};
pub use token::{EnvTokenProvider, StaticToken, TokenProvider};

/// Validated, read-only settings shared by both downloaders.
#[derive(Debug, Clone)]
pub struct Config {
    root_url: Url,
    contents_base: Url,
    branch: String,
    flat_data_url: Url,
    normalizer: ReferenceNormalizer,
    higher_level_label: String,
    access_property: String,
    cache_key: String,
}

// ---- Loading ----

impl Config {
    /// Load from a JSON file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&data)
    }

    /// Load from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let parsed: ConfigFile = serde_json::from_str(json).map_err(ConfigError::Json)?;
        Self::try_from(parsed)
    }

    /// Load from an env var containing JSON.
    pub fn from_env(var: &str) -> Result<Self, ConfigError> {
        let s = std::env::var(var).map_err(|_| ConfigError::MissingEnv(var.to_string()))?;
        Self::from_json_str(&s)
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let pattern = Regex::new(&file.reference_pattern)?;

        Ok(Self {
            root_url: parse_url("rootUrl", &file.root_url)?,
            contents_base: parse_base_url("contentsBase", &file.contents_base)?,
            branch: file.branch,
            flat_data_url: parse_url("flatDataUrl", &file.flat_data_url)?,
            normalizer: ReferenceNormalizer::new(pattern, file.reference_replacement),
            higher_level_label: file.higher_level_label,
            access_property: file.access_property,
            cache_key: file.cache_key,
        })
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::Url {
        field,
        value: raw.to_string(),
        source,
    })
}

fn parse_base_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = parse_url(field, raw)?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase {
            field,
            value: raw.to_string(),
        });
    }
    Ok(url)
}

// ---- Accessors ----

impl Config {
    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    pub fn flat_data_url(&self) -> &Url {
        &self.flat_data_url
    }

    pub fn normalizer(&self) -> &ReferenceNormalizer {
        &self.normalizer
    }

    /// Title a host shows above the top-level entries.
    pub fn higher_level_label(&self) -> &str {
        &self.higher_level_label
    }

    /// Key under which a host persists downloaded trees.
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Token lookup bound to this config's access property.
    pub fn env_token_provider(&self) -> Arc<dyn TokenProvider> {
        Arc::new(EnvTokenProvider::new(self.access_property.clone()))
    }

    /// `<contents-base>/<path>?ref=<branch>`
    pub fn contents_url(&self, path: &str) -> Url {
        let mut url = self.contents_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.query_pairs_mut().clear().append_pair("ref", &self.branch);
        url
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self::try_from(ConfigFile::default()).unwrap_or_else(|err| panic!("built-in configuration is invalid: {err}"))
    }
}

/// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing env var: {0}")]
    MissingEnv(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid reference pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid URL for {field} '{value}': {source}")]
    Url {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("{field} '{value}' cannot carry a path")]
    NotABase { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.contents_url("api").query(), Some("ref=main"));
        assert_eq!(config.higher_level_label(), "Browser compatibility data");
    }

    #[test]
    fn contents_url_appends_path_and_branch() {
        let config = Config::default();
        assert_eq!(
            config.contents_url("api/AbortController.json").as_str(),
            "https://api.github.com/repos/mdn/browser-compat-data/contents/api/AbortController.json?ref=main"
        );
    }

    #[test]
    fn contents_url_tolerates_trailing_slash_on_base() {
        let mut file = ConfigFile::default();
        file.contents_base = "http://localhost:9000/contents/".into();
        file.branch = "develop".into();
        let config = Config::try_from(file).unwrap();

        assert_eq!(config.contents_url("css").as_str(), "http://localhost:9000/contents/css?ref=develop");
    }

    #[test]
    fn parses_camel_case_json() {
        let json = r#"{
            "rootUrl": "http://localhost:1/contents?ref=main",
            "contentsBase": "http://localhost:1/contents",
            "flatDataUrl": "http://localhost:1/items",
            "regex": "^(.*)$",
            "urlNormalizer": "$1",
            "higherLevelLabel": "Compat",
            "accessProperty": "TOKEN",
            "cacheKey": "compat"
        }"#;

        let config = Config::from_json_str(json).unwrap();
        assert_eq!(config.contents_url("css").as_str(), "http://localhost:1/contents/css?ref=main");
        assert_eq!(config.higher_level_label(), "Compat");
        assert_eq!(config.cache_key(), "compat");
        assert_eq!(config.flat_data_url().as_str(), "http://localhost:1/items");
    }

    #[test]
    fn rejects_invalid_pattern() {
        let mut file = ConfigFile::default();
        file.reference_pattern = "(unclosed".into();
        assert!(matches!(Config::try_from(file), Err(ConfigError::Regex(_))));
    }

    #[test]
    fn rejects_contents_base_without_path() {
        let mut file = ConfigFile::default();
        file.contents_base = "mailto:someone@example.com".into();
        assert!(matches!(Config::try_from(file), Err(ConfigError::NotABase { .. })));
    }

    #[test]
    fn missing_env_var_is_reported() {
        let err = Config::from_env("COMPAT_TREE_CONFIG_THAT_IS_NEVER_SET").unwrap_err();
        assert_eq!(err.to_string(), "missing env var: COMPAT_TREE_CONFIG_THAT_IS_NEVER_SET");
    }
}
