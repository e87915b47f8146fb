use serde::{Deserialize, Serialize};

/// On-disk shape of the configuration; serde is confined to this module tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Contents endpoint listing the top-level directories.
    pub root_url: String,
    /// Base of `<contents-base>/<path>?ref=<branch>` URLs used for descent.
    pub contents_base: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Endpoint serving the pre-flattened `{ items: [...] }` index.
    pub flat_data_url: String,
    /// Matches documentation links embedded in compat data.
    #[serde(rename = "regex")]
    pub reference_pattern: String,
    /// Replacement applied to links matching `reference_pattern`.
    #[serde(rename = "urlNormalizer")]
    pub reference_replacement: String,
    pub higher_level_label: String,
    /// Name of the setting holding the personal access token.
    pub access_property: String,
    pub cache_key: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            root_url: "https://api.github.com/repos/mdn/browser-compat-data/contents?ref=main".to_string(),
            contents_base: "https://api.github.com/repos/mdn/browser-compat-data/contents".to_string(),
            branch: default_branch(),
            flat_data_url: "http://localhost:8080/items".to_string(),
            reference_pattern: r"^https?://developer\.mozilla\.org/(?:[A-Za-z-]+/)?docs/(?P<path>.+)$".to_string(),
            reference_replacement: "https://developer.mozilla.org/en-US/docs/$path".to_string(),
            higher_level_label: "Browser compatibility data".to_string(),
            access_property: "GITHUB_TOKEN".to_string(),
            cache_key: "compat-tree.items".to_string(),
        }
    }
}
