use serde_json::{Map, Value};
use std::sync::{Arc, Weak};

use super::models::{ContentEntry, TreePayload};
use super::{DownloadError, HttpClient, ReqwestClient, Result, fetch_ok};
use crate::config::{Config, TokenProvider, UrlNormalizer};
use crate::tree::{Item, ItemType, humanize};

/// Key under which compat data keeps the statement of an entry.
const COMPAT_KEY: &str = "__compat";
/// Name of the placeholder child standing for "no specific sub-entry".
pub const WILDCARD_LABEL: &str = "wildcard";

/// Fetches one level of the remote tree, or the two leaves of one
/// compatibility entry.
pub struct TreeDownloader<C = ReqwestClient> {
    config: Arc<Config>,
    tokens: Arc<dyn TokenProvider>,
    client: C,
}

impl TreeDownloader<ReqwestClient> {
    /// Downloader using a fresh `reqwest` client.
    pub fn new(config: Arc<Config>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_client(config, tokens, ReqwestClient::default())
    }
}

impl<C: HttpClient> TreeDownloader<C> {
    pub fn with_client(config: Arc<Config>, tokens: Arc<dyn TokenProvider>, client: C) -> Self {
        Self { config, tokens, client }
    }

    /// Children of `parent`, or the top-level directories when `parent` is
    /// `None`.
    ///
    /// Which transformation applies is decided by the pair (parent present,
    /// payload kind):
    /// - no parent + listing: top-level directories
    /// - parent + listing: directory descent
    /// - parent + compat document: reference and wildcard leaves
    pub async fn download_tree_data(&self, parent: Option<&Arc<Item>>) -> Result<Vec<Arc<Item>>> {
        let url = match parent {
            Some(parent) => parent.url().to_string(),
            None => self.config.root_url().to_string(),
        };

        let body = fetch_ok(&self.client, &url, self.tokens.as_ref()).await?;
        let payload = TreePayload::parse(&body)?;

        let items = match (parent, payload) {
            (None, TreePayload::Listing(entries)) => self.top_level(entries),
            (Some(parent), TreePayload::Listing(entries)) => self.descend(parent, entries),
            (Some(parent), TreePayload::CompatData(document)) => self.compat_leaves(parent, &document)?,
            (None, TreePayload::CompatData(_)) => {
                return Err(DownloadError::UnexpectedPayload(
                    "compatibility document returned for the tree root".to_string(),
                ));
            }
        };

        Ok(items)
    }

    /// Raw content for files the listing links to directly, the contents
    /// endpoint (`<contents-base>/<path>?ref=<branch>`) for everything else.
    /// The contents endpoint answers a file with metadata, not the document.
    fn entry_url(&self, entry: &ContentEntry) -> String {
        match entry.download_url() {
            Some(raw) if entry.is_file() => raw.to_string(),
            _ => self.config.contents_url(entry.path()).to_string(),
        }
    }

    fn top_level(&self, entries: Vec<ContentEntry>) -> Vec<Arc<Item>> {
        entries
            .into_iter()
            .map(|entry| {
                let url = self.entry_url(&entry);
                Arc::new(Item::top_level(entry.name, url))
            })
            .collect()
    }

    fn descend(&self, parent: &Arc<Item>, entries: Vec<ContentEntry>) -> Vec<Arc<Item>> {
        let parent_handle = Arc::downgrade(parent);
        // The first descent anchors the chain at the parent; deeper levels inherit.
        let root_parent = parent.root_parent_handle().cloned().unwrap_or_else(|| parent_handle.clone());

        entries
            .into_iter()
            .map(|entry| {
                let label = humanize(&entry.name);
                let url = self.entry_url(&entry);
                let breadcrumbs = parent.extend_breadcrumbs([label.as_str()]);

                Arc::new(Item::new(
                    label,
                    url,
                    ItemType::Directory,
                    Some(parent_handle.clone()),
                    Some(root_parent.clone()),
                    breadcrumbs,
                ))
            })
            .collect()
    }

    /// Two `File` items per compat entry: the documentation reference and the
    /// wildcard placeholder.
    ///
    /// Both get `parent.breadcrumbs + [humanized key, key]`. The reference
    /// item repeats the key once more at the end; hosts address references
    /// by that trail, so it is kept as is.
    fn compat_leaves(&self, parent: &Arc<Item>, document: &Map<String, Value>) -> Result<Vec<Arc<Item>>> {
        let mut entries = Vec::new();
        collect_compat_entries(document, &mut entries)?;
        if entries.is_empty() {
            return Err(DownloadError::UnexpectedPayload(
                "object body carries no compatibility entries".to_string(),
            ));
        }

        let parent_handle: Weak<Item> = Arc::downgrade(parent);
        let mut items = Vec::with_capacity(entries.len() * 2);

        for (key, statement) in entries {
            let link = reference_link(statement).ok_or_else(|| DownloadError::MissingReference(key.to_string()))?;
            let label = humanize(key);

            let mut reference_crumbs = parent.extend_breadcrumbs([label.as_str(), key]);
            reference_crumbs.push(key.to_string());

            items.push(Arc::new(Item::new(
                format!("{key} - reference"),
                self.config.normalizer().normalize(link),
                ItemType::File,
                Some(parent_handle.clone()),
                None,
                reference_crumbs,
            )));
            items.push(Arc::new(Item::new(
                WILDCARD_LABEL.to_string(),
                String::new(),
                ItemType::File,
                Some(parent_handle.clone()),
                None,
                parent.extend_breadcrumbs([label.as_str(), key]),
            )));
        }

        Ok(items)
    }
}

/// Walk nested path segments down to the objects carrying a compat
/// statement. Sub-features of a reached entry are not visited.
fn collect_compat_entries<'a>(
    node: &'a Map<String, Value>,
    out: &mut Vec<(&'a str, &'a Map<String, Value>)>,
) -> Result<()> {
    for (key, value) in node {
        if key.starts_with("__") {
            continue;
        }
        let Value::Object(child) = value else {
            continue;
        };

        match child.get(COMPAT_KEY) {
            Some(Value::Object(statement)) => out.push((key.as_str(), statement)),
            Some(_) => {
                return Err(DownloadError::UnexpectedPayload(format!(
                    "'{key}' carries a malformed compatibility statement"
                )));
            }
            None => collect_compat_entries(child, out)?,
        }
    }
    Ok(())
}

/// `mdn_url` first, then `spec_url` (a string or a list of strings).
fn reference_link(statement: &Map<String, Value>) -> Option<&str> {
    let non_empty = |s: &&str| !s.trim().is_empty();

    let mdn = statement.get("mdn_url").and_then(Value::as_str).filter(non_empty);
    mdn.or_else(|| match statement.get("spec_url")? {
        Value::String(link) => Some(link.as_str()).filter(non_empty),
        Value::Array(links) => links.iter().filter_map(Value::as_str).find(non_empty),
        _ => None,
    })
}
