use std::collections::HashMap;
use std::sync::Arc;

use super::models::{FlatDocument, RawItem};
use super::{DownloadError, HttpClient, ReqwestClient, Result, fetch_ok};
use crate::config::{Config, TokenProvider};
use crate::tree::{Item, ItemType};

/// Fetches the pre-flattened index and maps it straight to items.
pub struct FlatDataDownloader<C = ReqwestClient> {
    config: Arc<Config>,
    tokens: Arc<dyn TokenProvider>,
    client: C,
}

impl FlatDataDownloader<ReqwestClient> {
    pub fn new(config: Arc<Config>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_client(config, tokens, ReqwestClient::default())
    }
}

impl<C: HttpClient> FlatDataDownloader<C> {
    pub fn with_client(config: Arc<Config>, tokens: Arc<dyn TokenProvider>, client: C) -> Self {
        Self { config, tokens, client }
    }

    /// All items of the flat index, in document order.
    pub async fn download_flat_data(&self) -> Result<Vec<Arc<Item>>> {
        let url = self.config.flat_data_url().as_str();
        let body = fetch_ok(&self.client, url, self.tokens.as_ref()).await?;
        let document: FlatDocument = serde_json::from_str(&body)?;

        FlatMapper::new(&document.items).map_all()
    }
}

/// Numeric type codes used by the flat index.
fn item_type(code: u64) -> Result<ItemType> {
    match code {
        1 => Ok(ItemType::Directory),
        2 => Ok(ItemType::File),
        other => Err(DownloadError::UnknownItemType(other)),
    }
}

/// Builds items so that every parent exists before the children pointing
/// at it, whatever order the document lists them in.
struct FlatMapper<'a> {
    raw: &'a [RawItem],
    by_id: HashMap<String, usize>,
    built: Vec<Option<Arc<Item>>>,
    in_progress: Vec<bool>,
}

impl<'a> FlatMapper<'a> {
    fn new(raw: &'a [RawItem]) -> Self {
        let by_id = raw
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| item.id.as_ref().map(|id| (id.key(), idx)))
            .collect();

        Self {
            raw,
            by_id,
            built: vec![None; raw.len()],
            in_progress: vec![false; raw.len()],
        }
    }

    fn map_all(mut self) -> Result<Vec<Arc<Item>>> {
        (0..self.raw.len()).map(|idx| self.build(idx)).collect()
    }

    fn build(&mut self, idx: usize) -> Result<Arc<Item>> {
        if let Some(item) = &self.built[idx] {
            return Ok(item.clone());
        }

        let raws = self.raw;
        let raw = &raws[idx];
        if self.in_progress[idx] {
            return Err(DownloadError::UnexpectedPayload(format!(
                "parent chain of '{}' loops back on itself",
                raw.name
            )));
        }
        if raw.breadcrumbs.is_empty() {
            return Err(DownloadError::UnexpectedPayload(format!("item '{}' has no breadcrumbs", raw.name)));
        }

        self.in_progress[idx] = true;
        let parent = match &raw.parent {
            None => None,
            Some(reference) => {
                let key = reference.key();
                let parent_idx = *self.by_id.get(&key).ok_or(DownloadError::UnknownParent(key))?;
                Some(Arc::downgrade(&self.build(parent_idx)?))
            }
        };
        self.in_progress[idx] = false;

        let item = Arc::new(Item::new(
            raw.name.clone(),
            raw.url.clone(),
            item_type(raw.type_code)?,
            parent,
            None,
            raw.breadcrumbs.clone(),
        ));
        self.built[idx] = Some(item.clone());
        Ok(item)
    }
}
