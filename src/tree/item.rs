use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};

/// Kind of node shown in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Directory,
    File,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Directory => "directory",
            ItemType::File => "file",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the presented hierarchy.
///
/// Items are immutable once built. `parent` and `root_parent` are weak
/// handles: the tree owner (usually a UI layer) keeps the `Arc`s alive, so a
/// node never keeps its ancestors alive on its own.
#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    url: String,
    item_type: ItemType,
    parent: Option<Weak<Item>>,
    root_parent: Option<Weak<Item>>,
    breadcrumbs: Vec<String>,
}

impl Item {
    pub(crate) fn new(
        name: String,
        url: String,
        item_type: ItemType,
        parent: Option<Weak<Item>>,
        root_parent: Option<Weak<Item>>,
        breadcrumbs: Vec<String>,
    ) -> Self {
        debug_assert!(!breadcrumbs.is_empty(), "an item always has at least one breadcrumb");
        Self {
            name,
            url,
            item_type,
            parent,
            root_parent,
            breadcrumbs,
        }
    }

    /// Build a top-level directory whose only breadcrumb is its own name.
    pub fn top_level(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        Item::new(name.clone(), url.into(), ItemType::Directory, None, None, vec![name])
    }

    /// Display label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where this node's children live, or the target of a leaf reference.
    /// Empty for synthetic leaves.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn is_directory(&self) -> bool {
        self.item_type == ItemType::Directory
    }

    /// The node whose fetch produced this one, if it is still alive.
    pub fn parent(&self) -> Option<Arc<Item>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Top-most ancestor of the directory chain this node was reached through.
    pub fn root_parent(&self) -> Option<Arc<Item>> {
        self.root_parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn has_root_parent(&self) -> bool {
        self.root_parent.is_some()
    }

    pub(crate) fn root_parent_handle(&self) -> Option<&Weak<Item>> {
        self.root_parent.as_ref()
    }

    pub fn breadcrumbs(&self) -> &[String] {
        &self.breadcrumbs
    }

    /// Breadcrumbs of a child of this node: ours followed by `labels`.
    pub(crate) fn extend_breadcrumbs<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        self.breadcrumbs
            .iter()
            .cloned()
            .chain(labels.into_iter().map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_item_has_only_its_name_as_breadcrumb() {
        let item = Item::top_level("api", "https://example.com/api");
        assert_eq!(item.breadcrumbs(), ["api"]);
        assert_eq!(item.item_type(), ItemType::Directory);
        assert!(!item.has_parent());
        assert!(!item.has_root_parent());
    }

    #[test]
    fn parent_handle_does_not_keep_parent_alive() {
        let parent = Arc::new(Item::top_level("css", "https://example.com/css"));
        let child = Item::new(
            "properties".into(),
            String::new(),
            ItemType::Directory,
            Some(Arc::downgrade(&parent)),
            Some(Arc::downgrade(&parent)),
            parent.extend_breadcrumbs(["properties"]),
        );

        assert!(Arc::ptr_eq(&child.parent().unwrap(), &parent));
        assert_eq!(child.breadcrumbs(), ["css", "properties"]);

        drop(parent);
        assert!(child.has_parent());
        assert!(child.parent().is_none());
    }
}
