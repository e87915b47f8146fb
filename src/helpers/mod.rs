pub mod fzf_invoker;

use std::sync::Arc;

use self::fzf_invoker::FzfInvoker;
use anyhow::Result;
use compat_tree::{Item, ItemType};

/// Label shown for an item in the picker: directories get a trailing slash,
/// references show where they point.
pub fn item_label(item: &Item) -> String {
    match item.item_type() {
        ItemType::Directory => format!("{}/", item.name()),
        ItemType::File if item.url().is_empty() => item.name().to_string(),
        ItemType::File => format!("{} | {}", item.name(), item.url()),
    }
}

/// Wrapper around the `termenu` picker that keeps the UX consistent. Returns
/// `None` when the user backs out.
pub fn choose_item(title: &str, items: &[Arc<Item>]) -> Result<Option<Arc<Item>>> {
    let labels: Vec<String> = items.iter().map(|item| item_label(item)).collect();
    let picker = FzfInvoker::new(title.to_string(), labels);
    Ok(picker.invoke()?.and_then(|idx| items.get(idx).cloned()))
}

/// Pick one of a few fixed options.
pub fn choose_one<S: ToString>(title: &str, options: Vec<S>) -> Result<Option<String>> {
    let display_items: Vec<String> = options.into_iter().map(|s| s.to_string()).collect();
    let picker = FzfInvoker::new(title.to_string(), display_items.clone());
    Ok(picker.invoke()?.and_then(|idx| display_items.get(idx).cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_distinguish_item_kinds() {
        assert_eq!(item_label(&Item::top_level("api", "https://example.com")), "api/");
    }
}
