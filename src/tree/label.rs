use regex::Regex;
use std::sync::OnceLock;

static ACRONYM_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static CAMEL_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static SEPARATORS: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).unwrap_or_else(|err| panic!("invalid label pattern {pattern}: {err}")))
}

/// Strip a trailing `.json` extension from a raw file name.
pub fn file_stem(raw: &str) -> &str {
    raw.strip_suffix(".json").unwrap_or(raw)
}

/// Turn a raw file or key name into a readable label.
///
/// `AbortController.json` -> `Abort Controller`,
/// `CSSStyleSheet` -> `CSS Style Sheet`, `font-variant_alternates` ->
/// `font variant alternates`. Lower-case names stay as they are.
pub fn humanize(raw: &str) -> String {
    let stem = file_stem(raw);
    let spaced = regex(&ACRONYM_BOUNDARY, r"([A-Z]+)([A-Z][a-z])").replace_all(stem, "$1 $2");
    let spaced = regex(&CAMEL_BOUNDARY, r"([a-z0-9])([A-Z])").replace_all(&spaced, "$1 $2");
    let spaced = regex(&SEPARATORS, r"[_\-\s]+").replace_all(&spaced, " ");
    spaced.trim().to_string()
}
