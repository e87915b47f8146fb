use regex::Regex;

/// Turns a documentation link embedded in compat data into the URL shown
/// for the reference item.
pub trait UrlNormalizer: Send + Sync {
    fn normalize(&self, link: &str) -> String;
}

/// Regex-driven normalizer: links matching `pattern` are rewritten with
/// `replacement` (capture groups allowed), anything else passes through.
#[derive(Debug, Clone)]
pub struct ReferenceNormalizer {
    pattern: Regex,
    replacement: String,
}

impl ReferenceNormalizer {
    pub fn new(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }
}

impl UrlNormalizer for ReferenceNormalizer {
    fn normalize(&self, link: &str) -> String {
        let link = link.trim();
        if self.pattern.is_match(link) {
            self.pattern.replace(link, self.replacement.as_str()).into_owned()
        } else {
            link.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;

    fn default_normalizer() -> ReferenceNormalizer {
        let file = ConfigFile::default();
        ReferenceNormalizer::new(Regex::new(&file.reference_pattern).unwrap(), file.reference_replacement)
    }

    #[test]
    fn rewrites_unlocalized_mdn_links() {
        let normalizer = default_normalizer();
        assert_eq!(
            normalizer.normalize("https://developer.mozilla.org/docs/Web/API/AbortController"),
            "https://developer.mozilla.org/en-US/docs/Web/API/AbortController"
        );
    }

    #[test]
    fn replaces_existing_locale() {
        let normalizer = default_normalizer();
        assert_eq!(
            normalizer.normalize("https://developer.mozilla.org/fr/docs/Web/CSS/color"),
            "https://developer.mozilla.org/en-US/docs/Web/CSS/color"
        );
    }

    #[test]
    fn leaves_foreign_links_alone() {
        let normalizer = default_normalizer();
        assert_eq!(
            normalizer.normalize("https://dom.spec.whatwg.org/#interface-abortcontroller"),
            "https://dom.spec.whatwg.org/#interface-abortcontroller"
        );
    }
}
