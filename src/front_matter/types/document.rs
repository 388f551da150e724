use std::collections::BTreeMap;
use liquid::Object;
use liquid::model::Value;

/// Template used when a post does not name one
pub const DEFAULT_TEMPLATE: &str = "default";

/// Keys templates conventionally read; a post that leaves them out gets
/// empty values instead of failing to render
pub const CONVENTIONAL_KEYS: [&str; 4] = ["Title", "Description", "Author", "Category"];

/// Key/value metadata of a post, seeded with the site metadata and
/// overlaid by the post's own front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: BTreeMap<String, String>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a post document on top of site-wide metadata, with the
    /// default template selected and the conventional keys empty.
    pub fn with_defaults(base: &Document) -> Self {
        let mut doc = base.clone();
        for key in CONVENTIONAL_KEYS {
            doc.insert(key, "");
        }
        doc.insert("Template", DEFAULT_TEMPLATE);
        doc
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Lookup that treats a missing key as an empty string
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Name of the template this post renders through
    pub fn template(&self) -> &str {
        self.get("Template").unwrap_or(DEFAULT_TEMPLATE)
    }

    /// Convert to a Liquid object, every value as a string scalar
    pub fn to_liquid(&self) -> Object {
        let mut obj = Object::new();
        for (key, value) in self.iter() {
            obj.insert(key.to_string().into(), Value::scalar(value.to_string()));
        }
        obj
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults_keeps_site_fields() {
        let site: Document = [("SiteName", "Notes"), ("BaseURL", "http://localhost")]
            .into_iter()
            .collect();

        let doc = Document::with_defaults(&site);
        assert_eq!(doc.get("SiteName"), Some("Notes"));
        assert_eq!(doc.template(), "default");
        assert_eq!(doc.iter().count(), 7);
    }

    #[test]
    fn test_with_defaults_seeds_conventional_keys() {
        let doc = Document::with_defaults(&Document::new());
        for key in CONVENTIONAL_KEYS {
            assert_eq!(doc.get(key), Some(""), "{}", key);
        }

        let obj = doc.to_liquid();
        assert_eq!(obj.get("Title"), Some(&Value::scalar("")));
    }

    #[test]
    fn test_to_liquid() {
        let mut doc = Document::new();
        doc.insert("Title", "Hello");

        let obj = doc.to_liquid();
        assert_eq!(obj.get("Title"), Some(&Value::scalar("Hello")));
    }
}
