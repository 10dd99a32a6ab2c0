//! OpenSearch index layout and mappings.
//!
//! This module decides which indices documents land in and defines the
//! mappings those indices are created with.

use serde_json::{json, Value};

/// How documents are spread over indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLayout {
    /// Content and location documents share one index.
    Single,
    /// One index for content documents, one for location documents.
    Shared,
    /// One content index per main language, plus a location index.
    Dedicated,
}

/// Index naming for a handler instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Prefix shared by every index name.
    pub prefix: String,
    /// Document distribution over indices.
    pub layout: IndexLayout,
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(prefix: impl Into<String>, layout: IndexLayout) -> Self {
        Self {
            prefix: prefix.into(),
            layout,
        }
    }

    /// Index a content document in the given main language belongs to.
    pub fn content_index(&self, language_code: &str) -> String {
        match self.layout {
            IndexLayout::Single => self.single_index(),
            IndexLayout::Shared => format!("{}_content", self.prefix),
            IndexLayout::Dedicated => format!(
                "{}_content_{}",
                self.prefix,
                language_code.to_lowercase()
            ),
        }
    }

    /// Index location documents belong to.
    pub fn location_index(&self) -> String {
        match self.layout {
            IndexLayout::Single => self.single_index(),
            IndexLayout::Shared | IndexLayout::Dedicated => format!("{}_location", self.prefix),
        }
    }

    /// Pattern matching every content index.
    pub fn content_pattern(&self) -> String {
        match self.layout {
            IndexLayout::Dedicated => format!("{}_content_*", self.prefix),
            _ => self.content_index(""),
        }
    }

    /// Names and patterns covering exactly the indices this layout writes to.
    ///
    /// Other indices sharing the prefix are never matched.
    pub fn managed_indices(&self) -> Vec<String> {
        match self.layout {
            IndexLayout::Dedicated => vec![self.content_pattern(), self.location_index()],
            _ => self.fixed_indices(),
        }
    }

    /// Indices whose names are known up front and can be created at startup.
    ///
    /// Dedicated per-language content indices are created on first write.
    pub fn fixed_indices(&self) -> Vec<String> {
        match self.layout {
            IndexLayout::Single => vec![self.single_index()],
            IndexLayout::Shared => vec![self.content_index(""), self.location_index()],
            IndexLayout::Dedicated => vec![self.location_index()],
        }
    }

    fn single_index(&self) -> String {
        format!("{}_all", self.prefix)
    }
}

/// Get the index settings and mappings used for every sync index.
///
/// Content and location properties live in one mapping so that the single
/// index layout works; `doc_type` tells the two apart.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "doc_type": { "type": "keyword" },
                "content_id": { "type": "long" },
                "version_no": { "type": "long" },
                "location_id": { "type": "long" },
                "parent_id": { "type": "long" },
                "name": {
                    "type": "text",
                    "fields": {
                        "raw": { "type": "keyword" }
                    }
                },
                "content_type_id": { "type": "long" },
                "section_id": { "type": "long" },
                "main_language_code": { "type": "keyword" },
                "language_codes": { "type": "keyword" },
                "main_location_id": { "type": "long" },
                "fields": {
                    "type": "nested",
                    "properties": {
                        "identifier": { "type": "keyword" },
                        "language_code": { "type": "keyword" },
                        "value": { "type": "text" }
                    }
                },
                "full_text": { "type": "text" },
                "path_string": { "type": "keyword" },
                "path": { "type": "long" },
                "depth": { "type": "integer" },
                "priority": { "type": "integer" },
                "hidden": { "type": "boolean" },
                "invisible": { "type": "boolean" },
                "modified": { "type": "date" },
                "indexed_at": { "type": "date" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_layout() {
        let config = IndexConfig::new("cms", IndexLayout::Single);

        assert_eq!(config.content_index("eng-GB"), "cms_all");
        assert_eq!(config.location_index(), "cms_all");
        assert_eq!(config.content_pattern(), "cms_all");
        assert_eq!(config.fixed_indices(), vec!["cms_all"]);
    }

    #[test]
    fn test_shared_layout() {
        let config = IndexConfig::new("cms", IndexLayout::Shared);

        assert_eq!(config.content_index("ger-DE"), "cms_content");
        assert_eq!(config.location_index(), "cms_location");
        assert_eq!(config.fixed_indices(), vec!["cms_content", "cms_location"]);
    }

    #[test]
    fn test_dedicated_layout() {
        let config = IndexConfig::new("cms", IndexLayout::Dedicated);

        assert_eq!(config.content_index("ger-DE"), "cms_content_ger-de");
        assert_eq!(config.content_pattern(), "cms_content_*");
        assert_eq!(config.managed_indices(), vec!["cms_content_*", "cms_location"]);
        assert_eq!(config.fixed_indices(), vec!["cms_location"]);
    }

    #[test]
    fn test_managed_indices_skip_foreign_indices() {
        for layout in [IndexLayout::Single, IndexLayout::Shared, IndexLayout::Dedicated] {
            let config = IndexConfig::new("content", layout);

            for target in config.managed_indices() {
                assert!(!matches_index(&target, "content_other"), "{:?} hit content_other", layout);
                assert!(!matches_index(&target, "content_archive"), "{:?} hit content_archive", layout);
            }
        }

        let dedicated = IndexConfig::new("content", IndexLayout::Dedicated);
        assert!(dedicated
            .managed_indices()
            .iter()
            .any(|target| matches_index(target, "content_content_eng-gb")));
    }

    /// Index name matching with a trailing `*` wildcard, as OpenSearch expands it.
    fn matches_index(target: &str, index: &str) -> bool {
        match target.strip_suffix('*') {
            Some(prefix) => index.starts_with(prefix),
            None => target == index,
        }
    }

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert_eq!(
            settings["mappings"]["properties"]["doc_type"]["type"],
            "keyword"
        );
        assert_eq!(
            settings["mappings"]["properties"]["fields"]["type"],
            "nested"
        );
    }
}
