//! Data models for Curricle
//!
//! Defines the core data structures: Module and Item. An item is either
//! a saved link or an uploaded file, optionally owned by a module.
//! Field names serialize in camelCase so documents exported by other
//! builder frontends import cleanly.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::entity_id::EntityId;

/// A named, ordered container for items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    /// Unique identifier
    pub id: EntityId,
    /// Display name, non-empty after trimming
    pub name: String,
}

impl Module {
    /// Create a new module with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
        }
    }

    /// Create a module with a specific id (for loading from storage)
    pub fn with_id(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Whether an item is a saved link or an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Link,
    File,
}

/// Metadata captured when a file is attached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileMeta {
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    pub file_size: u64,
    /// Extension-derived type, if recognizable
    pub file_type: Option<String>,
    /// Machine-local path of the cached copy; transient, never exported
    pub file_url: Option<String>,
}

/// A link or file resource, optionally owned by a module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: EntityId,
    /// Owning module; `None` means the item is standalone
    pub module_id: Option<EntityId>,
    /// Link or file
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Display title
    pub title: String,
    /// Link target (link items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Original file name (file items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// File size in bytes (file items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Extension-derived type (file items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// Transient handle to the local cached copy (file items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl Item {
    /// Create a new link item with a fresh id
    pub fn link(
        module_id: Option<EntityId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            module_id,
            kind: ItemKind::Link,
            title: title.into(),
            url: Some(url.into()),
            file_name: None,
            file_size: None,
            file_type: None,
            file_url: None,
        }
    }

    /// Create a new file item with a fresh id
    pub fn file(module_id: Option<EntityId>, title: impl Into<String>, meta: FileMeta) -> Self {
        Self {
            id: EntityId::generate(),
            module_id,
            kind: ItemKind::File,
            title: title.into(),
            url: None,
            file_name: Some(meta.file_name),
            file_size: Some(meta.file_size),
            file_type: meta.file_type,
            file_url: meta.file_url,
        }
    }

    /// Whether the item is standalone (owned by no module)
    pub fn is_standalone(&self) -> bool {
        self.module_id.is_none()
    }

    /// Case-insensitive containment match over title, URL, and file name
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if self.title.to_lowercase().contains(&query) {
            return true;
        }
        if let Some(url) = &self.url {
            if url.to_lowercase().contains(&query) {
                return true;
            }
        }
        if let Some(name) = &self.file_name {
            if name.to_lowercase().contains(&query) {
                return true;
            }
        }
        false
    }
}

/// Errors raised by input validation, before anything reaches the store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("module name cannot be empty")]
    EmptyModuleName,

    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("'{0}' is not a valid URL")]
    InvalidUrl(String),
}

/// Validate and trim a module name
pub fn validate_module_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyModuleName);
    }
    Ok(name.to_string())
}

/// Validate and trim an item title
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Normalize and validate a link URL
///
/// Input without a scheme gets `https://` prefixed before parsing, so
/// `example.com/page` is accepted.
pub fn normalize_url(raw: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let candidate = if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    Url::parse(&candidate).map_err(|_| ValidationError::InvalidUrl(raw.to_string()))?;
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_new() {
        let module = Module::new("Algebra");
        assert_eq!(module.name, "Algebra");
        assert!(!module.id.as_str().is_empty());
    }

    #[test]
    fn test_link_item() {
        let item = Item::link(None, "Khan Academy", "https://khanacademy.org");
        assert_eq!(item.kind, ItemKind::Link);
        assert!(item.is_standalone());
        assert_eq!(item.url.as_deref(), Some("https://khanacademy.org"));
        assert!(item.file_name.is_none());
    }

    #[test]
    fn test_file_item() {
        let meta = FileMeta {
            file_name: "syllabus.pdf".to_string(),
            file_size: 20480,
            file_type: Some("pdf".to_string()),
            file_url: Some("/tmp/cache/syllabus.pdf".to_string()),
        };
        let item = Item::file(Some(EntityId::from("1")), "Syllabus", meta);
        assert_eq!(item.kind, ItemKind::File);
        assert!(!item.is_standalone());
        assert_eq!(item.file_name.as_deref(), Some("syllabus.pdf"));
        assert_eq!(item.file_size, Some(20480));
        assert!(item.url.is_none());
    }

    #[test]
    fn test_matches_query() {
        let link = Item::link(None, "Khan Academy", "https://khanacademy.org");
        assert!(link.matches_query("khan"));
        assert!(link.matches_query("KHAN"));
        assert!(link.matches_query("academy.org"));
        assert!(!link.matches_query("algebra"));

        let file = Item::file(
            None,
            "Notes",
            FileMeta {
                file_name: "Week1-Notes.pdf".to_string(),
                file_size: 100,
                ..Default::default()
            },
        );
        assert!(file.matches_query("week1"));
        assert!(!file.matches_query("week2"));
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::link(Some(EntityId::from("7")), "Docs", "https://docs.rs");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"moduleId\":\"7\""));
        assert!(json.contains("\"type\":\"link\""));
        assert!(!json.contains("fileName"));
    }

    #[test]
    fn test_item_round_trip() {
        let item = Item::file(
            None,
            "Slides",
            FileMeta {
                file_name: "week2.pptx".to_string(),
                file_size: 4096,
                file_type: Some("pptx".to_string()),
                file_url: None,
            },
        );
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_item_decodes_foreign_export_shape() {
        // Wire shape produced by the browser-based builders.
        let json = r#"{
            "id": "1712345678901",
            "moduleId": null,
            "type": "link",
            "title": "Khan Academy",
            "url": "https://khanacademy.org"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, EntityId::from("1712345678901"));
        assert!(item.is_standalone());
        assert_eq!(item.kind, ItemKind::Link);
    }

    #[test]
    fn test_validate_module_name() {
        assert_eq!(validate_module_name("  Algebra "), Ok("Algebra".to_string()));
        assert_eq!(
            validate_module_name("   "),
            Err(ValidationError::EmptyModuleName)
        );
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("Reading"), Ok("Reading".to_string()));
        assert_eq!(validate_title(""), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_normalize_url_adds_scheme() {
        assert_eq!(
            normalize_url("example.com/page"),
            Ok("https://example.com/page".to_string())
        );
        assert_eq!(
            normalize_url("http://example.com"),
            Ok("http://example.com".to_string())
        );
    }

    #[test]
    fn test_normalize_url_rejects_garbage() {
        assert_eq!(normalize_url(""), Err(ValidationError::EmptyUrl));
        assert!(matches!(
            normalize_url("ht tp://nope"),
            Err(ValidationError::InvalidUrl(_))
        ));
    }
}
