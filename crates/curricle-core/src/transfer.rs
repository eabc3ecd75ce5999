//! Course import and export
//!
//! The transport format is a single JSON object `{ modules, items,
//! exportedAt }`. File items carry a machine-local cached path in
//! `fileUrl`; that handle is meaningless anywhere else, so export
//! strips it. Import is all-or-nothing: the document is only replaced
//! once the whole file has decoded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Item, Module};

/// Errors raised while importing a course file
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("could not parse course file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("course file is missing the '{0}' section")]
    MissingSection(&'static str),

    #[error("course file has an invalid '{0}' section: {1}")]
    InvalidSection(&'static str, #[source] serde_json::Error),

    #[error("failed to serialize course: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// The collections decoded from an import
#[derive(Debug, Clone, PartialEq)]
pub struct CourseData {
    pub modules: Vec<Module>,
    pub items: Vec<Item>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    modules: &'a [Module],
    items: Vec<Item>,
    exported_at: DateTime<Utc>,
}

/// Serialize a course for export
///
/// Pretty-printed JSON with `fileUrl` stripped from every item and an
/// ISO-8601 `exportedAt` stamp.
pub fn export_json(modules: &[Module], items: &[Item]) -> Result<String, TransferError> {
    export_json_at(modules, items, Utc::now())
}

/// Serialize a course for export with an explicit timestamp
pub fn export_json_at(
    modules: &[Module],
    items: &[Item],
    exported_at: DateTime<Utc>,
) -> Result<String, TransferError> {
    let items = items
        .iter()
        .cloned()
        .map(|mut item| {
            item.file_url = None;
            item
        })
        .collect();

    serde_json::to_string_pretty(&ExportEnvelope {
        modules,
        items,
        exported_at,
    })
    .map_err(TransferError::Serialize)
}

/// Suggested file name for an export taken at `at`
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("course-export-{}.json", at.timestamp_millis())
}

/// Decode a course file
///
/// Requires both the `modules` and `items` sections; either missing, or
/// unparseable JSON, or a section that does not decode into the model,
/// fails without producing data.
pub fn import_json(raw: &str) -> Result<CourseData, TransferError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(TransferError::Parse)?;

    let modules = section(&value, "modules")?;
    let items = section(&value, "items")?;

    Ok(CourseData { modules, items })
}

fn section<T: for<'de> Deserialize<'de>>(
    value: &serde_json::Value,
    name: &'static str,
) -> Result<T, TransferError> {
    let section = value
        .get(name)
        .ok_or(TransferError::MissingSection(name))?;
    serde_json::from_value(section.clone()).map_err(|e| TransferError::InvalidSection(name, e))
}
