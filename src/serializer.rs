//! Serialization module for documents and documentation records.
//!
//! JSON output is pretty-printed and, matching the documentation API
//! contract, leaves `/` characters and non-ASCII text literal rather than
//! escaping them.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes a value to pretty-printed JSON.
///
/// Slashes and non-ASCII characters are emitted literally, so the output
/// round-trips byte-for-byte through any JSON parser.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    debug!("Serializing to JSON");
    serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
}

/// Serializes a value to YAML format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml<T: Serialize>(value: &T) -> Result<String> {
    debug!("Serializing to YAML");
    serde_yaml::to_string(value).context("Failed to serialize to YAML")
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocConfig;
    use crate::extractor::DocExtractor;
    use crate::openapi_builder::OpenApiCompiler;
    use crate::route_table::{RouteEntry, RouteTable};
    use tempfile::TempDir;

    fn sample_document() -> crate::openapi_builder::OpenApiDocument {
        let mut table = RouteTable::new();
        table.register(
            RouteEntry::new("api/users", &["GET"], "UserController", "App\\UserController")
                .with_doc_block("List users. 一覧取得"),
        );
        let config = DocConfig::default();
        let docs = DocExtractor::extract(&table, &config);
        OpenApiCompiler::new(config).compile(docs)
    }

    #[test]
    fn test_serialize_json_structure() {
        let json = serialize_json(&sample_document()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["openapi"], "3.0.0");
        assert!(parsed["paths"]["/api/users"]["get"].is_object());
        assert!(parsed["info"].is_object());
        assert!(parsed["servers"].is_array());
    }

    #[test]
    fn test_json_keeps_slashes_and_unicode_literal() {
        let json = serialize_json(&sample_document()).unwrap();

        assert!(json.contains("\"/api/users\""));
        assert!(!json.contains("\\/"));
        assert!(json.contains("一覧取得"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let json = serialize_json(&sample_document()).unwrap();

        assert!(json.contains('\n'));
        assert!(json.contains("  "));
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&sample_document()).unwrap();

        assert!(yaml.contains("openapi: 3.0.0"));
        assert!(yaml.contains("paths:"));
        assert!(yaml.contains("/api/users:"));
    }

    #[test]
    fn test_roundtrip_json_serialization() {
        let document = sample_document();
        let json = serialize_json(&document).unwrap();

        let deserialized: crate::openapi_builder::OpenApiDocument =
            serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.openapi, document.openapi);
        assert_eq!(deserialized.info.title, document.info.title);
        assert_eq!(deserialized.paths.len(), document.paths.len());
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("openapi.json");

        write_to_file("test content", &file_path).unwrap();

        assert!(file_path.exists());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "test content");
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("dir").join("openapi.json");

        write_to_file("test content", &file_path).unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("openapi.json");

        write_to_file("initial", &file_path).unwrap();
        write_to_file("replaced", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "replaced");
    }
}
