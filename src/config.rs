//! Configuration for documentation extraction and OpenAPI generation.
//!
//! All options are optional in the source JSON; missing fields fall back to
//! the documented defaults, so an empty object `{}` is a valid configuration.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Top-level configuration, read-only for the duration of one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    /// OpenAPI document metadata and static blocks
    pub open_api: OpenApiConfig,
    /// When set, only routes whose URI starts with this prefix are documented
    pub only_route_uri_start_with: Option<String>,
    /// Grouping options for the `api_uri` strategy
    pub group_by: GroupByConfig,
    /// Disable SQL query capture in the diagnostics collector
    pub hide_sql_data: bool,
    /// Disable log message capture in the diagnostics collector
    pub hide_logs_data: bool,
    /// Disable model event capture in the diagnostics collector
    pub hide_models_data: bool,
    /// Application debug flag; diagnostics only activate when this is true
    pub debug: bool,
}

/// The `open_api.*` option block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenApiConfig {
    /// OpenAPI specification version
    pub version: String,
    /// Version of the generated document (`info.version`)
    pub document_version: String,
    /// Document title (`info.title`)
    pub title: String,
    /// Document description (`info.description`)
    pub description: String,
    /// License block (`info.license`)
    pub license: LicenseConfig,
    /// Server list; when empty, a single server built from `server_url` is used
    pub servers: Vec<ServerConfig>,
    /// Fallback server URL when `servers` is empty
    pub server_url: String,
    /// Free-form `components` block copied into the document verbatim
    pub components: Value,
    /// Middleware names whose presence on a route implies authentication
    pub auth_middlewares: Vec<String>,
    /// Free-form `security` block attached to operations that require auth
    pub security: Value,
    /// Free-form `responses` block attached to every operation
    pub responses: Value,
}

/// `info.license` contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    pub name: String,
    pub url: String,
}

/// A single entry of the `servers` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
}

/// The `group_by.*` option block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupByConfig {
    /// Ordered URI prefix patterns; segments may end in `*` to match any tail.
    /// An empty list degrades to grouping by the first path segment only.
    pub uri_patterns: Vec<String>,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            open_api: OpenApiConfig::default(),
            only_route_uri_start_with: None,
            group_by: GroupByConfig::default(),
            hide_sql_data: false,
            hide_logs_data: false,
            hide_models_data: false,
            debug: false,
        }
    }
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            version: "3.0.0".to_string(),
            document_version: "1.0.0".to_string(),
            title: "Request Docs".to_string(),
            description: "Request Docs".to_string(),
            license: LicenseConfig::default(),
            servers: Vec::new(),
            server_url: "http://localhost".to_string(),
            components: Value::Object(serde_json::Map::new()),
            auth_middlewares: vec![
                "auth:api".to_string(),
                "auth".to_string(),
                "auth:sanctum".to_string(),
            ],
            security: Value::Array(Vec::new()),
            responses: serde_json::json!({
                "200": { "description": "Successful operation" }
            }),
        }
    }
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            name: "Apache 2.0".to_string(),
            url: "https://www.apache.org/licenses/LICENSE-2.0.html".to_string(),
        }
    }
}

impl Default for GroupByConfig {
    fn default() -> Self {
        Self {
            uri_patterns: vec!["api/v*".to_string(), "api".to_string()],
        }
    }
}

impl DocConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| Error::ConfigError {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The effective server list: configured servers, or one built from
    /// `server_url` when none are configured.
    pub fn effective_servers(&self) -> Vec<ServerConfig> {
        if self.open_api.servers.is_empty() {
            vec![ServerConfig {
                url: self.open_api.server_url.clone(),
            }]
        } else {
            self.open_api.servers.clone()
        }
    }
}
