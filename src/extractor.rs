//! Route-to-documentation extraction.
//!
//! [`DocExtractor`] walks the injected route table and emits one [`RouteDoc`]
//! per (route, HTTP method) pair. Everything is captured verbatim from the
//! table: URIs, middleware order, controller names, rule declaration order.
//! The only normalization applied is doc-comment trimming and filling in
//! `string` for path parameters without a usable type hint.
//!
//! Extraction never fails: routes without a resolvable controller are
//! skipped with a warning and every other input produces a record.

use crate::config::DocConfig;
use crate::route_table::RouteTable;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Canonical documentation record for one route/HTTP-method pair.
///
/// Immutable once produced by extraction; only the grouper fills in `group`
/// and `group_index` afterwards. Serialized field names follow the public
/// documentation API contract (`httpMethod`, `docBlock`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDoc {
    /// Route path template, may contain `{param}` placeholders
    pub uri: String,
    /// All HTTP methods bound to the originating route entry
    pub methods: Vec<String>,
    /// Middleware names in binding order
    pub middlewares: Vec<String>,
    /// Controller short name
    pub controller: String,
    /// Fully qualified controller path
    pub controller_full_path: String,
    /// Controller action method name
    pub method: String,
    /// The single HTTP method this record represents
    #[serde(rename = "httpMethod")]
    pub http_method: String,
    /// Validation rules keyed by dot-path attribute, in declared order
    pub rules: IndexMap<String, Vec<String>>,
    /// Trimmed free-text documentation comment
    #[serde(rename = "docBlock")]
    pub doc_block: String,
    /// Path parameter names mapped to their inferred primitive type
    pub parameters: IndexMap<String, String>,
    /// Group label, assigned by the grouper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// 0-based rank within the group, assigned by the grouper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_index: Option<usize>,
}

/// Extracts canonical documentation records from a route table snapshot.
pub struct DocExtractor;

impl DocExtractor {
    /// Produces one [`RouteDoc`] per (route, HTTP method) pair.
    ///
    /// HEAD is never expanded to its own record but stays listed in the
    /// record's `methods`. When `only_route_uri_start_with` is configured,
    /// non-matching records are dropped after extraction.
    pub fn extract(table: &RouteTable, config: &DocConfig) -> Vec<RouteDoc> {
        let mut docs = Vec::new();

        for entry in table.routes() {
            if entry.controller.is_empty() && entry.controller_full_path.is_empty() {
                warn!("Skipping route {}: controller could not be resolved", entry.uri);
                continue;
            }

            let parameters = Self::resolve_parameters(entry.uri.as_str(), &entry.parameters);

            for method in &entry.methods {
                let http_method = method.to_uppercase();
                if http_method == "HEAD" {
                    continue;
                }

                docs.push(RouteDoc {
                    uri: entry.uri.clone(),
                    methods: entry.methods.clone(),
                    middlewares: entry.middlewares.clone(),
                    controller: entry.controller.clone(),
                    controller_full_path: entry.controller_full_path.clone(),
                    method: entry.action.clone(),
                    http_method,
                    rules: entry.rules.clone(),
                    doc_block: entry.doc_block.trim().to_string(),
                    parameters: parameters.clone(),
                    group: None,
                    group_index: None,
                });
            }
        }

        if let Some(prefix) = &config.only_route_uri_start_with {
            debug!("Filtering docs to URIs starting with '{}'", prefix);
            docs.retain(|doc| doc.uri.starts_with(prefix.as_str()));
        }

        debug!("Extracted {} documentation records", docs.len());
        docs
    }

    /// Merges declared parameter type hints with `{param}` placeholders found
    /// in the URI template. Placeholders without a hint default to `string`.
    fn resolve_parameters(
        uri: &str,
        declared: &IndexMap<String, String>,
    ) -> IndexMap<String, String> {
        let mut parameters: IndexMap<String, String> = declared
            .iter()
            .map(|(name, hint)| {
                let hint = if hint.is_empty() { "string" } else { hint };
                (name.clone(), hint.to_string())
            })
            .collect();

        for segment in uri.split('/') {
            if let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                // optional parameters are declared as {name?}
                let name = name.trim_end_matches('?');
                if !name.is_empty() && !parameters.contains_key(name) {
                    parameters.insert(name.to_string(), "string".to_string());
                }
            }
        }

        parameters
    }
}
