//! Route table input contract.
//!
//! The hosting framework (or a build step) populates a [`RouteTable`] ahead of
//! time with one [`RouteEntry`] per registered route. The table is treated as a
//! read-only snapshot during extraction; nothing in this crate mutates it.
//!
//! A table can also be deserialized from a JSON dump, which is how the
//! command-line binary consumes routes exported from a running application.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One registered route as described by the hosting framework.
///
/// Field ordering inside `rules` and `parameters` is significant: attributes
/// keep their originally declared order, which drives both the defining-member
/// selection during schema reconstruction and the stable grouping order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    /// URI template, may contain `{param}` placeholders (e.g. `api/users/{id}`)
    pub uri: String,
    /// All HTTP methods bound to this route entry (e.g. `["GET", "HEAD"]`)
    pub methods: Vec<String>,
    /// Middleware names in binding order
    #[serde(default)]
    pub middlewares: Vec<String>,
    /// Controller short name (e.g. `UserController`)
    #[serde(default)]
    pub controller: String,
    /// Fully qualified controller path
    #[serde(default)]
    pub controller_full_path: String,
    /// Controller action method name
    #[serde(default)]
    pub action: String,
    /// Validation rules keyed by dot-path attribute, in declared order
    #[serde(default)]
    pub rules: IndexMap<String, Vec<String>>,
    /// Free-text documentation comment for the action
    #[serde(default)]
    pub doc_block: String,
    /// Path parameter names mapped to an inferred primitive type hint
    #[serde(default)]
    pub parameters: IndexMap<String, String>,
}

impl RouteEntry {
    /// Create a new RouteEntry with minimal required fields
    pub fn new(uri: &str, methods: &[&str], controller: &str, controller_full_path: &str) -> Self {
        Self {
            uri: uri.to_string(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            middlewares: Vec::new(),
            controller: controller.to_string(),
            controller_full_path: controller_full_path.to_string(),
            action: "__invoke".to_string(),
            rules: IndexMap::new(),
            doc_block: String::new(),
            parameters: IndexMap::new(),
        }
    }

    /// Set the middleware list
    pub fn with_middlewares(mut self, middlewares: &[&str]) -> Self {
        self.middlewares = middlewares.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Set the action method name
    pub fn with_action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    /// Append a validation rule list for one attribute path
    pub fn with_rule(mut self, attribute: &str, rules: &[&str]) -> Self {
        self.rules.insert(
            attribute.to_string(),
            rules.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    /// Set the documentation comment
    pub fn with_doc_block(mut self, doc_block: &str) -> Self {
        self.doc_block = doc_block.to_string();
        self
    }

    /// Declare a path parameter with its inferred type
    pub fn with_parameter(mut self, name: &str, type_hint: &str) -> Self {
        self.parameters.insert(name.to_string(), type_hint.to_string());
        self
    }
}

/// A read-only snapshot of all registered routes, in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Create an empty route table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route, preserving registration order
    pub fn register(&mut self, entry: RouteEntry) {
        self.routes.push(entry);
    }

    /// All registered routes in registration order
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl From<Vec<RouteEntry>> for RouteTable {
    fn from(routes: Vec<RouteEntry>) -> Self {
        Self { routes }
    }
}
