//! OpenAPI 3.0 document compilation.
//!
//! [`OpenApiCompiler`] consumes an ordered [`RouteDoc`] collection and builds
//! the complete document tree: configured metadata, one operation per
//! (path, method), path and query parameters, and request-body schemas
//! reconstructed from dot-path validation attributes.
//!
//! The tree is fully rebuilt on every call; there is no incremental mutation
//! or caching. All maps are insertion-ordered, so compiling the same input
//! twice with unchanged configuration serializes to identical bytes.
//!
//! Nested schema reconstruction supports one named level below the top-level
//! attribute; deeper dot-paths degrade to a generic object placeholder. This
//! is a documented limitation kept for output compatibility, not a defect.

use crate::attributes::{group_attributes, AttributeGroup};
use crate::config::{DocConfig, ServerConfig};
use crate::extractor::RouteDoc;
use crate::rule::{is_file_attribute, is_nullable, is_required, resolve_format, resolve_type, AttributeType};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Complete OpenAPI document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI specification version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// Server list
    pub servers: Vec<ServerConfig>,
    /// Paths collection (URL path -> method -> Operation)
    pub paths: IndexMap<String, PathItem>,
    /// Free-form components block, copied from configuration
    pub components: Value,
}

/// All operations for a single path, keyed by lowercase HTTP method
pub type PathItem = IndexMap<String, Operation>;

/// OpenAPI Info object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// Document version
    pub version: String,
    /// API title
    pub title: String,
    /// API description
    pub description: String,
    /// License block
    pub license: License,
}

/// OpenAPI License object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub url: String,
}

/// OpenAPI Operation object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Operation description, taken from the route's doc comment
    pub description: String,
    /// Tag list; the first non-empty URI segment for multi-segment URIs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Path parameters first, then rule-derived query parameters
    pub parameters: Vec<Parameter>,
    /// Security block, present only when the route requires authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Value>,
    /// Static responses block from configuration
    pub responses: Value,
    /// Request body for POST/PUT/DELETE operations
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter description (the attribute's rule expressions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter location (path, query)
    #[serde(rename = "in")]
    pub location: String,
    /// Serialization style, `form` for query parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter schema
    pub schema: TypeSchema,
}

/// Minimal schema carrying only a type keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Request body description
    pub description: String,
    /// Content types and their schemas
    pub content: IndexMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    pub schema: BodySchema,
}

/// Request body schema; always an object with per-attribute properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    /// One property per top-level attribute group
    pub properties: IndexMap<String, PropertySchema>,
}

/// Schema node for one request-body property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub nullable: bool,
    pub format: String,
    pub description: String,
    /// Element schema, present only for array properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsSchema>,
}

/// Element schema of an array property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
    /// Nested object properties reconstructed from dot-paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// A post-processing stage applied to the assembled document.
///
/// Stages receive and return the `(docs, document)` pair, enabling pure
/// functional transformation chaining in configured order.
pub type DocumentStage =
    Box<dyn Fn(Vec<RouteDoc>, OpenApiDocument) -> (Vec<RouteDoc>, OpenApiDocument)>;

/// Compiles documentation records into an OpenAPI 3.0 document.
pub struct OpenApiCompiler {
    config: DocConfig,
    stages: Vec<DocumentStage>,
}

impl OpenApiCompiler {
    /// Create a compiler for the given configuration
    pub fn new(config: DocConfig) -> Self {
        Self {
            config,
            stages: Vec::new(),
        }
    }

    /// Append a post-processing stage; stages run in insertion order after
    /// the base document is assembled and before it is returned.
    pub fn add_stage<F>(&mut self, stage: F)
    where
        F: Fn(Vec<RouteDoc>, OpenApiDocument) -> (Vec<RouteDoc>, OpenApiDocument) + 'static,
    {
        self.stages.push(Box::new(stage));
    }

    /// Builds the complete document for a documentation record collection.
    pub fn compile(&self, docs: Vec<RouteDoc>) -> OpenApiDocument {
        debug!("Compiling OpenAPI document from {} docs", docs.len());

        let open_api = &self.config.open_api;
        let mut document = OpenApiDocument {
            openapi: open_api.version.clone(),
            info: Info {
                version: open_api.document_version.clone(),
                title: open_api.title.clone(),
                description: open_api.description.clone(),
                license: License {
                    name: open_api.license.name.clone(),
                    url: open_api.license.url.clone(),
                },
            },
            servers: self.config.effective_servers(),
            paths: IndexMap::new(),
            components: open_api.components.clone(),
        };

        for doc in &docs {
            self.add_doc(&mut document, doc);
        }

        let mut pair = (docs, document);
        for stage in &self.stages {
            pair = stage(pair.0, pair.1);
        }

        pair.1
    }

    /// Adds one operation to the document tree.
    fn add_doc(&self, document: &mut OpenApiDocument, doc: &RouteDoc) {
        let uri = format!("/{}", doc.uri.trim_start_matches('/'));
        let http_method = doc.http_method.to_lowercase();
        let is_get = http_method == "get";
        let has_body = matches!(http_method.as_str(), "post" | "put" | "delete");

        let requires_auth = doc
            .middlewares
            .iter()
            .any(|m| self.config.open_api.auth_middlewares.contains(m));

        // first file-implying rule forces multipart, short-circuiting
        let request_has_file =
            has_body && doc.rules.values().any(|rules| is_file_attribute(rules));
        let content_type = if request_has_file {
            "multipart/form-data"
        } else {
            "application/json"
        };

        let segments: Vec<&str> = uri.split('/').filter(|s| !s.is_empty()).collect();
        let tags = if segments.len() > 1 {
            Some(vec![segments[0].to_string()])
        } else {
            None
        };

        let mut parameters = Self::path_parameters(doc);
        let groups = group_attributes(&doc.rules);

        if is_get {
            for group in &groups {
                parameters.push(Self::query_parameter(group));
            }
        }

        let request_body = if has_body {
            let mut properties = IndexMap::new();
            for group in &groups {
                properties.insert(group.name.clone(), Self::body_property(group));
            }
            Some(RequestBody {
                description: "Request body".to_string(),
                content: IndexMap::from([(
                    content_type.to_string(),
                    MediaType {
                        schema: BodySchema {
                            schema_type: "object".to_string(),
                            properties,
                        },
                    },
                )]),
            })
        } else {
            None
        };

        let operation = Operation {
            description: doc.doc_block.clone(),
            tags,
            parameters,
            security: requires_auth.then(|| self.config.open_api.security.clone()),
            responses: self.config.open_api.responses.clone(),
            request_body,
        };

        document.paths.entry(uri).or_default().insert(http_method, operation);
    }

    /// Path parameters, listed before any rule-derived parameters.
    fn path_parameters(doc: &RouteDoc) -> Vec<Parameter> {
        doc.parameters
            .iter()
            .map(|(name, type_hint)| Parameter {
                name: name.clone(),
                description: None,
                location: "path".to_string(),
                style: None,
                required: true,
                schema: TypeSchema {
                    schema_type: type_hint.clone(),
                },
            })
            .collect()
    }

    /// One query parameter per attribute group, typed from its full rule set.
    fn query_parameter(group: &AttributeGroup) -> Parameter {
        let defining = group.defining_member();
        Parameter {
            name: group.name.clone(),
            description: Some(defining.rules.join("|")),
            location: "query".to_string(),
            style: Some("form".to_string()),
            required: is_required(&defining.rules),
            schema: TypeSchema {
                schema_type: group.resolved_type().as_str().to_string(),
            },
        }
    }

    /// One request-body property per attribute group, including reconstructed
    /// array/object shapes.
    fn body_property(group: &AttributeGroup) -> PropertySchema {
        let defining = group.defining_member();
        let attribute_type = group.resolved_type();

        let items = if attribute_type == AttributeType::Array {
            Some(Self::array_items(group))
        } else {
            None
        };

        PropertySchema {
            schema_type: attribute_type.as_str().to_string(),
            nullable: is_nullable(&defining.rules),
            format: resolve_format(&defining.rules, attribute_type),
            description: String::new(),
            items,
        }
    }

    /// Reconstructs the element schema of an array attribute from its
    /// sub-path members.
    fn array_items(group: &AttributeGroup) -> ItemsSchema {
        let mut schema_type = "string".to_string();
        let mut properties: Option<Value> = None;

        for member in group.nested_members() {
            let fields = member.nested_fields();

            // no named segments beyond wildcards: array of scalars
            if fields.is_empty() {
                schema_type = resolve_type(&member.rules).as_str().to_string();
                continue;
            }

            schema_type = "object".to_string();
            let props = properties.get_or_insert_with(|| json!({}));
            Self::set_nested(props, &fields, Self::sub_attribute(&fields, &member.rules));
        }

        ItemsSchema {
            schema_type,
            description: String::new(),
            properties,
        }
    }

    /// Schema node for one nested sub-attribute.
    fn sub_attribute(fields: &[String], rules: &[String]) -> Value {
        let attribute_type = resolve_type(rules);
        let mut definition = json!({
            "type": attribute_type.as_str(),
            "description": "",
        });

        if attribute_type == AttributeType::Array {
            // TODO: detect the element type of nested arrays
            definition["items"] = json!({ "type": "string" });
        }

        if fields.len() >= 2 {
            // deeper nesting degrades to a generic object placeholder
            definition["type"] = json!("object");
            definition["items"] = json!({ "properties": {} });
        }

        definition
    }

    /// Inserts a value at a dotted sub-path, creating intermediate objects.
    fn set_nested(target: &mut Value, fields: &[String], value: Value) {
        let Some((last, parents)) = fields.split_last() else {
            return;
        };

        let mut node = target;
        for field in parents {
            let object = match node.as_object_mut() {
                Some(object) => object,
                None => return,
            };
            node = object.entry(field.clone()).or_insert_with(|| json!({}));
        }

        if let Some(object) = node.as_object_mut() {
            object.insert(last.clone(), value);
        }
    }
}
