//! OpenAPI From Routes - Automatic API documentation from a live route table.
//!
//! This library generates documentation for a running web application from an
//! injected snapshot of its route table: for every registered route it builds
//! a canonical documentation record (HTTP method, middlewares, controller,
//! doc comment, validation rules), groups the records deterministically, and
//! compiles them into an OpenAPI 3.0 document. Validation rule expressions
//! are mapped into JSON-schema-shaped parameter and request-body definitions,
//! including nested and array attributes reconstructed from dot-path rule
//! keys such as `items.*.name`.
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`route_table`] - The injected route-metadata contract (input collaborator)
//! 2. [`config`] - Configuration options for extraction and generation
//! 3. [`extractor`] - Produces one `RouteDoc` per route/HTTP-method pair
//! 4. [`grouper`] - Groups records by URI prefix or controller with stable ordering
//! 5. [`rule`] - Parses validation rule expressions into schema types/formats
//! 6. [`attributes`] - Reconstructs nested structure from dot-path attributes
//! 7. [`openapi_builder`] - Compiles records into the OpenAPI document tree
//! 8. [`serializer`] - Serializes documents to JSON or YAML
//! 9. [`diagnostics`] - Request-scoped diagnostics collector (boundary component)
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_routes::{
//!     config::DocConfig,
//!     extractor::DocExtractor,
//!     grouper::{DocGrouper, GroupStrategy},
//!     openapi_builder::OpenApiCompiler,
//!     route_table::{RouteEntry, RouteTable},
//!     serializer::serialize_json,
//! };
//!
//! // Register routes (normally populated by the hosting framework)
//! let mut table = RouteTable::new();
//! table.register(
//!     RouteEntry::new("api/users", &["GET", "HEAD"], "UserController", "App\\UserController")
//!         .with_rule("page", &["nullable", "integer"]),
//! );
//!
//! // Extract and group documentation records
//! let config = DocConfig::default();
//! let docs = DocExtractor::extract(&table, &config);
//! let docs = DocGrouper::group_docs(docs, GroupStrategy::ApiUri, &config);
//!
//! // Compile and serialize the OpenAPI document
//! let compiler = OpenApiCompiler::new(config);
//! let document = compiler.compile(docs);
//! let json = serialize_json(&document).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete
//! CLI application consuming route-table JSON dumps.

pub mod attributes;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod grouper;
pub mod openapi_builder;
pub mod route_table;
pub mod rule;
pub mod serializer;
