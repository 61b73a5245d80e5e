//! OpenAPI From Routes - Command-line tool for generating route documentation.
//!
//! This binary reads a JSON dump of a web application's route table (URIs,
//! HTTP methods, middlewares, controllers, validation rules) and generates
//! either an OpenAPI 3.0 document or the grouped documentation records the
//! document is derived from.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-routes [OPTIONS] <ROUTES_FILE>
//! ```
//!
//! # Examples
//!
//! Generate a JSON OpenAPI document:
//! ```bash
//! openapi-from-routes routes.json -o openapi.json
//! ```
//!
//! Generate YAML:
//! ```bash
//! openapi-from-routes routes.json -f yaml -o openapi.yaml
//! ```
//!
//! Emit the grouped documentation records instead:
//! ```bash
//! openapi-from-routes routes.json --docs --group-by controller
//! ```

mod attributes;
mod cli;
mod config;
mod diagnostics;
mod error;
mod extractor;
mod grouper;
mod openapi_builder;
mod route_table;
mod rule;
mod serializer;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    // First, do a quick parse just to check for verbose flag
    let args_for_verbose = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI From Routes starting...");

    // Now do the full parse with validation
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("Documentation generation completed successfully");

    Ok(())
}
