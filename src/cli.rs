use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// OpenAPI From Routes - Generate OpenAPI documentation from a web application's route table
#[derive(Parser, Debug)]
#[command(name = "openapi-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the route table dump (JSON)
    #[arg(value_name = "ROUTES_FILE")]
    pub routes_path: PathBuf,

    /// Path to a configuration file (JSON); defaults apply when omitted
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Emit the grouped documentation records instead of an OpenAPI document
    #[arg(long = "docs")]
    pub docs: bool,

    /// Grouping strategy for the documentation records
    #[arg(short = 'g', long = "group-by", value_enum, default_value = "api-uri")]
    pub group_by: GroupByArg,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Grouping strategies
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum GroupByArg {
    /// Group by URI prefix
    #[value(name = "api-uri")]
    ApiUri,
    /// Group by fully qualified controller path
    #[value(name = "controller")]
    Controller,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    // Validate routes file exists
    if !args.routes_path.exists() {
        anyhow::bail!("Routes file does not exist: {}", args.routes_path.display());
    }

    if !args.routes_path.is_file() {
        anyhow::bail!("Routes path is not a file: {}", args.routes_path.display());
    }

    if let Some(ref config_path) = args.config_path {
        if !config_path.exists() {
            anyhow::bail!("Config file does not exist: {}", config_path.display());
        }
    }

    info!("Routes file: {}", args.routes_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::config::DocConfig;
    use crate::extractor::DocExtractor;
    use crate::grouper::{DocGrouper, GroupStrategy};
    use crate::openapi_builder::OpenApiCompiler;
    use crate::route_table::RouteTable;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting documentation generation...");

    // Step 1: Load configuration
    let config = match &args.config_path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            DocConfig::from_file(path)?
        }
        None => {
            info!("Using default configuration");
            DocConfig::default()
        }
    };

    // Step 2: Load the route table dump
    info!("Reading route table from {}", args.routes_path.display());
    let content = std::fs::read_to_string(&args.routes_path)?;
    let table: RouteTable = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse routes file: {}", e))?;

    info!("Loaded {} routes", table.len());
    if table.is_empty() {
        log::warn!("Route table is empty");
    }

    // Step 3: Extract documentation records
    info!("Extracting documentation records...");
    let docs = DocExtractor::extract(&table, &config);
    info!("Extracted {} records", docs.len());

    // Step 4: Group records
    let strategy = match args.group_by {
        GroupByArg::ApiUri => GroupStrategy::ApiUri,
        GroupByArg::Controller => GroupStrategy::ControllerFullPath,
    };
    debug!("Grouping with strategy {:?}", strategy);
    let docs = DocGrouper::group_docs(docs, strategy, &config);

    // Step 5: Produce the requested output
    let content = if args.docs {
        info!("Serializing grouped documentation records...");
        match args.output_format {
            OutputFormat::Json => serialize_json(&docs)?,
            OutputFormat::Yaml => serialize_yaml(&docs)?,
        }
    } else {
        info!("Compiling OpenAPI document...");
        let compiler = OpenApiCompiler::new(config);
        let document = compiler.compile(docs);
        match args.output_format {
            OutputFormat::Json => serialize_json(&document)?,
            OutputFormat::Yaml => serialize_yaml(&document)?,
        }
    };

    // Step 6: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Successfully wrote output to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    info!("Generation complete!");
    Ok(())
}
