//! Catena GQL command line
//!
//! Renders query and mutation bodies from shorthand on the command line or
//! from a TOML operations file, for pasting into a client or piping into curl.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use catena_gql::{Literal, Operation, OperationKind, OperationsFile};

#[derive(Parser)]
#[command(
    name = "catena-gql",
    version,
    about = "Catena GQL - render GraphQL request bodies from field shorthand",
    long_about = "Builds GraphQL queries and mutations from dotted field shorthand \
                  and key=value arguments, or from a TOML operations file, and \
                  prints the request body."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print the JSON request payload instead of the bare body
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a query
    Query(TreeArgs),

    /// Render a mutation
    Mutation(TreeArgs),

    /// Render operations declared in a TOML file
    Render {
        /// Operations file
        file: PathBuf,

        /// Only render the operation with this label or root name
        #[arg(short, long)]
        operation: Option<String>,
    },
}

#[derive(Args)]
struct TreeArgs {
    /// Root field name
    name: String,

    /// Child selections as dotted paths (e.g. items.column_values.id)
    fields: Vec<String>,

    /// Argument as key=value; "text" is quoted, @SYMBOL is an enum,
    /// {...} is a JSON object, anything else is written as-is
    #[arg(short, long = "arg", value_name = "KEY=VALUE")]
    args: Vec<String>,

    /// Request variable as key=json
    #[arg(long = "var", value_name = "KEY=JSON")]
    vars: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging if debug mode is enabled
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let operations = match cli.command {
        Commands::Query(args) => vec![build_from_args(OperationKind::Query, args)?],
        Commands::Mutation(args) => vec![build_from_args(OperationKind::Mutation, args)?],
        Commands::Render { file, operation } => render_file(&file, operation.as_deref())?,
    };

    for operation in &operations {
        if cli.json {
            println!("{}", operation.to_request_json()?);
        } else {
            println!("{}", operation.format_body());
        }
    }

    Ok(())
}

fn build_from_args(kind: OperationKind, args: TreeArgs) -> Result<Operation> {
    let mut operation = Operation::new(kind, args.name)?;
    operation.add_fields(&args.fields);

    for raw in &args.args {
        let (key, value) = split_pair(raw)?;
        operation.add_argument(key, parse_literal(value)?);
    }

    for raw in &args.vars {
        let (key, value) = split_pair(raw)?;
        let value: serde_json::Value = serde_json::from_str(value)
            .with_context(|| format!("variable {} is not valid JSON", key))?;
        operation.add_query_variable(key, value);
    }

    Ok(operation)
}

fn render_file(file: &Path, only: Option<&str>) -> Result<Vec<Operation>> {
    let document = OperationsFile::from_file(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    match only {
        Some(key) => {
            let config = document
                .find(key)
                .ok_or_else(|| anyhow!("no operation named {} in {}", key, file.display()))?;
            Ok(vec![config.build()?])
        }
        None => Ok(document.build_all()?),
    }
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("expected KEY=VALUE, got {}", raw),
    }
}

fn parse_literal(value: &str) -> Result<Literal> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Ok(Literal::String(value[1..value.len() - 1].to_string()));
    }
    if let Some(symbol) = value.strip_prefix('@') {
        return Ok(Literal::Enum(symbol.to_string()));
    }
    if value.starts_with('{') {
        let object: serde_json::Value =
            serde_json::from_str(value).with_context(|| format!("invalid JSON object: {}", value))?;
        return Ok(Literal::Json(object));
    }
    Ok(Literal::Raw(value.to_string()))
}
