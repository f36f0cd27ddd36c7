//! Clap argument definitions for the `sift` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use sift_query::{Aggregation, CompileError};

/// Parses an aggregation written as `kind:name:field`.
fn parse_aggregation(s: &str) -> Result<Aggregation, String> {
    s.parse().map_err(|e: CompileError| e.to_string())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Compile search options into Elasticsearch query documents")]
pub struct Cli {
    /// Verbosity level (-v for debug logs, -vv for trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print compact JSON without highlighting
    #[arg(long)]
    pub json: bool,

    /// Disable syntax highlighting
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for `sift compile`.
#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
    /// Query text (empty matches every document)
    #[arg(default_value = "")]
    pub text: String,

    /// Options as a JSON object
    #[arg(short = 'o', long, conflicts_with = "options_file")]
    pub options: Option<String>,

    /// Read options from a JSON file ('-' for stdin)
    #[arg(short = 'f', long)]
    pub options_file: Option<PathBuf>,

    /// Add an aggregation, written kind:name:field (repeatable)
    #[arg(short = 'a', long = "agg", value_parser = parse_aggregation)]
    pub aggregations: Vec<Aggregation>,

    /// Output formatting flags.
    #[command(flatten)]
    pub output: OutputArgs,

    /// Show the query tree and filter conditions before the document
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile query text and options into a query document
    #[command(after_help = "\
OPTIONS OBJECT:
  on               \"field\" or [\"field\", ...]     Fields to match (default: catch-all)
  only             {field: value | [values]}    Results must match
  except           {field: value | [values]}    Results must not match
  includes         [text, {options}]            Results must match a nested query
  boost_by         \"field\"                      Scale relevance by a numeric field
  boost_function   script | [script, {params}]  Score with a script
  boost_where      {field: value | [values]}    Boost matching results
  (anything else)                               Passed to single-field match, e.g. operator

  Nested objects become dotted fields: {\"company\": {\"id\": 1}} filters company.id.

AGGREGATION KINDS:
  max, min, avg, sum, value_count, cardinality, terms

EXAMPLES:
  sift compile foo
  sift compile foo -o '{\"on\": [\"name\", \"description\"]}'
  sift compile foo -o '{\"only\": {\"status\": [\"published\", \"rejected\"]}}'
  sift compile foo -o '{\"boost_by\": \"contents_count\"}' -a max:top_price:price
  sift compile foo -f options.json --explain")]
    Compile(CompileCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Show configuration files and validate settings
    Status,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
