//! sift: compile search options into query documents.
//!
//! Reads a query text plus JSON options (`on`, `only`, `except`, `includes`,
//! `boost_by`, `boost_function`, `boost_where`) and prints the matching
//! Elasticsearch query DSL document. Settings come from `.sift.toml` files.

#![warn(missing_docs)]

mod cli;

use std::process::ExitCode;

use cli::{CommandContext, args::Commands, commands, logging};

fn main() -> ExitCode {
    let cli = cli::args::parse_cli();
    logging::init_logger(cli.verbose);

    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
