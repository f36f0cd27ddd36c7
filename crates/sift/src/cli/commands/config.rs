//! Implementation of `sift config`.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use sift_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = ctx.config.settings_to_toml();
    if ctx.config.output.color && io::stdout().is_terminal() {
        print!("{}", Highlighter::new().highlight_toml(&toml));
    } else {
        print!("{toml}");
    }
    ExitCode::SUCCESS
}
