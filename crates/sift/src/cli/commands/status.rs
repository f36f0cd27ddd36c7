//! Implementation of `sift status`.

use std::process::ExitCode;

use sift_config::{BoostPolicy, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Shows configuration files and compile settings.
///
/// Exits with failure when validation produces warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("{}", subheader("Config files:"));
    if config.sources.is_empty() {
        println!("   {}", dim("(none found, using defaults)"));
        println!("   Run {} to create one.", subheader("sift init"));
    } else {
        for path in &config.sources {
            let scope = if is_global_config(path) {
                "global"
            } else {
                "local"
            };
            let shown = path.strip_prefix(&ctx.cwd).unwrap_or(path);
            println!("   {} {}", shown.display(), dim(&format!("({scope})")));
        }
    }
    println!();

    let compile = &config.compile;
    println!("{}", subheader("Compile settings:"));
    println!("   catch-all field   {}", compile.catch_all_field);
    println!("   boost modifier    {}", compile.boost_modifier);
    println!("   boost factor      {}", compile.boost_factor);
    println!(
        "   boost precedence  {}",
        match compile.boost_precedence {
            BoostPolicy::FirstMatch => "first-match",
            BoostPolicy::Reject => "reject",
        }
    );
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{}", success("Configuration OK"));
    } else {
        println!("{}", subheader("Warnings:"));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
