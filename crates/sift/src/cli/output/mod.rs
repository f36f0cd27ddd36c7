//! Rendering of compiled documents and errors.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use serde_json::Value;
pub use sift_highlight::{dim, header, subheader, success, warning};
use sift_highlight::{Highlighter, error};
use sift_config::OutputSection;
use sift_query::CompileError;

use crate::cli::args::OutputArgs;

/// How a document is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStyle {
    /// Single-line JSON.
    Compact,
    /// Indented JSON.
    Pretty,
    /// Indented, syntax-highlighted JSON.
    Highlighted,
}

impl DocumentStyle {
    /// Resolves the style from settings, flags, and whether stdout is a terminal.
    pub fn resolve(settings: &OutputSection, args: &OutputArgs, is_terminal: bool) -> Self {
        if args.json || !settings.pretty {
            Self::Compact
        } else if settings.color && !args.no_color && is_terminal {
            Self::Highlighted
        } else {
            Self::Pretty
        }
    }
}

/// Formats a document in the given style.
pub fn render_document(doc: &Value, style: DocumentStyle) -> Result<String, serde_json::Error> {
    match style {
        DocumentStyle::Compact => serde_json::to_string(doc),
        DocumentStyle::Pretty => serde_json::to_string_pretty(doc),
        DocumentStyle::Highlighted => {
            let pretty = serde_json::to_string_pretty(doc)?;
            Ok(Highlighter::new().highlight_json(&pretty))
        }
    }
}

/// Prints a document to stdout.
pub fn print_document(doc: &Value, settings: &OutputSection, args: &OutputArgs) -> ExitCode {
    let style = DocumentStyle::resolve(settings, args, io::stdout().is_terminal());
    match render_document(doc, style) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints a compile error with its hint and returns a failure code.
pub fn report_compile_error(err: &CompileError) -> ExitCode {
    eprintln!("{} {err}", error("error:"));
    if let Some(hint) = err.suggestion() {
        eprintln!("hint: {hint}");
    }
    ExitCode::FAILURE
}
