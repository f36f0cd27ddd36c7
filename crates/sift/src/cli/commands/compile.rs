//! Implementation of `sift compile`.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use log::debug;
use serde_json::Value;
use sift_query::{
    Compiler, Leaf, OptionTree, Scalar, SearchOptions, flatten, query_to_value, search_body,
};

use crate::cli::{
    args::CompileCommand,
    context::CommandContext,
    output::{dim, header, print_document, report_compile_error, subheader},
};

/// Compiles query text and options and prints the resulting document.
pub fn run(ctx: &CommandContext, cmd: &CompileCommand) -> ExitCode {
    let raw = match read_options(cmd) {
        Ok(raw) => raw,
        Err(code) => return code,
    };

    let options = match SearchOptions::from_json(&raw) {
        Ok(options) => options,
        Err(e) => return report_compile_error(&e),
    };

    let compiler = Compiler::new(ctx.config.compile_settings());
    let query = match compiler.compile(&cmd.text, &options) {
        Ok(query) => query,
        Err(e) => return report_compile_error(&e),
    };

    if cmd.explain {
        print_explanation(&query.to_string(), &options);
    }

    let mut doc = query_to_value(&query);
    if !cmd.aggregations.is_empty() {
        debug!("attaching {} aggregation(s)", cmd.aggregations.len());
        doc = search_body(doc, &cmd.aggregations);
    }

    print_document(&doc, &ctx.config.output, &cmd.output)
}

/// Reads the options object from `--options`, `--options-file`, or neither.
fn read_options(cmd: &CompileCommand) -> Result<Value, ExitCode> {
    let (source, contents) = match (&cmd.options, &cmd.options_file) {
        (Some(inline), _) => ("--options".to_string(), inline.clone()),
        (None, Some(path)) => (path.display().to_string(), read_source(path)?),
        (None, None) => return Ok(Value::Null),
    };

    serde_json::from_str(&contents).map_err(|e| {
        eprintln!("error: failed to parse options from {source}: {e}");
        ExitCode::FAILURE
    })
}

/// Reads a file, treating `-` as stdin.
fn read_source(path: &Path) -> Result<String, ExitCode> {
    let result = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read_to_string(path)
    };

    result.map_err(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        ExitCode::FAILURE
    })
}

/// Prints the query tree and a table of flattened filter conditions.
fn print_explanation(tree: &str, options: &SearchOptions) {
    println!("{}", header("Query tree"));
    for line in tree.lines() {
        println!("  {line}");
    }
    println!();

    println!("{}", subheader("Conditions:"));
    let rows = condition_rows(options);
    if rows.is_empty() {
        println!("  {}", dim("(none)"));
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Option", "Field", "Kind", "Value"]);
        for row in rows {
            table.add_row(row.into_iter().map(Cell::new).collect::<Vec<_>>());
        }
        println!("{table}");
    }
    println!();
}

/// Builds one `[option, field, kind, value]` row per flattened condition.
fn condition_rows(options: &SearchOptions) -> Vec<[String; 4]> {
    let sources: [(&str, Option<&OptionTree>); 3] = [
        ("only", options.only.as_ref()),
        ("except", options.except.as_ref()),
        ("boost_where", options.boost_where.as_ref()),
    ];

    let mut rows = Vec::new();
    for (option, tree) in sources {
        let Some(tree) = tree else { continue };
        for (field, leaf) in flatten(tree) {
            let (kind, value) = match leaf {
                Leaf::Scalar(value) => ("term", value.to_value()),
                Leaf::List(values) => (
                    "terms",
                    Value::Array(values.iter().map(Scalar::to_value).collect()),
                ),
            };
            rows.push([option.to_string(), field, kind.to_string(), value.to_string()]);
        }
    }
    rows
}
