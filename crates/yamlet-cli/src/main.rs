//! yamlet CLI: parse YAML and dump the representation graph.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use yamlet_core::{NodeId, dump};
use yamlet_lib::{Graph, Warning, render_error, render_warnings};

#[derive(Parser)]
#[command(name = "yamlet", version, about = "Parse YAML into a representation graph")]
struct Cli {
    /// Input file; reads stdin when omitted.
    file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Suppress warnings.
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented node trees, one per document.
    Tree,
    /// The raw arena plus document roots as JSON.
    Json,
}

/// JSON payload for `--format json`. Aliased nodes stay shared because
/// children are ids into the arena, so cycles are no obstacle.
#[derive(Serialize)]
struct JsonOutput<'a> {
    documents: &'a [NodeId],
    graph: &'a Graph,
    warnings: &'a [Warning],
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = match read_source(cli.file.as_deref()) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stream = match yamlet_lib::parse(&source) {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("{}", render_error(&source, &err));
            return ExitCode::FAILURE;
        }
    };

    if !cli.quiet && !stream.warnings().is_empty() {
        eprintln!("{}", render_warnings(&source, stream.warnings()));
    }

    match cli.format {
        Format::Tree => {
            for (index, &root) in stream.documents().iter().enumerate() {
                if index > 0 {
                    println!("---");
                }
                print!("{}", dump::dump_document(stream.graph(), root));
            }
        }
        Format::Json => {
            let output = JsonOutput {
                documents: stream.documents(),
                graph: stream.graph(),
                warnings: stream.warnings(),
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }
    ExitCode::SUCCESS
}

fn read_source(path: Option<&std::path::Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
