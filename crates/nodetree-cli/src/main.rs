//! `nodetree` CLI — load a node tree document, print it, and optionally save it again.
//!
//! ## Usage
//!
//! ```sh
//! # Load and print a tree
//! nodetree -i tree.xml
//!
//! # Load, print, and re-save (re-encoded, 2-space indent)
//! nodetree -i tree.xml -o copy.xml --indent 2
//!
//! # Read from stdin and print the JSON view
//! cat tree.xml | nodetree --format json
//!
//! # Debug logging (or set NODETREE_LOG=debug)
//! nodetree -v -i tree.xml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nodetree_core::printer::{render_tree, to_json};
use nodetree_core::{decode, encode_to_file, Document, Tree};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "NODETREE_LOG";

#[derive(Parser)]
#[command(
    name = "nodetree",
    version,
    about = "Load, print and re-save typed node tree XML documents"
)]
struct Cli {
    /// Input document (reads from stdin if omitted or "-")
    #[arg(short, long)]
    input: Option<String>,

    /// Save the loaded tree to this file
    #[arg(short, long)]
    output: Option<String>,

    /// How to print the loaded tree
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Spaces per nesting level in the saved document (0 = single line)
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Tab-indented `--{ LABEL(value)` lines
    Tree,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match cli.input.as_deref() {
        Some("-") | None => None,
        Some(path) => Some(path),
    };
    let name = source.unwrap_or("<stdin>");
    let document =
        load_document(source).with_context(|| format!("Failed to load document '{}'", name))?;
    let tree = decode(&document).context("Failed to decode tree")?;
    tracing::debug!(nodes = tree.node_count(), depth = tree.depth(), "loaded tree");

    println!("Tree loaded from file '{}':", name);
    print!("{}", render(&tree, cli.format)?);

    if let Some(output) = cli.output.as_deref() {
        encode_to_file(&tree, output, cli.indent)
            .with_context(|| format!("Failed to write file: {}", output))?;
        println!("Tree saved to file '{}'", output);
    }

    Ok(())
}

fn render(tree: &Tree, format: Format) -> Result<String> {
    match format {
        Format::Tree if tree.is_empty() => Ok("(empty tree)\n".to_string()),
        Format::Tree => Ok(render_tree(tree)),
        Format::Json => {
            let json = to_json(tree).context("Failed to render tree as JSON")?;
            Ok(format!("{}\n", json))
        }
    }
}

/// Logs go to stderr so stdout stays clean for the tree rendering.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read and parse the input file, or stdin when no path is given.
fn load_document(path: Option<&str>) -> Result<Document> {
    match path {
        Some(path) => Ok(Document::read_file(path)?),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(Document::parse(&buf)?)
        }
    }
}
