//! `jast` CLI: compact, check, and inspect JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-encode JSON compactly (stdin → stdout)
//! echo '{ "name": "Alice", "age": 30 }' | jast compact
//!
//! # Compact from file to file, tolerating malformed input
//! jast compact --lenient -i data.json -o data.min.json
//!
//! # Validate a document; exits non-zero with the error position on failure
//! jast check -i data.json
//!
//! # Print the typed tree (Int vs Double, field order, duplicates)
//! jast inspect -i data.json
//!
//! # Show decoder diagnostics
//! jast -v compact --lenient -i dirty.json
//! ```

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use jast_core::{Decoder, Mode, Value, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};
use std::io::{self, Read};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jast", version, about = "Typed JSON AST codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a document and re-encode it compactly
    Compact {
        #[command(flatten)]
        decode: DecodeArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Strictly validate a document
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Maximum nesting depth of arrays and objects
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = max_depth_parser())]
        max_depth: usize,
    },
    /// Print the decoded value tree, one node per line
    Inspect {
        #[command(flatten)]
        decode: DecodeArgs,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Decode malformed input to Nothing instead of failing
    #[arg(long)]
    lenient: bool,
    /// Maximum nesting depth of arrays and objects
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = max_depth_parser())]
    max_depth: usize,
}

/// `--max-depth` accepts 0 through [`MAX_DEPTH_CEILING`].
fn max_depth_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(..=MAX_DEPTH_CEILING as u64)
}

impl DecodeArgs {
    fn decoder(&self) -> Decoder {
        let mode = if self.lenient {
            Mode::Lenient
        } else {
            Mode::Strict
        };
        Decoder::new().with_mode(mode).with_max_depth(self.max_depth)
    }

    fn decode(&self) -> Result<Value> {
        let bytes = read_input(self.input.as_deref())?;
        let decoder = self.decoder();
        debug!(mode = ?decoder.mode(), max_depth = decoder.max_depth(), bytes = bytes.len(), "decoding");
        decoder
            .decode_slice(&bytes)
            .context("Failed to decode JSON document")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compact { decode, output } => {
            let value = decode.decode()?;
            if value.is_nothing() {
                warn!("input is not a valid JSON document; nothing written");
                return Ok(());
            }
            let mut json = jast_core::encode(&value).context("Failed to encode JSON document")?;
            json.push('\n');
            write_output(output.as_deref(), &json)?;
        }
        Commands::Check { input, max_depth } => {
            let bytes = read_input(input.as_deref())?;
            Decoder::new()
                .with_max_depth(max_depth)
                .decode_slice(&bytes)
                .context("Invalid JSON document")?;
            println!("ok");
        }
        Commands::Inspect { decode } => {
            let value = decode.decode()?;
            let mut out = String::new();
            render_tree(&value, 0, "", &mut out);
            print!("{}", out);
        }
    }

    Ok(())
}

/// Route `tracing` output to stderr. `RUST_LOG` wins unless `--verbose` asks
/// for debug output explicitly.
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Append one line per node: `indent` levels of two spaces, the entry
/// `prefix` (`"key": ` inside objects), then the node label. Children follow
/// one level deeper.
fn render_tree(value: &Value, indent: usize, prefix: &str, out: &mut String) {
    out.push_str(&"  ".repeat(indent));
    out.push_str(prefix);
    out.push_str(&node_label(value));
    out.push('\n');

    match value {
        Value::Array(items) => {
            for item in items {
                render_tree(item, indent + 1, "", out);
            }
        }
        Value::Object(fields) => {
            for field in fields {
                let prefix = format!("{:?}: ", field.name);
                render_tree(&field.value, indent + 1, &prefix, out);
            }
        }
        _ => {}
    }
}

fn node_label(value: &Value) -> String {
    let kind = value.kind();
    match value {
        Value::Nothing | Value::Null => kind.to_string(),
        Value::Bool(b) => format!("{kind} {b}"),
        Value::Int(n) => format!("{kind} {n}"),
        Value::Double(n) => format!("{kind} {n:?}"),
        Value::String(s) => format!("{kind} {s:?}"),
        Value::Array(items) => format!("{kind} ({})", plural(items.len(), "item")),
        Value::Object(fields) => format!("{kind} ({})", plural(fields.len(), "field")),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Raw input bytes; UTF-8 validation is left to the decoder so that lenient
/// mode covers it too.
fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
