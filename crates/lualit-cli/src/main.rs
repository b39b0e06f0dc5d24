//! `lualit` CLI — convert JSON documents to Lua literal chunks and parsed
//! Lua chunks back to JSON.
//!
//! Lua parsing stays external: `decode` consumes a luaparse-style AST
//! supplied as JSON (e.g. `luaparse --json chunk.lua`), never raw Lua source.
//!
//! ## Usage
//!
//! ```sh
//! # JSON → Lua chunk (stdin → stdout)
//! echo '{"name":"Ada"}' | lualit encode
//!
//! # Compact output, double-quoted strings
//! lualit encode -i data.json --compact --double-quotes
//!
//! # Four-space indentation, CRLF line endings
//! lualit encode -i data.json --indent 4 --crlf
//!
//! # luaparse AST JSON → pretty-printed JSON
//! lualit decode -i chunk.ast.json -o data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lualit_core::{FormatOptions, Indent, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "lualit", version, about = "Lua table literal encoder/decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON document as a Lua `return <literal>` chunk
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact output with no inter-element whitespace
        #[arg(long)]
        compact: bool,
        /// Spaces per indentation level
        #[arg(long, default_value_t = 2, conflicts_with = "compact")]
        indent: usize,
        /// Quote strings with `"` instead of `'`
        #[arg(long)]
        double_quotes: bool,
        /// Use CRLF line endings
        #[arg(long)]
        crlf: bool,
    },
    /// Decode a parsed Lua chunk (luaparse AST JSON) back to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            compact,
            indent,
            double_quotes,
            crlf,
        } => {
            let text = read_input(input.as_deref())?;
            let json: serde_json::Value =
                serde_json::from_str(&text).context("Input is not valid JSON")?;
            let options = FormatOptions {
                eol: if crlf { "\r\n" } else { "\n" }.to_string(),
                single_quote: !double_quotes,
                spaces: if compact {
                    Indent::None
                } else {
                    Indent::Spaces(indent)
                },
            };
            let lua = lualit_core::serialize(&Value::from_json(&json), &options)
                .context("Failed to render the value as a Lua literal")?;
            write_output(output.as_deref(), &lua)?;
        }
        Commands::Decode { input, output } => {
            let text = read_input(input.as_deref())?;
            let tree: serde_json::Value =
                serde_json::from_str(&text).context("Input is not a JSON-encoded Lua AST")?;
            let value = lualit_core::deserialize(&tree)
                .context("Failed to reduce the Lua chunk to a value")?;
            let pretty = serde_json::to_string_pretty(&value)?;
            write_output(output.as_deref(), &pretty)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
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
