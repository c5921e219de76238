//! Convert an HTML file (or stdin) to readable text
//!
//! ```text
//! page-text page.html
//! curl -s https://example.com | page-text --uri https://example.com --max-chars 2000
//! page-text --content-type "text/html; charset=windows-1252" --json legacy.html
//! ```

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use page_text_converter::{PageReport, TextConverter, validate_uri};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "page-text", version, about = "Convert HTML pages to readable text")]
struct Cli {
    /// HTML file to convert; `-` or nothing reads stdin
    input: Option<PathBuf>,

    /// Content-Type header of the page, used for charset detection
    #[arg(long)]
    content_type: Option<String>,

    /// URI the page was fetched from; prints a report headed by it
    #[arg(long)]
    uri: Option<String>,

    /// Cut the report body after this many characters
    #[arg(long, requires = "uri")]
    max_chars: Option<usize>,

    /// Print title and body as JSON
    #[arg(long, conflicts_with = "uri")]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!(error = %e, "conversion failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(uri) = cli.uri.as_deref() {
        validate_uri(uri)?;
    }

    let html = read_input(cli.input.as_ref())?;
    tracing::debug!(bytes = html.len(), "read input");

    let page = TextConverter::new().convert_bytes(&html, cli.content_type.as_deref())?;
    tracing::info!(
        title = %page.title,
        chars = page.body.chars().count(),
        "converted page"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else if let Some(uri) = cli.uri.as_deref() {
        let mut report = PageReport::new(uri, &page);
        if let Some(limit) = cli.max_chars {
            report = report.max_chars(limit);
        }
        print!("{report}");
    } else {
        println!("{}", page.body);
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}
