use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing::{info, Level};
use transport_catalogue::prelude::*;

mod input;
mod output;

use input::RequestDocument;
use output::response_to_json;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnInvalid {
    /// Log and drop invalid base records
    Skip,
    /// Fail on the first invalid base record
    Abort,
}

impl From<OnInvalid> for LoadPolicy {
    fn from(value: OnInvalid) -> Self {
        match value {
            OnInvalid::Skip => LoadPolicy::Skip,
            OnInvalid::Abort => LoadPolicy::Abort,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "catalogue-cli",
    author,
    version,
    about = "Answer transport catalogue queries from a JSON request document",
    long_about = "Loads stops, road distances and buses from `base_requests`, then answers \
                  every entry of `stat_requests` (Stop, Bus, Route, Map) and prints the \
                  responses as a JSON array keyed by `request_id`."
)]
struct Args {
    /// Input JSON document (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to do with base requests the catalogue rejects
    #[arg(long, value_enum, default_value_t = OnInvalid::Skip)]
    on_invalid: OnInvalid,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .without_time()
        .init();

    let text = read_input(args.input.as_ref())?;
    let document: RequestDocument = serde_json::from_str(&text).context("Failed to parse request document")?;
    let responses = process(document, args.on_invalid.into())?;

    let mut rendered = if args.pretty {
        serde_json::to_string_pretty(&responses)?
    } else {
        serde_json::to_string(&responses)?
    };
    rendered.push('\n');

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} responses to {}", responses.len(), path.display());
        }
        None => io::stdout().write_all(rendered.as_bytes()).context("Failed to write to stdout")?,
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let Some(path) = path else {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
        return Ok(text);
    };
    if !path.exists() {
        bail!("Input file does not exist: {}", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Loads the base requests and answers every stat request in order
fn process(document: RequestDocument, policy: LoadPolicy) -> Result<Vec<Value>> {
    let RequestDocument {
        base_requests,
        render_settings,
        routing_settings,
        stat_requests,
    } = document;

    let records: Vec<LoadRecord> = base_requests.into_iter().map(LoadRecord::from).collect();
    let mut catalogue = TransportCatalogue::new();
    let report = load(&mut catalogue, &records, policy).context("Failed to load base requests")?;
    info!(
        "Loaded {} stops, {} distances, {} buses ({} rejected)",
        report.stops,
        report.distances,
        report.buses,
        report.rejected.len()
    );

    let mut handler = RequestHandler::new(&catalogue, routing_settings.unwrap_or_default())
        .context("Invalid routing settings")?;
    if let Some(settings) = render_settings {
        handler = handler.with_renderer(MapRenderer::new(settings));
    }

    let mut responses = Vec::with_capacity(stat_requests.len());
    for request in &stat_requests {
        let response = handler
            .handle(&request.query())
            .with_context(|| format!("Failed to answer request {}", request.id()))?;
        responses.push(response_to_json(request.id(), &response));
    }
    Ok(responses)
}
