//! Playfield monitor replay tool.
//!
//! Feeds a recorded event stream through the event log and prints the
//! resulting view once stdin or the file reaches end of input.
//!
//! Usage:
//!   playfield-monitor --file events.jsonl --filter 'ball_*' --sort name-asc
//!   playfield-monitor --limit 50 < events.jsonl
//!
//! Each input line is `{"name": "...", "payload": {...}}`.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use playfield_monitor::constants::{DATA_COLUMN_TITLE, EVENT_COLUMN_TITLE};
use playfield_monitor::event_log::{EventFeed, EventLogView, RetentionPolicy};
use playfield_monitor::types::{SortOrder, payload_from_json};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "playfield-monitor")]
#[command(about = "Replay a recorded playfield event stream through the event log")]
struct Args {
    /// Read events from file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Case-insensitive name filter, `*`, `?` and `[...]` wildcards allowed
    #[arg(long, default_value = "")]
    filter: String,

    /// Display order
    #[arg(long, value_enum, default_value_t = SortArg::ReceivedDesc)]
    sort: SortArg,

    /// Print at most N rows
    #[arg(long)]
    limit: Option<usize>,

    /// Keep only the newest N events
    #[arg(long)]
    keep: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    ReceivedDesc,
    ReceivedAsc,
    NameAsc,
    NameDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::ReceivedDesc => SortOrder::ReceivedDesc,
            SortArg::ReceivedAsc => SortOrder::ReceivedAsc,
            SortArg::NameAsc => SortOrder::NameAsc,
            SortArg::NameDesc => SortOrder::NameDesc,
        }
    }
}

/// One recorded event
#[derive(Deserialize)]
struct ReplayLine {
    name: String,
    #[serde(default)]
    payload: serde_json::Value,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let retention = args.keep.map_or(RetentionPolicy::Unbounded, RetentionPolicy::KeepLatest);
    let mut view = EventLogView::with_retention(retention);
    view.set_sort(args.sort.into());
    view.set_filter(&args.filter);

    let (sender, feed) = EventFeed::channel();
    let mut skipped = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read event stream")?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ReplayLine>(&line) {
            Ok(event) => sender.send(event.name, payload_from_json(event.payload)),
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping malformed event");
                skipped += 1;
            }
        }
    }
    let replayed = feed.drain_into(&mut view);
    info!(replayed, skipped, "Replay finished");

    print_rows(&mut view, args.limit.unwrap_or(usize::MAX));
    Ok(())
}

fn print_rows(view: &mut EventLogView, limit: usize) {
    let widths = view.columns();
    println!(
        "{:<event$}  {}",
        EVENT_COLUMN_TITLE,
        DATA_COLUMN_TITLE,
        event = widths.event
    );
    println!("{}  {}", "-".repeat(widths.event), "-".repeat(widths.data));
    for row in view.rendered_rows().into_iter().take(limit) {
        println!("{:<event$}  {}", row.name, row.data, event = widths.event);
    }

    println!("\n{} of {} events", view.visible_count(), view.record_count());
}
