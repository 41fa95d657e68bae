//! Console report: reads a JSON array of tab records and prints the duplicate
//! sets that would be collapsed. Nothing is closed.
//!
//! Usage: `tabdedup <tabs.json> [--ignore-query] [--include-pinned] [--keep-newest] [--json]`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::error;
use tracing_subscriber::EnvFilter;

use tabdedup::services::grouping_engine::group_tabs_by_duplicate;
use tabdedup::services::keeper_selector::select_tabs_to_close;
use tabdedup::services::presentation::{group_views, groups_note};
use tabdedup::types::settings::{Settings, Strategy};
use tabdedup::types::tab::TabRecord;

const USAGE: &str =
    "usage: tabdedup <tabs.json> [--ignore-query] [--include-pinned] [--keep-newest] [--json]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabdedup=warn")),
        )
        .init();

    let mut path = None;
    let mut settings = Settings::default();
    let mut as_json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--ignore-query" => settings.ignore_query = true,
            "--include-pinned" => settings.include_pinned = true,
            "--keep-newest" => settings.strategy = Strategy::KeepNewest,
            "--json" => as_json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            other if path.is_none() && !other.starts_with("--") => path = Some(other.to_string()),
            other => {
                eprintln!("unexpected argument: {}\n{}", other, USAGE);
                return ExitCode::FAILURE;
            }
        }
    }
    let Some(path) = path else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let tabs: Vec<TabRecord> = match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
    {
        Ok(tabs) => tabs,
        Err(e) => {
            error!(path = %path, error = %e, "failed to read tab snapshot");
            return ExitCode::FAILURE;
        }
    };

    // The snapshot is grouped as given, duplicate ids included.
    let summary = group_tabs_by_duplicate(&tabs, &settings);
    let to_close = select_tabs_to_close(&summary.duplicate_sets, settings.strategy);

    if as_json {
        let report = serde_json::json!({"summary": summary, "toClose": to_close});
        println!("{}", report);
        return ExitCode::SUCCESS;
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as f64;
    println!(
        "{} tabs, {} eligible. {}",
        summary.total_tabs,
        summary.eligible_tabs,
        groups_note(&summary)
    );
    for view in group_views(&summary, settings.strategy, now) {
        println!();
        println!("{} ({})", view.title, view.badge);
        for row in view.rows {
            let marker = if row.keep { "keep " } else { "close" };
            let flags = if row.flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", row.flags.join(", "))
            };
            println!("  {} #{} {} - last active {}{}", marker, row.id, row.title, row.last_active, flags);
        }
    }
    if !to_close.is_empty() {
        println!();
        println!("would close: {:?}", to_close);
    }
    ExitCode::SUCCESS
}
