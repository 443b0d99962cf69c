//! CLI entry point for the tracker tool.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info, warn};
use tracker_core::{
    Difficulty, FallbackPolicy, HEADER_ROW_COUNT, JsonFileStore, MetadataIndex, ProblemStatus,
    ProviderTarget, RawProblem, UserStore, backfill_metadata, build_index,
    extract_provider_problems, merge_problems, parse_file_import, parse_sheet_csv,
    resolve_with_policy, rows_from_sheet,
};

mod cli;
mod config;

use cli::{Args, Command};
use config::FileConfig;

/// Collection file used when neither flag nor config names one.
const DEFAULT_STORE_FILE: &str = "problems.json";

/// Effective settings after merging CLI flags over file config.
struct Settings {
    metadata_file: Option<PathBuf>,
    store_file: PathBuf,
    header_rows: usize,
    fallback_policy: FallbackPolicy,
}

impl Settings {
    fn resolve(args: &Args, file: Option<&FileConfig>) -> Self {
        Self {
            metadata_file: args
                .metadata
                .clone()
                .or_else(|| file.and_then(|f| f.metadata_file.clone())),
            store_file: args
                .store
                .clone()
                .or_else(|| file.and_then(|f| f.store_file.clone()))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE)),
            header_rows: file
                .and_then(|f| f.header_rows)
                .unwrap_or(HEADER_ROW_COUNT),
            fallback_policy: file
                .and_then(|f| f.fallback_policy)
                .unwrap_or_default(),
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let loaded_config = config::load_default_file_config()?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => loaded_config
                .config
                .as_ref()
                .and_then(|c| c.verbosity)
                .map_or("info", |v| v.filter_level()),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, config_path = ?loaded_config.path, "CLI arguments parsed");
    let settings = Settings::resolve(&args, loaded_config.config.as_ref());

    match args.command {
        Command::Resolve { name } => run_resolve(&settings, &name),
        Command::Add {
            title,
            difficulty,
            status,
        } => {
            let difficulty = difficulty
                .as_deref()
                .map(|label| {
                    Difficulty::from_label(label)
                        .with_context(|| format!("Unknown difficulty '{label}': expected Easy, Medium or Hard"))
                })
                .transpose()?;
            let mut problem = RawProblem::manual(&title, difficulty);
            if let Some(label) = status.as_deref() {
                let status = label
                    .parse::<ProblemStatus>()
                    .map_err(|e| anyhow::anyhow!("{e}: expected Todo, In Progress or Done"))?;
                problem = problem.with_status(status);
            }
            run_import(&settings, vec![problem])
        }
        Command::ImportFile { path } => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Cannot read import file '{}'", path.display()))?;
            let problems = parse_file_import(&content)?;
            run_import(&settings, problems)
        }
        Command::ImportPayload { url, payload } => {
            let target = ProviderTarget::from_url(&url)?;
            info!(provider = target.kind.segment(), slug = %target.slug, "importing provider payload");
            let raw = fs::read_to_string(&payload)
                .with_context(|| format!("Cannot read payload file '{}'", payload.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("Payload '{}' is not valid JSON", payload.display()))?;
            let problems = extract_provider_problems(target.kind, &value)?;
            run_import(&settings, problems)
        }
        Command::Backfill => run_backfill(&settings),
    }
}

fn load_metadata_index(path: &Path, header_rows: usize) -> Result<MetadataIndex> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read metadata sheet '{}'", path.display()))?;
    let raw_rows = parse_sheet_csv(&content)
        .with_context(|| format!("Cannot parse metadata sheet '{}'", path.display()))?;
    let rows = rows_from_sheet(&raw_rows, header_rows);
    let index = build_index(&rows);
    info!(rows = rows.len(), keys = index.len(), "metadata loaded");
    Ok(index)
}

fn require_metadata(settings: &Settings) -> Result<MetadataIndex> {
    let Some(path) = settings.metadata_file.as_deref() else {
        bail!("No metadata sheet configured\n  Suggestion: pass --metadata <csv> or set `metadata_file` in config");
    };
    load_metadata_index(path, settings.header_rows)
}

fn run_resolve(settings: &Settings, name: &str) -> Result<()> {
    let index = require_metadata(settings)?;
    match resolve_with_policy(name, &index, settings.fallback_policy) {
        Some(entry) => {
            let difficulty = entry.difficulty.map_or("Unknown", Difficulty::as_str);
            println!("{difficulty}\t{}", entry.category);
        }
        None => println!("no match for '{name}'"),
    }
    Ok(())
}

fn run_import(settings: &Settings, incoming: Vec<RawProblem>) -> Result<()> {
    let mut store = JsonFileStore::new(&settings.store_file);
    let state = store.get_user_data()?;

    let outcome = merge_problems(&state.problems, incoming)?;
    let mut problems = outcome.merged;

    match settings.metadata_file.as_deref() {
        Some(path) => {
            let index = load_metadata_index(path, settings.header_rows)?;
            let backfill = backfill_metadata(&problems, &index, settings.fallback_policy);
            debug!(updated = backfill.updated, "metadata applied to collection");
            problems = backfill.records;
        }
        None => warn!("no metadata sheet configured; new problems keep unknown difficulty"),
    }

    let total = problems.len();
    store.set_user_data(&state.with_problems(problems))?;
    println!("Added {} new problems ({total} tracked)", outcome.added_count);
    Ok(())
}

fn run_backfill(settings: &Settings) -> Result<()> {
    let index = require_metadata(settings)?;
    let mut store = JsonFileStore::new(&settings.store_file);
    let state = store.get_user_data()?;

    let outcome = backfill_metadata(&state.problems, &index, settings.fallback_policy);
    if outcome.updated > 0 {
        store.set_user_data(&state.with_problems(outcome.records))?;
    }
    println!("Updated metadata on {} problems", outcome.updated);
    Ok(())
}
