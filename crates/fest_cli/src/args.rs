//! Argument parsing and validation for the `fest` CLI.
//!
//! Rules:
//! - Exactly one input mode: `--manifest` XOR the four explicit file flags
//!   (`--teams --participants --programmes --results`, plus optional
//!   `--config`).
//! - `--status` selects the aggregation scope: `published` (external) or
//!   `preview` (published plus checked), both through the same engine.
//! - Ranking filters (`--category`, `--subcategory`, `--section`) compose
//!   freely; omitting all three ranks on flat totals.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

use fest_algo::RankingFilter;
use fest_core::{Category, Section, StatusFilter, Subcategory};
use fest_io::loader::SnapshotPaths;
use fest_pipeline::RunOptions;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fest",
    disable_help_subcommand = true,
    about = "Offline, deterministic scoring CLI for festival results"
)]
pub struct Args {
    // --- Mode selection ---
    /// Path to a snapshot manifest JSON (mutually exclusive with the
    /// explicit file flags).
    #[arg(long, conflicts_with_all = ["teams", "participants", "programmes", "results", "config"])]
    pub manifest: Option<PathBuf>,

    // --- Explicit mode (when --manifest is not used) ---
    /// Teams JSON path.
    #[arg(long)]
    pub teams: Option<PathBuf>,
    /// Participants JSON path.
    #[arg(long)]
    pub participants: Option<PathBuf>,
    /// Programmes JSON path.
    #[arg(long)]
    pub programmes: Option<PathBuf>,
    /// Results JSON path.
    #[arg(long)]
    pub results: Option<PathBuf>,
    /// Scoring configuration JSON path (defaults apply when omitted).
    #[arg(long)]
    pub config: Option<PathBuf>,

    // --- Scope & ranking filters ---
    /// Status scope for aggregation.
    #[arg(long, default_value = "published", value_parser = ["published", "preview"])]
    pub status: String,
    /// Restrict the ranking view to one category.
    #[arg(long, value_parser = ["arts", "sports"])]
    pub category: Option<String>,
    /// Restrict the ranking view to one arts subcategory.
    #[arg(long, value_parser = ["stage", "non-stage", "none"])]
    pub subcategory: Option<String>,
    /// Restrict the ranking view to one age section.
    #[arg(long, value_parser = ["senior", "junior", "sub-junior", "general"])]
    pub section: Option<String>,

    // --- Output & control ---
    /// Output directory for rendered artifacts.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Load and validate inputs, then stop without aggregating.
    #[arg(long)]
    pub validate_only: bool,
    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation. Messages stay short and stable;
/// scripts match on them.
#[derive(Debug)]
pub enum CliError {
    BadCombo(&'static str),
    Missing(&'static str),
    BadValue(&'static str, String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::BadCombo(m) => write!(f, "bad flag combination: {m}"),
            CliError::Missing(m) => write!(f, "missing required flag: {m}"),
            CliError::BadValue(flag, v) => write!(f, "bad value for {flag}: {v}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Input mode after validation.
#[derive(Debug, Clone)]
pub enum InputMode {
    Manifest(PathBuf),
    Paths(SnapshotPaths),
}

/// Validated arguments ready for the pipeline.
#[derive(Debug, Clone)]
pub struct ValidArgs {
    pub mode: InputMode,
    pub run: RunOptions,
    pub out: PathBuf,
    pub validate_only: bool,
    pub quiet: bool,
}

/// Validate the raw arguments into a runnable configuration.
pub fn validate(args: Args) -> Result<ValidArgs, CliError> {
    let mode = match &args.manifest {
        Some(man) => InputMode::Manifest(man.clone()),
        None => {
            let teams = args.teams.clone().ok_or(CliError::Missing("--teams"))?;
            let participants = args
                .participants
                .clone()
                .ok_or(CliError::Missing("--participants"))?;
            let programmes = args
                .programmes
                .clone()
                .ok_or(CliError::Missing("--programmes"))?;
            let results = args.results.clone().ok_or(CliError::Missing("--results"))?;
            InputMode::Paths(SnapshotPaths {
                teams,
                participants,
                programmes,
                results,
                config: args.config.clone(),
            })
        }
    };

    let status_filter = match args.status.as_str() {
        "published" => StatusFilter::Published,
        "preview" => StatusFilter::PublishedAndChecked,
        other => return Err(CliError::BadValue("--status", other.to_string())),
    };

    let ranking_filter = RankingFilter {
        category: parse_opt(&args.category, "--category", category_from)?,
        subcategory: parse_opt(&args.subcategory, "--subcategory", subcategory_from)?,
        section: parse_opt(&args.section, "--section", section_from)?,
    };

    if args.subcategory.is_some() && ranking_filter.category == Some(Category::Sports) {
        return Err(CliError::BadCombo("--subcategory applies to arts only"));
    }

    Ok(ValidArgs {
        mode,
        run: RunOptions { status_filter, ranking_filter },
        out: args.out,
        validate_only: args.validate_only,
        quiet: args.quiet,
    })
}

fn parse_opt<T>(
    raw: &Option<String>,
    flag: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, CliError> {
    match raw {
        None => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| CliError::BadValue(flag, s.clone())),
    }
}

fn category_from(s: &str) -> Option<Category> {
    match s {
        "arts" => Some(Category::Arts),
        "sports" => Some(Category::Sports),
        _ => None,
    }
}

fn subcategory_from(s: &str) -> Option<Subcategory> {
    match s {
        "stage" => Some(Subcategory::Stage),
        "non-stage" => Some(Subcategory::NonStage),
        "none" => Some(Subcategory::NotApplicable),
        _ => None,
    }
}

fn section_from(s: &str) -> Option<Section> {
    match s {
        "senior" => Some(Section::Senior),
        "junior" => Some(Section::Junior),
        "sub-junior" => Some(Section::SubJunior),
        "general" => Some(Section::General),
        _ => None,
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<ValidArgs, CliError> {
        let mut full = vec!["fest"];
        full.extend_from_slice(argv);
        validate(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn manifest_mode_parses() {
        let v = parse(&["--manifest", "snap/manifest.json"]).unwrap();
        assert!(matches!(v.mode, InputMode::Manifest(_)));
        assert_eq!(v.run.status_filter, StatusFilter::Published);
    }

    #[test]
    fn explicit_mode_requires_all_four_files() {
        let err = parse(&["--teams", "t.json", "--results", "r.json"]).unwrap_err();
        assert!(matches!(err, CliError::Missing("--participants")));
    }

    #[test]
    fn preview_status_and_filters_map_to_engine_vocabulary() {
        let v = parse(&[
            "--manifest", "m.json",
            "--status", "preview",
            "--category", "arts",
            "--subcategory", "stage",
            "--section", "sub-junior",
        ])
        .unwrap();
        assert_eq!(v.run.status_filter, StatusFilter::PublishedAndChecked);
        assert_eq!(v.run.ranking_filter.category, Some(Category::Arts));
        assert_eq!(v.run.ranking_filter.subcategory, Some(Subcategory::Stage));
        assert_eq!(v.run.ranking_filter.section, Some(Section::SubJunior));
    }

    #[test]
    fn sports_subcategory_combo_is_rejected() {
        let err = parse(&[
            "--manifest", "m.json",
            "--category", "sports",
            "--subcategory", "stage",
        ])
        .unwrap_err();
        assert!(matches!(err, CliError::BadCombo(_)));
    }

    #[test]
    fn unknown_status_is_rejected_at_parse_time() {
        let mut full = vec!["fest", "--manifest", "m.json", "--status", "live"];
        assert!(Args::try_parse_from(full.drain(..)).is_err());
    }
}
