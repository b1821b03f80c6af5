//! `fest` binary: load a snapshot, run the canonical engine once, write the
//! rendered views.
//!
//! Every artifact is produced from a single pipeline run; there is no
//! second code path for any view. Exit codes are stable for scripting.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad flags, schema/manifest failures, snapshot invariant violations.
    pub const VALIDATION: i32 = 2;
    /// Filesystem problems (unreadable inputs, unwritable output).
    pub const IO: i32 = 4;
    /// Unexpected engine-side failures.
    pub const ENGINE: i32 = 5;
}

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde_json::{Map as JsonMap, Value};
use tracing_subscriber::EnvFilter;

use args::{validate, Args, InputMode, ValidArgs};
use fest_algo::AggregateDiagnostics;
use fest_io::canonical_json::write_canonical_file;
use fest_io::loader::{self, LoadedSnapshot};
use fest_io::IoError;
use fest_pipeline::{run, validate_snapshot, EngineOutputs, PipelineError};
use fest_report::{
    achievement_view_json, breakdown_view_json, build_achievement_view, build_breakdown_view,
    build_ranking_view, ranking_view_json,
};

fn main() -> ExitCode {
    let parsed = match Args::try_parse() {
        Ok(a) => a,
        Err(e) => {
            // clap prints its own rendered message (also handles --help).
            return match e.print() {
                Ok(()) if e.use_stderr() => ExitCode::from(exitcodes::VALIDATION as u8),
                Ok(()) => ExitCode::from(exitcodes::OK as u8),
                Err(_) => ExitCode::from(exitcodes::IO as u8),
            };
        }
    };

    let valid = match validate(parsed) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("fest: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    init_tracing(valid.quiet);

    let rc = match execute(&valid) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("fest: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// `RUST_LOG` wins when set; otherwise warnings only, or silence with
/// `--quiet`.
fn init_tracing(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if quiet { "off" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug)]
enum MainError {
    Pipeline(PipelineError),
    Write(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Pipeline(e) => write!(f, "{e}"),
            MainError::Write(m) => write!(f, "write: {m}"),
        }
    }
}

impl From<PipelineError> for MainError {
    fn from(e: PipelineError) -> Self {
        MainError::Pipeline(e)
    }
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Pipeline(PipelineError::Load(IoError::Path(_))) => exitcodes::IO,
        MainError::Pipeline(PipelineError::Load(_)) => exitcodes::VALIDATION,
        MainError::Pipeline(PipelineError::Validate(_)) => exitcodes::VALIDATION,
        MainError::Write(_) => exitcodes::IO,
    }
}

fn execute(valid: &ValidArgs) -> Result<(), MainError> {
    let loaded = load(valid)?;

    if valid.validate_only {
        let report = validate_snapshot(&loaded.snapshot).map_err(PipelineError::from)?;
        for w in loaded.warnings.iter().chain(report.warnings.iter()) {
            eprintln!("fest: warning: {w}");
        }
        if !valid.quiet {
            println!(
                "fest: inputs valid ({} results, {} warnings)",
                loaded.snapshot.results.len(),
                loaded.warnings.len() + report.warnings.len()
            );
        }
        return Ok(());
    }

    let outputs = run(&loaded, &valid.run)?;
    write_artifacts(&valid.out, &loaded, &outputs)?;

    if !valid.quiet {
        println!(
            "fest: {} teams ranked over {} results ({} unresolved) -> {}",
            outputs.summary.teams_ranked,
            outputs.summary.results_counted,
            outputs.summary.unresolved_entries,
            valid.out.display()
        );
    }
    Ok(())
}

fn load(valid: &ValidArgs) -> Result<LoadedSnapshot, MainError> {
    let loaded = match &valid.mode {
        InputMode::Manifest(path) => loader::load_from_manifest(path),
        InputMode::Paths(paths) => loader::load_from_paths(paths),
    }
    .map_err(PipelineError::from)?;
    Ok(loaded)
}

fn write_artifacts(
    out: &Path,
    loaded: &LoadedSnapshot,
    outputs: &EngineOutputs,
) -> Result<(), MainError> {
    let snap = &loaded.snapshot;

    let rankings = build_ranking_view(&outputs.rankings, &snap.teams);
    let breakdown = build_breakdown_view(&outputs.outcome.team_ledger, &snap.teams);
    let achievements = build_achievement_view(
        &outputs.outcome.achievements,
        &snap.participants,
        &snap.teams,
        &snap.programmes,
    );

    let write = |name: &str, value: &Value| -> Result<(), MainError> {
        write_canonical_file(&out.join(name), value)
            .map_err(|e| MainError::Write(format!("{name}: {e}")))
    };

    write("rankings.json", &ranking_view_json(&rankings))?;
    write("breakdown.json", &breakdown_view_json(&breakdown))?;
    write("achievements.json", &achievement_view_json(&achievements))?;
    write("run_summary.json", &run_summary_json(outputs)?)?;
    Ok(())
}

/// Summary plus the unresolved/missing diagnostic lists, so data-quality
/// warnings can be surfaced without re-running anything.
fn run_summary_json(outputs: &EngineOutputs) -> Result<Value, MainError> {
    let summary = serde_json::to_value(&outputs.summary)
        .map_err(|e| MainError::Write(format!("run summary: {e}")))?;

    let mut root = JsonMap::new();
    root.insert("summary".into(), summary);
    root.insert(
        "diagnostics".into(),
        diagnostics_json(&outputs.outcome.diagnostics),
    );
    Ok(Value::Object(root))
}

fn diagnostics_json(diagnostics: &AggregateDiagnostics) -> Value {
    let unresolved: Vec<Value> = diagnostics
        .unresolved
        .iter()
        .map(|d| {
            let mut o = JsonMap::new();
            o.insert("resultId".into(), Value::String(d.result_id.to_string()));
            o.insert("programmeId".into(), Value::String(d.programme_id.to_string()));
            o.insert("position".into(), Value::String(d.position.as_str().into()));
            o.insert("identifier".into(), Value::String(d.identifier.clone()));
            o.insert("points".into(), Value::from(d.points));
            Value::Object(o)
        })
        .collect();

    let missing: Vec<Value> = diagnostics
        .missing_programmes
        .iter()
        .map(|d| {
            let mut o = JsonMap::new();
            o.insert("resultId".into(), Value::String(d.result_id.to_string()));
            o.insert("programmeId".into(), Value::String(d.programme_id.to_string()));
            Value::Object(o)
        })
        .collect();

    let mut root = JsonMap::new();
    root.insert("unresolved".into(), Value::Array(unresolved));
    root.insert("missingProgrammes".into(), Value::Array(missing));
    Value::Object(root)
}
