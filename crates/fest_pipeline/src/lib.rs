//! fest_pipeline - deterministic pipeline surface
//! (load -> validate -> aggregate -> rank -> summary).
//!
//! This crate stays free of presentation concerns and delegates JSON,
//! schemas, and hashing to `fest_io` and all scoring math to `fest_algo`.
//! Stages log through `tracing`; the host decides whether a subscriber is
//! installed. Given the same loaded snapshot and options, `run` returns
//! structurally equal outputs every time.

#![forbid(unsafe_code)]

use std::path::Path;

use thiserror::Error;
use tracing::{info, info_span, warn};

use fest_algo::{aggregate, rank, AggregateOutcome, RankRow, RankingFilter, SnapshotView};
use fest_core::StatusFilter;
use fest_io::loader::{self, LoadedSnapshot, Snapshot, SnapshotPaths};

pub mod summary;
pub mod validate;

pub use summary::{build_summary, RunSummary};
pub use validate::{validate_snapshot, ValidationError, ValidationReport};

/// Single error surface for pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load: {0}")]
    Load(#[from] fest_io::IoError),
    #[error("validate: {0}")]
    Validate(#[from] ValidationError),
}

/// Per-run options. The status filter and the ranking filter are the only
/// knobs; every consumer view is this pipeline plus a different filter.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub status_filter: StatusFilter,
    pub ranking_filter: RankingFilter,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            status_filter: StatusFilter::Published,
            ranking_filter: RankingFilter::ALL,
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutputs {
    pub outcome: AggregateOutcome,
    pub rankings: Vec<RankRow>,
    pub summary: RunSummary,
}

/// Borrowed algorithm view over a loaded snapshot.
pub fn snapshot_view(snapshot: &Snapshot) -> SnapshotView<'_> {
    SnapshotView {
        teams: &snapshot.teams,
        participants: &snapshot.participants,
        programmes: &snapshot.programmes,
        results: &snapshot.results,
        config: &snapshot.config,
    }
}

/// Run the engine over an already-loaded snapshot.
pub fn run(loaded: &LoadedSnapshot, opts: &RunOptions) -> Result<EngineOutputs, PipelineError> {
    let span = info_span!("fest_run", status = opts.status_filter.as_str());
    let _guard = span.enter();

    {
        let _stage = info_span!("validate").entered();
        let report = validate_snapshot(&loaded.snapshot)?;
        for w in &report.warnings {
            warn!("{w}");
        }
    }

    let outcome = {
        let _stage = info_span!("aggregate").entered();
        let outcome = aggregate(&snapshot_view(&loaded.snapshot), opts.status_filter);
        for d in &outcome.diagnostics.missing_programmes {
            warn!(
                result = %d.result_id,
                programme = %d.programme_id,
                "result skipped: programme not found"
            );
        }
        for d in &outcome.diagnostics.unresolved {
            warn!(
                result = %d.result_id,
                identifier = %d.identifier,
                points = d.points,
                "winner entry excluded from team totals: no team resolved"
            );
        }
        outcome
    };

    let rankings = {
        let _stage = info_span!("rank").entered();
        rank(&outcome.team_ledger, &opts.ranking_filter)
    };

    let summary = build_summary(
        opts.status_filter,
        &loaded.digests,
        &outcome,
        rankings.len() as u32,
        loaded.warnings.len() as u32,
    );
    info!(
        results_counted = summary.results_counted,
        unresolved = summary.unresolved_entries,
        teams_ranked = summary.teams_ranked,
        "run complete"
    );

    Ok(EngineOutputs { outcome, rankings, summary })
}

/// Load from a manifest file, then run.
pub fn run_from_manifest(
    manifest_path: &Path,
    opts: &RunOptions,
) -> Result<(LoadedSnapshot, EngineOutputs), PipelineError> {
    let loaded = {
        let _stage = info_span!("load", mode = "manifest").entered();
        loader::load_from_manifest(manifest_path)?
    };
    let outputs = run(&loaded, opts)?;
    Ok((loaded, outputs))
}

/// Load from explicit file paths, then run.
pub fn run_from_paths(
    paths: &SnapshotPaths,
    opts: &RunOptions,
) -> Result<(LoadedSnapshot, EngineOutputs), PipelineError> {
    let loaded = {
        let _stage = info_span!("load", mode = "paths").entered();
        loader::load_from_paths(paths)?
    };
    let outputs = run(&loaded, opts)?;
    Ok((loaded, outputs))
}
