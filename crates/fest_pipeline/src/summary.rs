//! Run summary: what was computed, over which inputs, with what data
//! quality.
//!
//! The digests let two consumers confirm they looked at the same snapshot;
//! the counts let them surface "N entries could not be attributed" warnings
//! without re-deriving anything.

use fest_algo::AggregateOutcome;
use fest_core::StatusFilter;
use fest_io::loader::InputDigests;

/// Summary artifact of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub status_filter: StatusFilter,
    pub digests: InputDigests,
    /// Results present in the snapshot.
    pub results_seen: u32,
    /// Results that passed the status filter and resolved a programme.
    pub results_counted: u32,
    pub missing_programmes: u32,
    pub unresolved_entries: u32,
    pub teams_ranked: u32,
    pub load_warnings: u32,
}

pub fn build_summary(
    status_filter: StatusFilter,
    digests: &InputDigests,
    outcome: &AggregateOutcome,
    teams_ranked: u32,
    load_warnings: u32,
) -> RunSummary {
    RunSummary {
        status_filter,
        digests: digests.clone(),
        results_seen: outcome.results_seen,
        results_counted: outcome.results_counted,
        missing_programmes: outcome.diagnostics.missing_programmes.len() as u32,
        unresolved_entries: outcome.diagnostics.unresolved.len() as u32,
        teams_ranked,
        load_warnings,
    }
}
