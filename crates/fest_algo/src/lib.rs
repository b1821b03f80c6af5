//! fest_algo - the canonical scoring algorithms.
//!
//! Every consumer view (admin, public, team portal) goes through the same
//! five entry points exposed here; the only thing a caller may vary is a
//! filter parameter. No view-specific branching exists below this surface.
//!
//! - `resolve`: winner entry to owning team (membership first, decode chain
//!   as last resort)
//! - `points`: base points plus centrally gated grade bonus
//! - `classify`: programme to classification tuple, computed once per result
//! - `aggregate`: results to team ledger + achievement ledger + diagnostics
//! - `rank`: ledger + filter to a sorted, tie-broken ranking
//!
//! This crate is I/O-free and RNG-free; given equal snapshots it produces
//! structurally equal ledgers.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod classify;
pub mod resolve;
pub mod points;
pub mod aggregate;
pub mod rank;

pub use aggregate::{
    aggregate, Achievement, AchievementLedger, AchievementRecord, AggregateDiagnostics,
    AggregateOutcome, BucketTotals, MissingProgramme, SnapshotView, TeamLedger, TeamTotals,
    UnresolvedWinner, WinnerKey,
};
pub use classify::{classify, BucketKey, Classification};
pub use points::entry_points;
pub use rank::{rank, selected_totals, RankRow, RankingFilter};
pub use resolve::{decode_chest_number, resolve_team, TeamResolution};
