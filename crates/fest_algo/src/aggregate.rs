//! Aggregation engine: fold qualifying results into fresh ledgers.
//!
//! Every invocation rebuilds both ledgers from the full qualifying result
//! set; there are no incremental counters anywhere, so two runs over the
//! same snapshot cannot drift apart. Results are processed in ascending
//! result-id order, making the outcome independent of input order.
//!
//! Failure posture: data problems (missing programme, unresolvable team)
//! skip the single affected contribution and land in diagnostics; the run
//! always completes with a fully computed ledger.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use fest_core::{
    ChestNumber, Participant, Position, Programme, ProgrammeId, ResultDoc, ResultId,
    ScoringConfig, StatusFilter, Team, TeamCode, WinnerEntry,
};

use crate::classify::{classify, BucketKey};
use crate::points::entry_points;
use crate::resolve::{resolve_team, TeamResolution};

// ----------------------------- Snapshot view -----------------------------

/// Borrowed view over an immutable input snapshot. The engine reads, never
/// writes; concurrent aggregations may share one snapshot freely.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotView<'a> {
    pub teams: &'a BTreeMap<TeamCode, Team>,
    pub participants: &'a BTreeMap<ChestNumber, Participant>,
    pub programmes: &'a BTreeMap<ProgrammeId, Programme>,
    pub results: &'a [ResultDoc],
    pub config: &'a ScoringConfig,
}

// ----------------------------- Team ledger -----------------------------

/// Points and contribution count for one bucket. `result_count` counts
/// winner entries, not distinct result documents: a result with winners in
/// two positions contributes twice on purpose. The two numbers answer
/// different questions and stay distinct fields everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BucketTotals {
    pub points: u64,
    pub result_count: u32,
}

impl BucketTotals {
    #[inline]
    fn add_entry(&mut self, points: u64) {
        self.points += points;
        self.result_count += 1;
    }

    #[inline]
    pub fn merge(&mut self, other: &BucketTotals) {
        self.points += other.points;
        self.result_count += other.result_count;
    }
}

/// Accumulated totals for one team: a flat total plus per-bucket splits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamTotals {
    pub total: BucketTotals,
    pub buckets: BTreeMap<BucketKey, BucketTotals>,
}

/// Team score ledger. Every known team has a row, zero or not, so filtered
/// views can render absent/zero rather than erroring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamLedger {
    pub teams: BTreeMap<TeamCode, TeamTotals>,
}

impl TeamLedger {
    fn add_entry(&mut self, code: TeamCode, bucket: BucketKey, points: u64) {
        let row = self.teams.entry(code).or_default();
        row.total.add_entry(points);
        row.buckets.entry(bucket).or_default().add_entry(points);
    }
}

// ----------------------------- Achievement ledger -----------------------------

/// Identity an achievement accumulates under. Unresolvable individuals keep
/// their raw chest number as the key; they are excluded from team totals
/// only.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WinnerKey {
    Participant(ChestNumber),
    Team(TeamCode),
}

impl WinnerKey {
    pub fn identifier(&self) -> &str {
        match self {
            WinnerKey::Participant(c) => c.as_str(),
            WinnerKey::Team(t) => t.as_str(),
        }
    }
}

/// One placement earned by one identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Achievement {
    pub programme_id: ProgrammeId,
    pub position: Position,
    pub grade: Option<String>,
    pub points: u64,
}

/// All placements for one identity plus its running totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AchievementRecord {
    pub entries: Vec<Achievement>,
    pub total: BucketTotals,
}

/// Participant/team achievement ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AchievementLedger {
    pub winners: BTreeMap<WinnerKey, AchievementRecord>,
}

impl AchievementLedger {
    fn add_entry(&mut self, key: WinnerKey, achievement: Achievement) {
        let record = self.winners.entry(key).or_default();
        record.total.add_entry(achievement.points);
        record.entries.push(achievement);
    }

    /// Entries sorted by (programme, position); call order stops mattering.
    fn finalize(&mut self) {
        for record in self.winners.values_mut() {
            record
                .entries
                .sort_by(|a, b| {
                    (a.programme_id.as_str(), a.position).cmp(&(b.programme_id.as_str(), b.position))
                });
        }
    }
}

// ----------------------------- Diagnostics -----------------------------

/// Winner entry whose team could not be resolved. Reported, never guessed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedWinner {
    pub result_id: ResultId,
    pub programme_id: ProgrammeId,
    pub position: Position,
    pub identifier: String,
    pub points: u64,
}

/// Result whose programme reference is dangling; the whole result skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingProgramme {
    pub result_id: ResultId,
    pub programme_id: ProgrammeId,
}

/// Data-quality findings from one aggregation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateDiagnostics {
    pub unresolved: Vec<UnresolvedWinner>,
    pub missing_programmes: Vec<MissingProgramme>,
}

impl AggregateDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.missing_programmes.is_empty()
    }
}

// ----------------------------- Outcome -----------------------------

/// Everything one aggregation run produces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateOutcome {
    pub team_ledger: TeamLedger,
    pub achievements: AchievementLedger,
    pub diagnostics: AggregateDiagnostics,
    /// Results present in the snapshot.
    pub results_seen: u32,
    /// Results that passed the status filter and had a programme.
    pub results_counted: u32,
}

// ----------------------------- Entry point -----------------------------

/// Aggregate all qualifying results into fresh ledgers.
///
/// The status filter is the only thing that distinguishes the public scope
/// from the internal preview scope; both run this exact code path.
pub fn aggregate(view: &SnapshotView<'_>, status_filter: StatusFilter) -> AggregateOutcome {
    let mut outcome = AggregateOutcome::default();

    // Every known team gets a row up front; an empty result set still
    // yields a complete all-zero ledger.
    for code in view.teams.keys() {
        outcome.team_ledger.teams.entry(code.clone()).or_default();
    }

    // Ascending result-id order, regardless of snapshot order.
    let mut ordered: Vec<&ResultDoc> = view.results.iter().collect();
    ordered.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

    for result in ordered {
        outcome.results_seen += 1;
        if !status_filter.admits(result.status) {
            continue;
        }

        let Some(programme) = view.programmes.get(&result.programme_id) else {
            outcome.diagnostics.missing_programmes.push(MissingProgramme {
                result_id: result.id.clone(),
                programme_id: result.programme_id.clone(),
            });
            continue;
        };
        outcome.results_counted += 1;

        // Classified once; shared by every winner entry of this result.
        let classification = classify(programme);
        let bucket = classification.bucket();

        for position in Position::ALL {
            for winner in result.position_list(position) {
                let points =
                    entry_points(programme, position, winner, &view.config.grade_scale);

                outcome.achievements.add_entry(
                    winner_key(winner),
                    Achievement {
                        programme_id: programme.id.clone(),
                        position,
                        grade: winner.grade().map(|g| g.to_string()),
                        points,
                    },
                );

                match resolve_team(winner, view.teams, view.participants, &view.config.decode) {
                    TeamResolution::Resolved(code) => {
                        outcome.team_ledger.add_entry(code, bucket, points);
                    }
                    TeamResolution::NotFound => {
                        outcome.diagnostics.unresolved.push(UnresolvedWinner {
                            result_id: result.id.clone(),
                            programme_id: programme.id.clone(),
                            position,
                            identifier: winner.identifier().to_string(),
                            points,
                        });
                    }
                }
            }
        }
    }

    outcome.achievements.finalize();
    outcome
}

fn winner_key(winner: &WinnerEntry) -> WinnerKey {
    match winner {
        WinnerEntry::Individual { chest_number, .. } => {
            WinnerKey::Participant(chest_number.clone())
        }
        WinnerEntry::Team { team_code, .. } => WinnerKey::Team(team_code.canonicalized()),
    }
}

// === Tests ===
