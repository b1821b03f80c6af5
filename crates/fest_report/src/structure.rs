//! View models built from ledgers plus registry metadata.
//!
//! Joining names and colors happens here, once; the numbers are taken from
//! the ledgers as-is. A team that scored through the decode chain but has
//! no registry entry renders with its code as its name rather than being
//! dropped.

use std::collections::BTreeMap;

use fest_algo::{
    selected_totals, AchievementLedger, RankRow, RankingFilter, TeamLedger, WinnerKey,
};
use fest_core::{
    Category, ChestNumber, Participant, Programme, ProgrammeId, Subcategory, Team, TeamCode,
};

// ----------------------------- Ranking view -----------------------------

/// One row of the team ranking view, ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingRowView {
    pub rank: u32,
    pub team_code: String,
    pub team_name: String,
    pub color: String,
    pub points: u64,
    pub result_count: u32,
}

/// Join ranking rows with team metadata.
pub fn build_ranking_view(
    rows: &[RankRow],
    teams: &BTreeMap<TeamCode, Team>,
) -> Vec<RankingRowView> {
    rows.iter()
        .map(|row| {
            let meta = teams.get(&row.team_code);
            RankingRowView {
                rank: row.rank,
                team_code: row.team_code.as_str().to_string(),
                team_name: meta
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| row.team_code.as_str().to_string()),
                color: meta.map(|t| t.color.clone()).unwrap_or_default(),
                points: row.points,
                result_count: row.result_count,
            }
        })
        .collect()
}

// ----------------------------- Breakdown view -----------------------------

/// Arts totals split by subcategory. `other` holds arts points whose
/// programme carried no stage split; it is surfaced, never folded into
/// stage or non-stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArtsBreakdown {
    pub stage: u64,
    pub non_stage: u64,
    pub other: u64,
    pub total: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SportsBreakdown {
    pub total: u64,
}

/// Nested per-team totals: `grand_total == arts.total + sports.total`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamBreakdownRow {
    pub team_code: String,
    pub team_name: String,
    pub arts: ArtsBreakdown,
    pub sports: SportsBreakdown,
    pub grand_total: u64,
}

/// Build breakdown rows for every team in the ledger, zero rows included,
/// ordered by team code.
pub fn build_breakdown_view(
    ledger: &TeamLedger,
    teams: &BTreeMap<TeamCode, Team>,
) -> Vec<TeamBreakdownRow> {
    let arts_filter = |subcategory| RankingFilter {
        category: Some(Category::Arts),
        subcategory,
        section: None,
    };

    ledger
        .teams
        .iter()
        .map(|(code, totals)| {
            let stage = selected_totals(totals, &arts_filter(Some(Subcategory::Stage)));
            let non_stage = selected_totals(totals, &arts_filter(Some(Subcategory::NonStage)));
            let other = selected_totals(totals, &arts_filter(Some(Subcategory::NotApplicable)));
            let arts_total = selected_totals(totals, &arts_filter(None));
            let sports = selected_totals(
                totals,
                &RankingFilter { category: Some(Category::Sports), ..RankingFilter::ALL },
            );

            TeamBreakdownRow {
                team_code: code.as_str().to_string(),
                team_name: teams
                    .get(code)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| code.as_str().to_string()),
                arts: ArtsBreakdown {
                    stage: stage.points,
                    non_stage: non_stage.points,
                    other: other.points,
                    total: arts_total.points,
                },
                sports: SportsBreakdown { total: sports.points },
                grand_total: totals.total.points,
            }
        })
        .collect()
}

// ----------------------------- Achievement view -----------------------------

/// One placement line in an achievement view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementEntryView {
    pub programme_id: String,
    pub programme_name: Option<String>,
    pub position: &'static str,
    pub place: u8,
    pub grade: Option<String>,
    pub points: u64,
}

/// Achievements for one identity (participant or team entry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementRowView {
    pub identifier: String,
    pub kind: &'static str,
    /// Display name when the identity is in the registry.
    pub name: Option<String>,
    /// Owning team for registered participants.
    pub team_code: Option<String>,
    pub entries: Vec<AchievementEntryView>,
    pub total_points: u64,
    pub result_count: u32,
}

/// Build achievement rows for every identity in the ledger, joined against
/// the registries for display names.
pub fn build_achievement_view(
    ledger: &AchievementLedger,
    participants: &BTreeMap<ChestNumber, Participant>,
    teams: &BTreeMap<TeamCode, Team>,
    programmes: &BTreeMap<ProgrammeId, Programme>,
) -> Vec<AchievementRowView> {
    ledger
        .winners
        .iter()
        .map(|(key, record)| {
            let (kind, name, team_code) = match key {
                WinnerKey::Participant(chest) => match participants.get(chest) {
                    Some(p) => (
                        "participant",
                        Some(p.name.clone()),
                        Some(p.team_code.as_str().to_string()),
                    ),
                    None => ("participant", None, None),
                },
                WinnerKey::Team(code) => (
                    "team",
                    teams.get(code).map(|t| t.name.clone()),
                    Some(code.as_str().to_string()),
                ),
            };

            let entries = record
                .entries
                .iter()
                .map(|a| AchievementEntryView {
                    programme_id: a.programme_id.as_str().to_string(),
                    programme_name: programmes.get(&a.programme_id).map(|p| p.name.clone()),
                    position: a.position.as_str(),
                    place: a.position.place(),
                    grade: a.grade.clone(),
                    points: a.points,
                })
                .collect();

            AchievementRowView {
                identifier: key.identifier().to_string(),
                kind,
                name,
                team_code,
                entries,
                total_points: record.total.points,
                result_count: record.total.result_count,
            }
        })
        .collect()
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use fest_algo::{aggregate, rank, SnapshotView};
    use fest_core::{
        PositionType, Programme, ResultDoc, ResultStatus, ScoringConfig, Section, StatusFilter,
        WinnerEntry,
    };

    fn code(s: &str) -> TeamCode {
        s.parse().unwrap()
    }

    fn fixture() -> (
        BTreeMap<TeamCode, Team>,
        BTreeMap<ChestNumber, Participant>,
        BTreeMap<ProgrammeId, Programme>,
        Vec<ResultDoc>,
    ) {
        let teams: BTreeMap<TeamCode, Team> = [("SMD", "Sumud", "#d33"), ("JNB", "Janub", "#36c")]
            .into_iter()
            .map(|(c, n, color)| {
                let c = code(c);
                (c.clone(), Team { code: c, name: n.into(), color: color.into() })
            })
            .collect();

        let chest: ChestNumber = "SMD001".parse().unwrap();
        let participants: BTreeMap<ChestNumber, Participant> = [(
            chest.clone(),
            Participant {
                chest_number: chest,
                name: "Asha".into(),
                team_code: code("SMD"),
                section: Section::Senior,
            },
        )]
        .into_iter()
        .collect();

        let mk_programme = |id: &str, category, subcategory| {
            let pid: ProgrammeId = id.parse().unwrap();
            (
                pid.clone(),
                Programme {
                    id: pid,
                    name: format!("Programme {id}"),
                    category,
                    subcategory,
                    section: Section::Senior,
                    position_type: PositionType::Individual,
                    first_points: Some(15),
                    second_points: Some(10),
                    third_points: Some(5),
                },
            )
        };
        let programmes: BTreeMap<ProgrammeId, Programme> = [
            mk_programme("P1", Category::Arts, Subcategory::Stage),
            mk_programme("P2", Category::Arts, Subcategory::NonStage),
            mk_programme("P3", Category::Sports, Subcategory::NotApplicable),
        ]
        .into_iter()
        .collect();

        let mk_result = |id: &str, programme: &str, winner: WinnerEntry| ResultDoc {
            id: id.parse().unwrap(),
            programme_id: programme.parse().unwrap(),
            status: ResultStatus::Published,
            first_place: vec![winner],
            second_place: vec![],
            third_place: vec![],
        };
        let individual = |grade: Option<&str>| WinnerEntry::Individual {
            chest_number: "SMD001".parse().unwrap(),
            grade: grade.map(String::from),
        };
        let results = vec![
            mk_result("R1", "P1", individual(Some("A"))),
            mk_result("R2", "P2", individual(Some("B"))),
            mk_result("R3", "P3", individual(None)),
        ];

        (teams, participants, programmes, results)
    }

    #[test]
    fn breakdown_conserves_totals() {
        let (teams, participants, programmes, results) = fixture();
        let config = ScoringConfig::default();
        let outcome = aggregate(
            &SnapshotView {
                teams: &teams,
                participants: &participants,
                programmes: &programmes,
                results: &results,
                config: &config,
            },
            StatusFilter::Published,
        );

        let rows = build_breakdown_view(&outcome.team_ledger, &teams);
        let smd = rows.iter().find(|r| r.team_code == "SMD").unwrap();
        assert_eq!(smd.arts.stage, 20);
        assert_eq!(smd.arts.non_stage, 13);
        assert_eq!(smd.arts.other, 0);
        assert_eq!(smd.arts.total, 33);
        assert_eq!(smd.sports.total, 15);
        assert_eq!(smd.grand_total, smd.arts.total + smd.sports.total);

        // Zero teams keep a breakdown row.
        let jnb = rows.iter().find(|r| r.team_code == "JNB").unwrap();
        assert_eq!(jnb.grand_total, 0);
    }

    #[test]
    fn ranking_view_joins_team_metadata() {
        let (teams, participants, programmes, results) = fixture();
        let config = ScoringConfig::default();
        let outcome = aggregate(
            &SnapshotView {
                teams: &teams,
                participants: &participants,
                programmes: &programmes,
                results: &results,
                config: &config,
            },
            StatusFilter::Published,
        );
        let rows = rank(&outcome.team_ledger, &RankingFilter::ALL);
        let view = build_ranking_view(&rows, &teams);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].team_name, "Sumud");
        assert_eq!(view[0].color, "#d33");
        assert_eq!(view[0].points, 48);
    }

    #[test]
    fn achievement_view_orders_and_joins() {
        let (teams, participants, programmes, results) = fixture();
        let config = ScoringConfig::default();
        let outcome = aggregate(
            &SnapshotView {
                teams: &teams,
                participants: &participants,
                programmes: &programmes,
                results: &results,
                config: &config,
            },
            StatusFilter::Published,
        );
        let view =
            build_achievement_view(&outcome.achievements, &participants, &teams, &programmes);
        assert_eq!(view.len(), 1);
        let row = &view[0];
        assert_eq!(row.identifier, "SMD001");
        assert_eq!(row.name.as_deref(), Some("Asha"));
        assert_eq!(row.team_code.as_deref(), Some("SMD"));
        assert_eq!(row.total_points, 48);
        assert_eq!(row.result_count, 3);
        let ids: Vec<&str> = row.entries.iter().map(|e| e.programme_id.as_str()).collect();
        assert_eq!(ids, ["P1", "P2", "P3"]);
        assert_eq!(row.entries[0].position, "first");
        assert_eq!(row.entries[0].place, 1);
    }
}
