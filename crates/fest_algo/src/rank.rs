//! Ranking builder: ledger + filter to a sorted, tie-broken list.
//!
//! Tie-break rule, written once: equal points order by ascending team code.
//! Zero-point teams are left out of the produced view but keep their ledger
//! rows, so an arts-only view of a sports-only team renders as absent
//! rather than erroring.

use alloc::vec::Vec;

use fest_core::determinism::cmp_by_points_then_code;
use fest_core::{Category, Section, Subcategory, TeamCode};

use crate::aggregate::{BucketTotals, TeamLedger, TeamTotals};
use crate::classify::BucketKey;

/// Which slice of the ledger a ranking view looks at. All-`None` selects
/// the flat totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RankingFilter {
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,
    pub section: Option<Section>,
}

impl RankingFilter {
    pub const ALL: RankingFilter =
        RankingFilter { category: None, subcategory: None, section: None };

    #[inline]
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.subcategory.is_none() && self.section.is_none()
    }

    /// True when a bucket matches every present field.
    #[inline]
    pub fn matches(&self, key: &BucketKey) -> bool {
        self.category.map_or(true, |c| c == key.category)
            && self.subcategory.map_or(true, |s| s == key.subcategory)
            && self.section.map_or(true, |s| s == key.section)
    }
}

/// Sum of a team's buckets matching the filter. Shared by the ranking
/// builder and the breakdown views so a number can only be computed one way.
pub fn selected_totals(totals: &TeamTotals, filter: &RankingFilter) -> BucketTotals {
    if filter.is_unfiltered() {
        return totals.total;
    }
    let mut out = BucketTotals::default();
    for (key, bucket) in &totals.buckets {
        if filter.matches(key) {
            out.merge(bucket);
        }
    }
    out
}

/// One row of a ranking view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankRow {
    /// 1-based position in the sorted order.
    pub rank: u32,
    pub team_code: TeamCode,
    pub points: u64,
    pub result_count: u32,
}

/// Build the ranking for one filter.
pub fn rank(ledger: &TeamLedger, filter: &RankingFilter) -> Vec<RankRow> {
    let mut rows: Vec<(TeamCode, BucketTotals)> = ledger
        .teams
        .iter()
        .map(|(code, totals)| (code.clone(), selected_totals(totals, filter)))
        .filter(|(_, totals)| totals.points > 0)
        .collect();

    rows.sort_by(|a, b| cmp_by_points_then_code(a.1.points, &a.0, b.1.points, &b.0));

    rows.into_iter()
        .enumerate()
        .map(|(i, (team_code, totals))| RankRow {
            rank: (i + 1) as u32,
            team_code,
            points: totals.points,
            result_count: totals.result_count,
        })
        .collect()
}

// === Tests ===
