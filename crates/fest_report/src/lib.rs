//! fest_report - pure offline view models and renderers.
//!
//! Rules:
//! - No I/O here. Callers supply ledgers and registry maps already in
//!   memory; writing files is the host's concern.
//! - Stable section order and field names; build with `serde_json`'s
//!   `preserve_order` feature, since the JSON renderer relies on the
//!   insertion order of `serde_json::Map`.
//! - View structs carry display strings (names, colors) joined from the
//!   registry; all numbers come from the ledgers untouched.

#![forbid(unsafe_code)]

pub mod structure;
pub mod render_json;

pub use render_json::{achievement_view_json, breakdown_view_json, ranking_view_json};
pub use structure::{
    build_achievement_view, build_breakdown_view, build_ranking_view, AchievementEntryView,
    AchievementRowView, ArtsBreakdown, RankingRowView, SportsBreakdown, TeamBreakdownRow,
};
