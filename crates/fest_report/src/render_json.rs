//! JSON renderers for the three views.
//!
//! Key order is fixed by insertion order (`preserve_order`), so rendered
//! artifacts are byte-stable for equal inputs once written through the
//! canonical writer or compared structurally.

use serde_json::{Map as JsonMap, Number, Value};

use crate::structure::{AchievementRowView, RankingRowView, TeamBreakdownRow};

fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}

fn num_u64(n: u64) -> Value {
    Value::Number(Number::from(n))
}

/// `{"rows": [{rank, teamCode, teamName, color, points, resultCount}]}`
pub fn ranking_view_json(rows: &[RankingRowView]) -> Value {
    let mut root = obj();
    let rendered: Vec<Value> = rows
        .iter()
        .map(|r| {
            let mut o = obj();
            o.insert("rank".into(), num_u64(r.rank as u64));
            o.insert("teamCode".into(), Value::String(r.team_code.clone()));
            o.insert("teamName".into(), Value::String(r.team_name.clone()));
            o.insert("color".into(), Value::String(r.color.clone()));
            o.insert("points".into(), num_u64(r.points));
            o.insert("resultCount".into(), num_u64(r.result_count as u64));
            Value::Object(o)
        })
        .collect();
    root.insert("rows".into(), Value::Array(rendered));
    Value::Object(root)
}

/// `{"teams": [{teamCode, teamName, arts: {stage, nonStage, other, total},
/// sports: {total}, grandTotal}]}`
pub fn breakdown_view_json(rows: &[TeamBreakdownRow]) -> Value {
    let mut root = obj();
    let rendered: Vec<Value> = rows
        .iter()
        .map(|r| {
            let mut arts = obj();
            arts.insert("stage".into(), num_u64(r.arts.stage));
            arts.insert("nonStage".into(), num_u64(r.arts.non_stage));
            arts.insert("other".into(), num_u64(r.arts.other));
            arts.insert("total".into(), num_u64(r.arts.total));

            let mut sports = obj();
            sports.insert("total".into(), num_u64(r.sports.total));

            let mut o = obj();
            o.insert("teamCode".into(), Value::String(r.team_code.clone()));
            o.insert("teamName".into(), Value::String(r.team_name.clone()));
            o.insert("arts".into(), Value::Object(arts));
            o.insert("sports".into(), Value::Object(sports));
            o.insert("grandTotal".into(), num_u64(r.grand_total));
            Value::Object(o)
        })
        .collect();
    root.insert("teams".into(), Value::Array(rendered));
    Value::Object(root)
}

/// `{"winners": [{identifier, kind, name?, teamCode?, achievements: [...],
/// totalPoints, resultCount}]}`
pub fn achievement_view_json(rows: &[AchievementRowView]) -> Value {
    let mut root = obj();
    let rendered: Vec<Value> = rows
        .iter()
        .map(|r| {
            let entries: Vec<Value> = r
                .entries
                .iter()
                .map(|e| {
                    let mut o = obj();
                    o.insert("programmeId".into(), Value::String(e.programme_id.clone()));
                    if let Some(name) = &e.programme_name {
                        o.insert("programmeName".into(), Value::String(name.clone()));
                    }
                    o.insert("position".into(), Value::String(e.position.to_string()));
                    o.insert("place".into(), num_u64(e.place as u64));
                    if let Some(grade) = &e.grade {
                        o.insert("grade".into(), Value::String(grade.clone()));
                    }
                    o.insert("points".into(), num_u64(e.points));
                    Value::Object(o)
                })
                .collect();

            let mut o = obj();
            o.insert("identifier".into(), Value::String(r.identifier.clone()));
            o.insert("kind".into(), Value::String(r.kind.to_string()));
            if let Some(name) = &r.name {
                o.insert("name".into(), Value::String(name.clone()));
            }
            if let Some(code) = &r.team_code {
                o.insert("teamCode".into(), Value::String(code.clone()));
            }
            o.insert("achievements".into(), Value::Array(entries));
            o.insert("totalPoints".into(), num_u64(r.total_points));
            o.insert("resultCount".into(), num_u64(r.result_count as u64));
            Value::Object(o)
        })
        .collect();
    root.insert("winners".into(), Value::Array(rendered));
    Value::Object(root)
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{ArtsBreakdown, SportsBreakdown};

    #[test]
    fn ranking_json_shape() {
        let rows = vec![RankingRowView {
            rank: 1,
            team_code: "SMD".into(),
            team_name: "Sumud".into(),
            color: "#d33".into(),
            points: 20,
            result_count: 1,
        }];
        let v = ranking_view_json(&rows);
        assert_eq!(v["rows"][0]["teamCode"], "SMD");
        assert_eq!(v["rows"][0]["points"], 20);
        assert_eq!(v["rows"][0]["resultCount"], 1);
        // Insertion order is the contract.
        let keys: Vec<&String> = v["rows"][0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["rank", "teamCode", "teamName", "color", "points", "resultCount"]);
    }

    #[test]
    fn breakdown_json_nests_totals() {
        let rows = vec![TeamBreakdownRow {
            team_code: "SMD".into(),
            team_name: "Sumud".into(),
            arts: ArtsBreakdown { stage: 20, non_stage: 13, other: 0, total: 33 },
            sports: SportsBreakdown { total: 15 },
            grand_total: 48,
        }];
        let v = breakdown_view_json(&rows);
        assert_eq!(v["teams"][0]["arts"]["nonStage"], 13);
        assert_eq!(v["teams"][0]["grandTotal"], 48);
    }

    #[test]
    fn achievement_json_omits_absent_fields() {
        let rows = vec![AchievementRowView {
            identifier: "ZZZ999".into(),
            kind: "participant",
            name: None,
            team_code: None,
            entries: vec![],
            total_points: 0,
            result_count: 0,
        }];
        let v = achievement_view_json(&rows);
        let o = v["winners"][0].as_object().unwrap();
        assert!(!o.contains_key("name"));
        assert!(!o.contains_key("teamCode"));
    }
}
