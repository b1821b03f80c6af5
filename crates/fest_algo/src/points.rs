//! Point calculation for one winner entry.
//!
//! Total = configured base points for the position + grade bonus. The grade
//! bonus applies to arts programmes only; this is the single place that rule
//! is checked. Missing point configuration scores zero, never errors.

use fest_core::{Category, GradeScale, Position, Programme, WinnerEntry};

/// Points contributed by one winner entry at one position.
///
/// A grade on a sports entry is ignored, not rejected; grade letters left
/// over from data entry must not distort sports totals or abort a run.
pub fn entry_points(
    programme: &Programme,
    position: Position,
    winner: &WinnerEntry,
    scale: &GradeScale,
) -> u64 {
    let base = programme.points_for(position).unwrap_or(0) as u64;
    let bonus = match programme.category {
        Category::Arts => scale.bonus_for(winner.grade()) as u64,
        Category::Sports => 0,
    };
    base + bonus
}

// === Tests ===
