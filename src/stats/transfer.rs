//! Squad-change adjustment of a team record.
//!
//! A signing or a departure scales a team's wins and draws by a flat impact
//! factor. The default impacts are rough rules of thumb, not fitted values.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EntityRecord;

/// Default impact of a key player joining.
pub const JOINING_IMPACT: f64 = 0.3;
/// Default impact of a key player leaving.
pub const LEAVING_IMPACT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "impact", rename_all = "snake_case")]
pub enum Transfer {
    /// Player joins: results scale by `1 + impact`
    Joining(f64),
    /// Player leaves: results scale by `1 − impact`
    Leaving(f64),
}

impl Transfer {
    pub fn impact(&self) -> f64 {
        match self {
            Transfer::Joining(i) | Transfer::Leaving(i) => *i,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Transfer::Joining(i) => 1.0 + i,
            Transfer::Leaving(i) => 1.0 - i,
        }
    }
}

/// Return a new record with wins and draws scaled by the transfer factor.
///
/// Scaled counts are rounded and floored at zero; matches played is floored at
/// one. Wins are capped at matches played and draws at the remaining matches so
/// the adjusted record still satisfies `wins + draws ≤ matches_played`.
pub fn adjust_for_transfer(record: &EntityRecord, transfer: Transfer) -> EntityRecord {
    let factor = transfer.factor();
    let scale = |n: u32| -> u32 {
        let v = (n as f64 * factor).round();
        if v.is_finite() && v > 0.0 {
            v.min(u32::MAX as f64) as u32
        } else {
            0
        }
    };

    let matches_played = record.matches_played.max(1);
    let wins = scale(record.wins).min(matches_played);
    let draws = scale(record.draws).min(matches_played - wins);

    let adjusted = EntityRecord {
        matches_played,
        wins,
        draws,
        ..*record
    };
    debug!(?transfer, before = ?record, after = ?adjusted, "applied transfer adjustment");
    adjusted
}
