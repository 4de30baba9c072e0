use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// The group a single resolution call decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
    /// All bids placed on one player listed on the open market.
    PlayerBids(i64),
    /// All claims on one waiver.
    Waiver(i64),
}

impl Subject {
    pub fn id(&self) -> i64 {
        match self {
            Subject::PlayerBids(id) | Subject::Waiver(id) => *id,
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Subject::PlayerBids(id) => write!(f, "player {id} bids"),
            Subject::Waiver(id) => write!(f, "waiver {id}"),
        }
    }
}
