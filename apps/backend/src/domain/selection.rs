//! Winner selection for one bid group or one waiver claim group.
//!
//! Both functions are pure: they take the pending rows and the priority
//! snapshot read in the same transaction and return the winning row.

use std::cmp::Ordering;

use time::OffsetDateTime;

use super::priority::PriorityQueue;
use super::TeamId;

/// A pending monetary bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub id: i64,
    pub team_id: TeamId,
    pub amount: i64,
    pub created_at: OffsetDateTime,
}

/// A pending waiver claim. Any amount the claim carried is not part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub id: i64,
    pub team_id: TeamId,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    EmptyGroup,
    NoPriorityRecord { team_id: TeamId },
}

/// Highest amount wins. Ranks are only consulted when the top amount is
/// shared; then lowest rank, earliest bid, lowest id.
pub fn select_bid_winner<'a>(
    offers: &'a [Offer],
    queue: &PriorityQueue,
) -> Result<&'a Offer, SelectionError> {
    let top = offers
        .iter()
        .map(|o| o.amount)
        .max()
        .ok_or(SelectionError::EmptyGroup)?;

    let mut tied: Vec<&Offer> = offers.iter().filter(|o| o.amount == top).collect();
    if let [only] = tied.as_slice() {
        return Ok(*only);
    }

    tied.sort_by_key(|o| o.team_id);
    let ranked = with_ranks(tied, |o| o.team_id, queue)?;
    ranked
        .into_iter()
        .min_by(|(a, ra), (b, rb)| {
            ra.cmp(rb)
                .then_with(|| earliest_then_lowest(a.created_at, a.id, b.created_at, b.id))
        })
        .map(|(o, _)| o)
        .ok_or(SelectionError::EmptyGroup)
}

/// Lowest rank wins; then earliest claim, lowest id.
///
/// A lone claim wins without a rank lookup.
pub fn select_claim_winner<'a>(
    claims: &'a [Claim],
    queue: &PriorityQueue,
) -> Result<&'a Claim, SelectionError> {
    match claims {
        [] => Err(SelectionError::EmptyGroup),
        [only] => Ok(only),
        _ => {
            let mut sorted: Vec<&Claim> = claims.iter().collect();
            sorted.sort_by_key(|c| c.team_id);
            let ranked = with_ranks(sorted, |c| c.team_id, queue)?;
            ranked
                .into_iter()
                .min_by(|(a, ra), (b, rb)| {
                    ra.cmp(rb).then_with(|| {
                        earliest_then_lowest(a.created_at, a.id, b.created_at, b.id)
                    })
                })
                .map(|(c, _)| c)
                .ok_or(SelectionError::EmptyGroup)
        }
    }
}

/// Attach ranks, failing on the lowest team id without one.
fn with_ranks<'a, T>(
    rows: Vec<&'a T>,
    team_of: impl Fn(&T) -> TeamId,
    queue: &PriorityQueue,
) -> Result<Vec<(&'a T, i32)>, SelectionError> {
    rows.into_iter()
        .map(|row| {
            let team_id = team_of(row);
            queue
                .rank_of(team_id)
                .map(|rank| (row, rank))
                .ok_or(SelectionError::NoPriorityRecord { team_id })
        })
        .collect()
}

fn earliest_then_lowest(
    a_at: OffsetDateTime,
    a_id: i64,
    b_at: OffsetDateTime,
    b_id: i64,
) -> Ordering {
    a_at.cmp(&b_at).then(a_id.cmp(&b_id))
}
