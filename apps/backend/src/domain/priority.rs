//! Waiver-priority queue snapshot and the standings-based rebuild.
//!
//! Lower rank means higher priority. Ranks need not be contiguous. A snapshot
//! is built from rows read inside the resolving transaction and dropped with
//! it; nothing here is cached between calls.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use super::TeamId;

/// Ranks as read at the moment of resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityQueue {
    ranks: HashMap<TeamId, i32>,
}

impl PriorityQueue {
    pub fn new(rows: impl IntoIterator<Item = (TeamId, i32)>) -> Self {
        Self {
            ranks: rows.into_iter().collect(),
        }
    }

    pub fn rank_of(&self, team_id: TeamId) -> Option<i32> {
        self.ranks.get(&team_id).copied()
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.ranks.contains_key(&team_id)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Rank strictly worse than every current row (`1` for an empty queue).
    pub fn back_rank(&self) -> i32 {
        self.ranks
            .values()
            .copied()
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Teams from best to worst; equal ranks fall back to team id.
    pub fn ordered_teams(&self) -> Vec<TeamId> {
        let mut teams: Vec<(i32, TeamId)> =
            self.ranks.iter().map(|(team, rank)| (*rank, *team)).collect();
        teams.sort_unstable();
        teams.into_iter().map(|(_, team)| team).collect()
    }

    /// Place a team at the back, returning its new rank.
    pub fn rotate_to_back(&mut self, team_id: TeamId) -> i32 {
        let rank = self.back_rank();
        self.ranks.insert(team_id, rank);
        rank
    }
}

/// One team's league record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub points: i32,
    pub wins: i32,
    pub losses: i32,
}

/// Full rebuild of the queue from standings.
///
/// Worst record first: fewest points, then fewest wins, then most losses, then
/// lowest team id. Position `i` gets rank `i + 1`. Teams that hold a priority
/// row but have no standing keep their current relative order behind every
/// ranked team. The result is ordered by rank and depends only on its inputs.
pub fn ranks_from_standings(
    standings: &[StandingRow],
    current: &PriorityQueue,
) -> Vec<(TeamId, i32)> {
    let mut ordered: Vec<StandingRow> = standings.to_vec();
    ordered.sort_by_key(|s| (s.points, s.wins, Reverse(s.losses), s.team_id));

    let ranked: HashSet<TeamId> = ordered.iter().map(|s| s.team_id).collect();
    let trailing = current
        .ordered_teams()
        .into_iter()
        .filter(|team| !ranked.contains(team));

    ordered
        .iter()
        .map(|s| s.team_id)
        .chain(trailing)
        .zip(1..)
        .collect()
}
