//! Property tests for winner selection (pure domain, no DB).

use std::collections::HashSet;

use proptest::prelude::*;

use super::priority::PriorityQueue;
use super::selection::{select_bid_winner, select_claim_winner, Claim, Offer};
use super::test_prelude::{at, proptest_config};

/// Offers from distinct teams, every team ranked with a distinct rank.
fn ranked_offers() -> impl Strategy<Value = (Vec<Offer>, PriorityQueue)> {
    prop::collection::vec((1i64..=5, 0i64..120), 1..8).prop_flat_map(|rows| {
        let n = rows.len();
        (Just(rows), Just((1..=n as i32).collect::<Vec<_>>()).prop_shuffle())
    })
    .prop_map(|(rows, ranks)| {
        let offers: Vec<Offer> = rows
            .iter()
            .enumerate()
            .map(|(i, (amount, minute))| Offer {
                id: i as i64 + 1,
                team_id: 100 + i as i64,
                amount: *amount * 50,
                created_at: at(*minute),
            })
            .collect();
        let queue = PriorityQueue::new(
            offers
                .iter()
                .zip(ranks.iter())
                .map(|(o, rank)| (o.team_id, *rank)),
        );
        (offers, queue)
    })
}

proptest! {
    #![proptest_config(proptest_config())]

    /// The winner always carries the top amount.
    #[test]
    fn prop_winner_has_highest_amount((offers, queue) in ranked_offers()) {
        let winner = select_bid_winner(&offers, &queue).unwrap();
        let top = offers.iter().map(|o| o.amount).max().unwrap();
        prop_assert_eq!(winner.amount, top);
    }

    /// Among offers at the top amount, the winner holds the best rank.
    #[test]
    fn prop_ties_go_to_best_rank((offers, queue) in ranked_offers()) {
        let winner = select_bid_winner(&offers, &queue).unwrap();
        let winner_rank = queue.rank_of(winner.team_id).unwrap();
        for o in offers.iter().filter(|o| o.amount == winner.amount) {
            prop_assert!(winner_rank <= queue.rank_of(o.team_id).unwrap());
        }
    }

    /// Input order never changes the result.
    #[test]
    fn prop_order_independent((offers, queue) in ranked_offers()) {
        let first = select_bid_winner(&offers, &queue).unwrap().id;
        let mut reversed = offers.clone();
        reversed.reverse();
        let second = select_bid_winner(&reversed, &queue).unwrap().id;
        prop_assert_eq!(first, second);
    }

    /// Claim amounts play no part: the best-ranked claimant wins.
    #[test]
    fn prop_claims_follow_rank_only((offers, queue) in ranked_offers()) {
        let claims: Vec<Claim> = offers
            .iter()
            .map(|o| Claim { id: o.id, team_id: o.team_id, created_at: o.created_at })
            .collect();
        let winner = select_claim_winner(&claims, &queue).unwrap();
        let best = claims
            .iter()
            .map(|c| queue.rank_of(c.team_id).unwrap())
            .min()
            .unwrap();
        prop_assert_eq!(queue.rank_of(winner.team_id).unwrap(), best);
        let teams: HashSet<i64> = claims.iter().map(|c| c.team_id).collect();
        prop_assert!(teams.contains(&winner.team_id));
    }
}
