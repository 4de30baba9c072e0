use league_backend::domain::Subject;
use league_backend::entities::bids::BidStatus;
use league_backend::errors::domain::{DomainError, NotFoundKind};
use league_backend::repos::{players, priorities};
use league_backend::services::resolution::resolve_player_bids;
use league_backend::{AppError, ResolutionError};
use time::OffsetDateTime;

use crate::support::factory::{
    bid, max_rank, minutes_ahead, player, rank_of, seed_bid, seed_listed_player,
    seed_ranked_teams, seed_team,
};
use crate::support::{build_test_state, db};

#[tokio::test]
async fn highest_amount_wins_regardless_of_priority() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 2).await;
    let (a, b) = (teams[0], teams[1]);
    let player_id = seed_listed_player(conn, None).await;
    let bid_a = seed_bid(conn, player_id, a, 100, 10, minutes_ahead(60)).await;
    let bid_b = seed_bid(conn, player_id, b, 150, 5, minutes_ahead(60)).await;

    let outcome = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;

    assert_eq!(outcome.subject, Subject::PlayerBids(player_id));
    assert_eq!(outcome.winner_team_id, b);
    assert_eq!(outcome.winning_id, bid_b);
    assert_eq!(outcome.rejected_ids, vec![bid_a]);
    assert!(!outcome.already_resolved);
    assert_eq!(bid(conn, bid_b).await.status, BidStatus::Approved);
    assert_eq!(bid(conn, bid_a).await.status, BidStatus::Rejected);
    assert!(bid(conn, bid_a).await.resolved_at.is_some());

    let moved = player(conn, player_id).await;
    assert_eq!(moved.team_id, Some(b));
    assert!(!moved.on_market);
    Ok(())
}

#[tokio::test]
async fn tie_on_amount_goes_to_better_rank() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 3).await;
    let (best, worst) = (teams[0], teams[2]);
    let player_id = seed_listed_player(conn, None).await;
    // The worse-ranked team bid first; rank still decides.
    seed_bid(conn, player_id, worst, 100, 30, minutes_ahead(60)).await;
    let winning = seed_bid(conn, player_id, best, 100, 1, minutes_ahead(60)).await;

    let outcome = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;

    assert_eq!(outcome.winner_team_id, best);
    assert_eq!(outcome.winning_id, winning);
    Ok(())
}

#[tokio::test]
async fn winner_rotates_behind_every_other_team() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 4).await;
    let player_id = seed_listed_player(conn, None).await;
    seed_bid(conn, player_id, teams[0], 500, 1, minutes_ahead(60)).await;

    let outcome = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;

    let new_rank = rank_of(conn, teams[0]).await;
    assert_eq!(outcome.new_priority, Some(new_rank));
    for other in &teams[1..] {
        assert!(new_rank > rank_of(conn, *other).await);
    }
    let row = priorities::find_by_team(conn, teams[0]).await?.expect("row");
    assert!(row.last_used_at.is_some());
    Ok(())
}

#[tokio::test]
async fn exactly_one_bid_is_approved() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 5).await;
    let player_id = seed_listed_player(conn, None).await;
    let mut ids = Vec::new();
    for (i, team) in teams.iter().enumerate() {
        let amount = 100 + (i as i64 % 2) * 50;
        ids.push(seed_bid(conn, player_id, *team, amount, 10 - i as i64, minutes_ahead(60)).await);
    }

    resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;

    let mut approved = 0;
    let mut rejected = 0;
    for id in ids {
        match bid(conn, id).await.status {
            BidStatus::Approved => approved += 1,
            BidStatus::Rejected => rejected += 1,
            BidStatus::Pending => panic!("bid {id} left pending"),
        }
    }
    assert_eq!((approved, rejected), (1, 4));
    Ok(())
}

#[tokio::test]
async fn resolving_twice_returns_the_recorded_winner() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 2).await;
    let player_id = seed_listed_player(conn, None).await;
    let loser = seed_bid(conn, player_id, teams[0], 100, 5, minutes_ahead(60)).await;
    let winner = seed_bid(conn, player_id, teams[1], 200, 5, minutes_ahead(60)).await;

    let first = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;
    let ranks_after_first = (rank_of(conn, teams[0]).await, rank_of(conn, teams[1]).await);

    let second = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;

    assert!(second.already_resolved);
    assert_eq!(second.winner_team_id, first.winner_team_id);
    assert_eq!(second.winning_id, winner);
    assert!(second.rejected_ids.is_empty());
    assert_eq!(bid(conn, winner).await.status, BidStatus::Approved);
    assert_eq!(bid(conn, loser).await.status, BidStatus::Rejected);
    assert_eq!(
        (rank_of(conn, teams[0]).await, rank_of(conn, teams[1]).await),
        ranks_after_first
    );
    Ok(())
}

#[tokio::test]
async fn concurrent_resolutions_pick_one_winner() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 3).await;
    let player_id = seed_listed_player(conn, None).await;
    for team in &teams {
        seed_bid(conn, player_id, *team, 250, 5, minutes_ahead(60)).await;
    }

    let now = OffsetDateTime::now_utc();
    let (left, right) = tokio::join!(
        resolve_player_bids(conn, player_id, now),
        resolve_player_bids(conn, player_id, now)
    );
    let (left, right) = (left?, right?);

    assert_eq!(left.winner_team_id, right.winner_team_id);
    assert_eq!(left.winning_id, right.winning_id);
    assert!(left.already_resolved != right.already_resolved);
    assert_eq!(left.winner_team_id, teams[0]);
    Ok(())
}

#[tokio::test]
async fn missing_priority_in_a_tie_is_repaired_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let ranked = seed_ranked_teams(conn, 2).await;
    let newcomer = seed_team(conn, "Expansion").await;
    let player_id = seed_listed_player(conn, None).await;
    seed_bid(conn, player_id, ranked[1], 300, 5, minutes_ahead(60)).await;
    seed_bid(conn, player_id, newcomer, 300, 5, minutes_ahead(60)).await;

    let outcome = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;

    // The newcomer was appended behind rank 2, so the ranked team wins the tie.
    assert_eq!(outcome.winner_team_id, ranked[1]);
    assert_eq!(outcome.repaired_teams, vec![newcomer]);
    assert_eq!(priorities::count_by_team(conn, newcomer).await?, 1);
    assert_eq!(rank_of(conn, ranked[1]).await, max_rank(conn).await);
    Ok(())
}

#[tokio::test]
async fn unranked_winner_gets_exactly_one_row_ranked_last() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    seed_ranked_teams(conn, 3).await;
    let newcomer = seed_team(conn, "Expansion").await;

    for _ in 0..2 {
        let player_id = seed_listed_player(conn, None).await;
        seed_bid(conn, player_id, newcomer, 75, 5, minutes_ahead(60)).await;
        resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;

        assert_eq!(priorities::count_by_team(conn, newcomer).await?, 1);
        assert_eq!(rank_of(conn, newcomer).await, max_rank(conn).await);
    }
    Ok(())
}

#[tokio::test]
async fn listed_player_without_bids_is_an_empty_group() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let player_id = seed_listed_player(conn, None).await;

    let err = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc())
        .await
        .unwrap_err();

    assert_eq!(err, ResolutionError::EmptyGroup(Subject::PlayerBids(player_id)));
    Ok(())
}

#[tokio::test]
async fn unknown_player_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = resolve_player_bids(db(&state), 9_999, OffsetDateTime::now_utc())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ResolutionError::Domain(DomainError::NotFound(NotFoundKind::Player, _))
    ));
    Ok(())
}

#[tokio::test]
async fn delisted_player_reports_conflict_and_writes_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 2).await;
    let player_id = seed_listed_player(conn, None).await;
    let pending = seed_bid(conn, player_id, teams[0], 100, 5, minutes_ahead(60)).await;
    players::set_on_market(conn, player_id, false, OffsetDateTime::now_utc()).await?;

    let err = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ResolutionError::ConcurrentResolutionConflict(Subject::PlayerBids(player_id))
    );
    assert_eq!(bid(conn, pending).await.status, BidStatus::Pending);
    assert_eq!(rank_of(conn, teams[0]).await, 1);
    assert_eq!(player(conn, player_id).await.team_id, None);
    Ok(())
}
