use league_backend::config::market::MarketConfig;
use league_backend::domain::Subject;
use league_backend::entities::bids::BidStatus;
use league_backend::entities::waiver_claims::ClaimStatus;
use league_backend::entities::waivers::WaiverStatus;
use league_backend::errors::domain::{ConflictKind, DomainError};
use league_backend::repos::{players, priorities};
use league_backend::services::market::{place_bid, PlaceBid};
use league_backend::services::resolution::{resolve_player_bids, resolve_waiver};
use league_backend::services::waivers::open_waiver;
use league_backend::{AppError, ResolutionError};
use time::OffsetDateTime;

use crate::support::factory::{
    bid, claim, max_rank, minutes_ahead, player, rank_of, seed_bid, seed_claim,
    seed_listed_player, seed_priority, seed_ranked_teams, seed_rostered_player, seed_team,
    seed_waiver, waiver,
};
use crate::support::{build_test_state, db};

#[tokio::test]
async fn waiver_goes_to_best_rank_and_ignores_amount() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let a = seed_team(conn, "A").await;
    let b = seed_team(conn, "B").await;
    seed_priority(conn, owner, 1).await;
    seed_priority(conn, a, 5).await;
    seed_priority(conn, b, 2).await;
    let player_id = seed_rostered_player(conn, owner).await;
    let waiver_id = seed_waiver(conn, player_id, Some(owner), minutes_ahead(30)).await;
    let claim_a = seed_claim(conn, waiver_id, a, Some(10_000)).await;
    let claim_b = seed_claim(conn, waiver_id, b, None).await;

    let outcome = resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc()).await?;

    assert_eq!(outcome.subject, Subject::Waiver(waiver_id));
    assert_eq!(outcome.winner_team_id, b);
    assert_eq!(outcome.winning_id, claim_b);
    assert_eq!(outcome.rejected_ids, vec![claim_a]);
    assert_eq!(claim(conn, claim_b).await.status, ClaimStatus::Claimed);
    assert_eq!(claim(conn, claim_a).await.status, ClaimStatus::Rejected);

    let closed = waiver(conn, waiver_id).await;
    assert_eq!(closed.status, WaiverStatus::Claimed);
    assert_eq!(closed.claimed_by, Some(b));
    assert!(closed.resolved_at.is_some());

    let moved = player(conn, player_id).await;
    assert_eq!(moved.team_id, Some(b));
    assert!(!moved.on_market);

    assert_eq!(rank_of(conn, b).await, 6);
    assert_eq!(outcome.new_priority, Some(6));
    Ok(())
}

#[tokio::test]
async fn resolved_waiver_replays_without_writes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let claimant = seed_team(conn, "Claimant").await;
    seed_priority(conn, claimant, 1).await;
    let player_id = seed_rostered_player(conn, owner).await;
    let waiver_id = seed_waiver(conn, player_id, Some(owner), minutes_ahead(30)).await;
    let claim_id = seed_claim(conn, waiver_id, claimant, None).await;

    resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc()).await?;
    let rank_after_first = rank_of(conn, claimant).await;
    let replay = resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc()).await?;

    assert!(replay.already_resolved);
    assert_eq!(replay.winner_team_id, claimant);
    assert_eq!(replay.winning_id, claim_id);
    assert_eq!(replay.new_priority, None);
    assert_eq!(rank_of(conn, claimant).await, rank_after_first);
    Ok(())
}

#[tokio::test]
async fn lone_claim_from_unranked_team_is_appended_last() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    seed_priority(conn, owner, 4).await;
    let newcomer = seed_team(conn, "Newcomer").await;
    let player_id = seed_rostered_player(conn, owner).await;
    let waiver_id = seed_waiver(conn, player_id, Some(owner), minutes_ahead(30)).await;
    seed_claim(conn, waiver_id, newcomer, None).await;

    let outcome = resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc()).await?;

    assert_eq!(outcome.repaired_teams, vec![newcomer]);
    assert_eq!(priorities::count_by_team(conn, newcomer).await?, 1);
    assert_eq!(rank_of(conn, newcomer).await, 5);
    assert_eq!(max_rank(conn).await, 5);
    Ok(())
}

#[tokio::test]
async fn open_waiver_without_claims_is_an_empty_group() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let player_id = seed_rostered_player(conn, owner).await;
    let waiver_id = seed_waiver(conn, player_id, Some(owner), minutes_ahead(30)).await;

    let err = resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc())
        .await
        .unwrap_err();

    assert_eq!(err, ResolutionError::EmptyGroup(Subject::Waiver(waiver_id)));
    assert_eq!(waiver(conn, waiver_id).await.status, WaiverStatus::Open);
    Ok(())
}

#[tokio::test]
async fn listed_player_cannot_be_put_on_waivers() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let teams = seed_ranked_teams(conn, 2).await;
    let player_id = seed_listed_player(conn, Some(teams[0])).await;
    let req = PlaceBid {
        player_id,
        team_id: teams[1],
        amount: 40,
        expires_at: None,
    };
    place_bid(conn, &MarketConfig::default(), req, OffsetDateTime::now_utc()).await?;

    let err = open_waiver(conn, player_id, minutes_ahead(60)).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::PlayerOnMarket, _)
    ));

    // Delisting alone is not enough while bids are pending.
    players::set_on_market(conn, player_id, false, OffsetDateTime::now_utc()).await?;
    let err = open_waiver(conn, player_id, minutes_ahead(60)).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::PlayerOnMarket, _)
    ));
    Ok(())
}

#[tokio::test]
async fn bids_are_refused_while_player_is_on_waivers() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let bidder = seed_team(conn, "Bidder").await;
    let player_id = seed_rostered_player(conn, owner).await;
    open_waiver(conn, player_id, minutes_ahead(60)).await?;
    players::set_on_market(conn, player_id, true, OffsetDateTime::now_utc()).await?;

    let req = PlaceBid {
        player_id,
        team_id: bidder,
        amount: 40,
        expires_at: None,
    };
    let err = place_bid(conn, &MarketConfig::default(), req, OffsetDateTime::now_utc())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::PlayerOnWaivers, _)
    ));
    Ok(())
}

// Rows written straight to the store, as they could exist from before the
// market and waiver paths excluded each other.
async fn seed_listed_player_with_bid_and_waiver(
    conn: &sea_orm::DatabaseConnection,
) -> (i64, i64, i64, i64, i64) {
    let teams = seed_ranked_teams(conn, 3).await;
    let (owner, bidder, claimant) = (teams[0], teams[1], teams[2]);
    let player_id = seed_listed_player(conn, Some(owner)).await;
    let bid_id = seed_bid(conn, player_id, bidder, 50, 10, minutes_ahead(30)).await;
    let waiver_id = seed_waiver(conn, player_id, Some(owner), minutes_ahead(30)).await;
    let claim_id = seed_claim(conn, waiver_id, claimant, None).await;
    (player_id, bidder, bid_id, waiver_id, claim_id)
}

#[tokio::test]
async fn waiver_cannot_take_a_player_already_sold_by_bid() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let (player_id, bidder, bid_id, waiver_id, claim_id) =
        seed_listed_player_with_bid_and_waiver(conn).await;

    let sold = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;
    assert_eq!(sold.winner_team_id, bidder);
    let rotated = rank_of(conn, bidder).await;

    let err = resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ResolutionError::ConcurrentResolutionConflict(Subject::Waiver(waiver_id))
    );

    assert_eq!(player(conn, player_id).await.team_id, Some(bidder));
    assert_eq!(bid(conn, bid_id).await.status, BidStatus::Approved);
    assert_eq!(claim(conn, claim_id).await.status, ClaimStatus::Pending);
    assert_eq!(waiver(conn, waiver_id).await.status, WaiverStatus::Open);
    assert_eq!(rank_of(conn, bidder).await, rotated);
    assert_eq!(max_rank(conn).await, rotated);
    Ok(())
}

#[tokio::test]
async fn waiver_on_a_listed_player_leaves_bids_resolvable() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let (player_id, bidder, bid_id, waiver_id, claim_id) =
        seed_listed_player_with_bid_and_waiver(conn).await;

    let err = resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ResolutionError::ConcurrentResolutionConflict(Subject::Waiver(waiver_id))
    );
    assert_eq!(claim(conn, claim_id).await.status, ClaimStatus::Pending);
    assert!(player(conn, player_id).await.on_market);

    let sold = resolve_player_bids(conn, player_id, OffsetDateTime::now_utc()).await?;
    assert_eq!(sold.winner_team_id, bidder);
    assert_eq!(bid(conn, bid_id).await.status, BidStatus::Approved);
    assert_eq!(player(conn, player_id).await.team_id, Some(bidder));
    Ok(())
}

#[tokio::test]
async fn waiver_cannot_take_a_player_traded_away() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let elsewhere = seed_team(conn, "Elsewhere").await;
    let claimant = seed_team(conn, "Claimant").await;
    seed_priority(conn, claimant, 1).await;
    let player_id = seed_rostered_player(conn, owner).await;
    let waiver_id = seed_waiver(conn, player_id, Some(owner), minutes_ahead(30)).await;
    seed_claim(conn, waiver_id, claimant, None).await;
    let other_waiver = seed_waiver(conn, player_id, Some(owner), minutes_ahead(30)).await;
    seed_claim(conn, other_waiver, elsewhere, None).await;

    resolve_waiver(conn, other_waiver, OffsetDateTime::now_utc()).await?;
    assert_eq!(player(conn, player_id).await.team_id, Some(elsewhere));

    let err = resolve_waiver(conn, waiver_id, OffsetDateTime::now_utc())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::ConcurrentResolutionConflict(_)));
    assert_eq!(player(conn, player_id).await.team_id, Some(elsewhere));
    assert_eq!(rank_of(conn, claimant).await, 1);
    Ok(())
}
