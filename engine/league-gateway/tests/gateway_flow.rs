//! End-to-end flows through the gateway contracts: scoring, engineer
//! derivation, lineup finalization, auctions and clause buy-outs.

use account_ledger::Funds;
use chrono::{Duration, Utc};
use competitor_registry::{Competitor, Role};
use league_gateway::{
    BidRequest, BuyoutRequest, CloseAuctionRequest, EngineerPointsRequest,
    ExpectedPositionsRequest, GatewayConfig, GrantCompetitorRequest, LeadingBidRequest,
    LeagueGateway, LineupAction, LineupPointsRequest, SessionResultRequest, UpgradeClauseRequest,
};
use serde_json::json;
use steward::TeammateComparison;
use transfer_market::{AuctionKey, MarketConfig};

const LEAGUE: u64 = 5;
const MARKET_LEAGUE: u64 = 9;
const GP: u32 = 7;

fn pilot(id: u32, team: u32, market_value: i64) -> Competitor {
    Competitor {
        id,
        name: format!("pilot {id}"),
        role: Role::Pilot,
        team,
        market_value: Funds::from_cents(market_value),
        linked_pilot: None,
    }
}

fn engineer(id: u32, team: u32, pilot: u32) -> Competitor {
    Competitor {
        id,
        name: format!("engineer {id}"),
        role: Role::TrackEngineer,
        team,
        market_value: Funds::from_cents(500),
        linked_pilot: Some(pilot),
    }
}

async fn seeded_gateway() -> LeagueGateway {
    let config = GatewayConfig {
        market: MarketConfig {
            auction_duration_hours: 48,
            protection_window_days: 0,
            ..Default::default()
        },
        default_opening_balance: Funds::from_cents(100_000),
        ..Default::default()
    };
    let gateway = LeagueGateway::new(config);

    let registry = gateway.registry();
    registry.register(pilot(44, 1, 1000)).unwrap();
    registry.register(pilot(63, 1, 1500)).unwrap();
    registry.register(pilot(16, 2, 2000)).unwrap();
    registry.register(pilot(55, 2, 1800)).unwrap();
    registry.register(engineer(440, 1, 44)).unwrap();
    registry.register(engineer(630, 1, 63)).unwrap();

    for league in [LEAGUE, MARKET_LEAGUE] {
        for participant in [100, 200, 300] {
            gateway.open_account(league, participant).await;
        }
    }
    gateway
}

fn race_expectations() -> ExpectedPositionsRequest {
    ExpectedPositionsRequest {
        grand_prix: GP,
        session_kind: "race".to_string(),
        positions: serde_json::from_value(json!([
            {"competitor_id": 44, "expected_position": 5},
            {"competitor_id": 63, "expected_position": 4},
            {"competitor_id": 16, "expected_position": 3},
        ]))
        .unwrap(),
    }
}

#[tokio::test]
async fn scoring_and_lineup_flow() {
    let gateway = seeded_gateway().await;
    let response = gateway.set_expected_positions(race_expectations()).await.unwrap();
    assert_eq!(response.accepted, 3);

    // Loosely-typed bonus flags straight off the wire.
    let request: SessionResultRequest = serde_json::from_value(json!({
        "grand_prix": GP,
        "session_kind": "race",
        "competitor_id": 44,
        "finish_position": 2,
        "bonuses": {"positions_gained_at_start": 2, "fastest_lap": "true"}
    }))
    .unwrap();
    let scored = gateway.submit_session_result(request).await.unwrap();
    assert!(!scored.insufficient_data);
    assert_eq!(scored.breakdown.delta_points, 3);
    assert_eq!(scored.breakdown.bonus_points, 11);
    assert_eq!(scored.total_points, 17);

    // Numbers survive the trip back out as plain JSON integers.
    let wire = serde_json::to_value(&scored).unwrap();
    assert_eq!(wire["total_points"], json!(17));

    let teammate = SessionResultRequest {
        grand_prix: GP,
        session_kind: "race".to_string(),
        competitor_id: 63,
        finish_position: 8,
        bonuses: Default::default(),
    };
    assert_eq!(gateway.submit_session_result(teammate).await.unwrap().total_points, -4);

    // No prediction recorded for 55: stored, reported, never defaulted.
    let unpredicted = SessionResultRequest {
        grand_prix: GP,
        session_kind: "race".to_string(),
        competitor_id: 55,
        finish_position: 1,
        bonuses: Default::default(),
    };
    let outcome = gateway.submit_session_result(unpredicted).await.unwrap();
    assert!(outcome.insufficient_data);
    assert_eq!(outcome.total_points, 0);

    // Engineer derivation: both sides of the garage, opposite flags.
    let derived = gateway
        .calculate_track_engineer_points(EngineerPointsRequest {
            grand_prix: GP,
            session_kind: "race".to_string(),
            pilot_id: 44,
            teammate_comparison: "ahead".to_string(),
        })
        .await
        .unwrap()
        .derived;
    assert_eq!(derived.len(), 2);
    assert_eq!(derived[0].engineer_id, 440);
    assert_eq!(derived[0].points, 9); // round(17 * 0.5)
    assert_eq!(derived[0].comparison, TeammateComparison::Ahead);
    assert_eq!(derived[1].engineer_id, 630);
    assert_eq!(derived[1].points, 1); // round(|-4| * 0.2)
    assert_eq!(derived[1].comparison, TeammateComparison::Behind);

    // Hand the pilots to their owners, then finalize the weekend.
    for (competitor_id, owner_id, price) in [(44, 100, 1000i64), (63, 200, 1500), (16, 300, 2000)] {
        gateway
            .grant_competitor(GrantCompetitorRequest {
                competitor_id,
                league_id: LEAGUE,
                owner_id,
                price: Funds::from_cents(price),
            })
            .await
            .unwrap();
    }

    let request = LineupPointsRequest { league_id: LEAGUE, grand_prix: GP };
    let first = gateway.lineup_points(LineupAction::Update, request.clone()).await.unwrap();
    // 16 has a prediction but no result, so only two entries apply.
    assert_eq!(first.count, 2);
    assert_eq!(first.already_calculated_count, 0);

    let second = gateway.lineup_points(LineupAction::Update, request.clone()).await.unwrap();
    assert_eq!(second.count, 0);
    assert!(second.already_calculated_count > 0);

    let standings = gateway.standings(LEAGUE).await.standings;
    assert_eq!(standings.len(), 2);
    assert_eq!((standings[0].participant_id, standings[0].total_points), (100, 17));
    assert_eq!((standings[1].participant_id, standings[1].total_points), (200, -4));

    // Results are frozen once the grand prix is finalized.
    let frozen = gateway
        .submit_session_result(SessionResultRequest {
            grand_prix: GP,
            session_kind: "race".to_string(),
            competitor_id: 44,
            finish_position: 1,
            bonuses: Default::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(frozen.reason_code(), "ALREADY_CALCULATED");

    // Clear, then the pair can be recomputed.
    let cleared = gateway.lineup_points(LineupAction::Clear, request.clone()).await.unwrap();
    assert_eq!(cleared.count, 2);
    let again = gateway.lineup_points(LineupAction::Update, request).await.unwrap();
    assert_eq!(again.count, 2);
}

#[tokio::test]
async fn auction_flow() {
    let gateway = seeded_gateway().await;

    let leading = gateway
        .leading_bid(LeadingBidRequest {
            item_type: "pilot".to_string(),
            item_id: 44,
            league_id: MARKET_LEAGUE,
        })
        .await
        .unwrap();
    assert_eq!(leading.amount, Funds::from_cents(1000));

    let bid = |bidder_id: u64, amount: i64| BidRequest {
        item_type: "pilot".to_string(),
        item_id: 44,
        league_id: MARKET_LEAGUE,
        bidder_id,
        amount: Funds::from_cents(amount),
    };

    let too_low = gateway.place_bid(bid(100, 999)).await.unwrap_err();
    let envelope = too_low.to_message();
    assert_eq!(envelope.code, "BID_TOO_LOW");

    let opening = gateway.place_bid(bid(100, 1000)).await.unwrap();
    assert!(opening.accepted);
    assert_eq!(opening.minimum_next_bid, Funds::from_cents(1001));

    assert_eq!(gateway.place_bid(bid(200, 1000)).await.unwrap_err().reason_code(), "BID_TOO_LOW");
    gateway.place_bid(bid(200, 1500)).await.unwrap();

    let leading = gateway
        .leading_bid(LeadingBidRequest {
            item_type: "pilot".to_string(),
            item_id: 44,
            league_id: MARKET_LEAGUE,
        })
        .await
        .unwrap();
    assert_eq!(leading.amount, Funds::from_cents(1500));

    // The auction has two days to run; closing now is refused.
    let close_request = CloseAuctionRequest {
        item_type: "pilot".to_string(),
        item_id: 44,
        league_id: MARKET_LEAGUE,
    };
    let early = gateway.close_auction(close_request).await.unwrap_err();
    assert_eq!(early.reason_code(), "AUCTION_STILL_OPEN");

    // Settle once the window has elapsed.
    let key = AuctionKey { item_type: Role::Pilot, item_id: 44, league: MARKET_LEAGUE };
    let settlement = gateway.market().close(key, Utc::now() + Duration::hours(49)).unwrap();
    assert_eq!(settlement.winner, 200);
    assert_eq!(settlement.amount, Funds::from_cents(1500));
    assert_eq!(settlement.previous_owner, None);

    assert_eq!(
        gateway.ledger().balance_of(MARKET_LEAGUE, 200).unwrap(),
        Funds::from_cents(98_500)
    );
    assert_eq!(gateway.registry().owner_of(MARKET_LEAGUE, 44).unwrap().owner, 200);

    // Terminal: no more bids, no second settlement.
    assert_eq!(gateway.place_bid(bid(300, 5000)).await.unwrap_err().reason_code(), "AUCTION_CLOSED");
    assert!(gateway.market().close(key, Utc::now() + Duration::hours(50)).is_err());
}

#[tokio::test]
async fn clause_flow() {
    let gateway = seeded_gateway().await;

    // Zero-day protection window: granted competitors are buyable at once.
    gateway
        .grant_competitor(GrantCompetitorRequest {
            competitor_id: 16,
            league_id: MARKET_LEAGUE,
            owner_id: 300,
            price: Funds::from_cents(2000),
        })
        .await
        .unwrap();

    let receipt = gateway
        .clause_buyout(BuyoutRequest {
            competitor_id: 16,
            league_id: MARKET_LEAGUE,
            requester_id: 200,
        })
        .await
        .unwrap();
    assert_eq!(receipt.price, Funds::from_cents(4000));
    assert_eq!(receipt.previous_owner, 300);
    assert_eq!(receipt.new_clause_value, Funds::from_cents(8000));

    assert_eq!(
        gateway.ledger().balance_of(MARKET_LEAGUE, 200).unwrap(),
        Funds::from_cents(96_000)
    );
    assert_eq!(
        gateway.ledger().balance_of(MARKET_LEAGUE, 300).unwrap(),
        Funds::from_cents(104_000)
    );
    assert_eq!(gateway.registry().owner_of(MARKET_LEAGUE, 16).unwrap().owner, 200);

    // Only the owner can raise the clause; the raise is twice the stake.
    let stranger = gateway
        .clause_upgrade(UpgradeClauseRequest {
            competitor_id: 16,
            league_id: MARKET_LEAGUE,
            requester_id: 100,
            investment: Funds::from_cents(500),
        })
        .await
        .unwrap_err();
    assert_eq!(stranger.reason_code(), "VALIDATION_ERROR");

    let upgraded = gateway
        .clause_upgrade(UpgradeClauseRequest {
            competitor_id: 16,
            league_id: MARKET_LEAGUE,
            requester_id: 200,
            investment: Funds::from_cents(1000),
        })
        .await
        .unwrap();
    assert_eq!(upgraded.new_clause_value, Funds::from_cents(10_000));
    assert_eq!(
        gateway.ledger().balance_of(MARKET_LEAGUE, 200).unwrap(),
        Funds::from_cents(95_000)
    );

    // A buy-out attempt with no clause on record is NOT_FOUND.
    let missing = gateway
        .clause_buyout(BuyoutRequest {
            competitor_id: 55,
            league_id: MARKET_LEAGUE,
            requester_id: 100,
        })
        .await
        .unwrap_err();
    assert_eq!(missing.reason_code(), "NOT_FOUND");
}
