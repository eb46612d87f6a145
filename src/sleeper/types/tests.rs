//! Unit tests for Sleeper response types

use super::*;
use serde_json::json;

#[test]
fn test_roster_with_null_players() {
    let roster: Roster = serde_json::from_value(json!({
        "roster_id": 3,
        "owner_id": null,
        "players": null,
        "starters": ["4046", "0"]
    }))
    .unwrap();

    assert_eq!(roster.roster_id, 3);
    assert!(roster.owner_id.is_none());
    assert!(roster.players.is_empty());
    assert_eq!(roster.starters.len(), 2);
}

#[test]
fn test_roster_ownership() {
    let roster: Roster = serde_json::from_value(json!({
        "roster_id": 1,
        "owner_id": "73489",
        "players": ["4046"]
    }))
    .unwrap();

    assert!(roster.is_owned_by(&UserId::new("73489")));
    assert!(!roster.is_owned_by(&UserId::new("11111")));
}

#[test]
fn test_league_scoring_settings_skip_non_numeric() {
    let league: League = serde_json::from_value(json!({
        "league_id": "1048461014691328000",
        "name": "Dynasty Bags",
        "roster_positions": ["QB", "RB", "RB", "FLEX", "BN"],
        "scoring_settings": {
            "rec": 0.5,
            "pass_td": 4,
            "note": "custom"
        }
    }))
    .unwrap();

    assert_eq!(league.name, "Dynasty Bags");
    assert_eq!(league.roster_positions.len(), 5);
    assert_eq!(league.scoring_settings.get("rec"), Some(&0.5));
    assert_eq!(league.scoring_settings.get("pass_td"), Some(&4.0));
    assert!(!league.scoring_settings.contains_key("note"));
}

#[test]
fn test_league_defaults_when_fields_missing() {
    let league: League = serde_json::from_value(json!({ "league_id": "1" })).unwrap();
    assert!(league.roster_positions.is_empty());
    assert!(league.scoring_settings.is_empty());
    assert_eq!(league.name, "");
}

#[test]
fn test_player_display_name_fallbacks() {
    let full = PlayerInfo {
        full_name: Some("Josh Allen".to_string()),
        ..Default::default()
    };
    assert_eq!(full.display_name().as_deref(), Some("Josh Allen"));

    let defense = PlayerInfo {
        first_name: Some("Kansas City".to_string()),
        last_name: Some("Chiefs".to_string()),
        position: Some("DEF".to_string()),
        ..Default::default()
    };
    assert_eq!(defense.display_name().as_deref(), Some("Kansas City Chiefs"));

    assert_eq!(PlayerInfo::default().display_name(), None);
}

#[test]
fn test_parse_stat_map_object_form() {
    let raw = json!({
        "4046": { "pts_ppr": 310.5, "gp": 17, "rank_ppr": 2 },
        "KC": { "pts_std": 120.0, "note": "x" },
        "bad": 5
    });

    let map = parse_stat_map(&raw);
    assert_eq!(map.len(), 2);
    let line = map.get(&PlayerId::new("4046")).unwrap();
    assert_eq!(line.get("pts_ppr"), Some(&310.5));
    assert_eq!(line.get("gp"), Some(&17.0));
    let def = map.get(&PlayerId::new("KC")).unwrap();
    assert!(!def.contains_key("note"));
}

#[test]
fn test_parse_stat_map_array_form() {
    let raw = json!([
        { "player_id": "4046", "stats": { "pass_yd": 250.0, "pass_td": 2 } },
        { "player_id": "6794" },
        { "stats": { "rec": 4 } }
    ]);

    let map = parse_stat_map(&raw);
    assert_eq!(map.len(), 1);
    assert_eq!(map[&PlayerId::new("4046")].get("pass_td"), Some(&2.0));
}

#[test]
fn test_parse_stat_map_unexpected_shape() {
    assert!(parse_stat_map(&json!(null)).is_empty());
}

#[test]
fn test_nfl_state_deserialize() {
    let state: NflState = serde_json::from_value(json!({
        "week": 7,
        "display_week": 7,
        "season": "2024",
        "season_type": "regular"
    }))
    .unwrap();
    assert_eq!(state.week, 7);
    assert_eq!(state.season.as_deref(), Some("2024"));
}

#[test]
fn test_matchup_entry_nulls() {
    let entry: MatchupEntry = serde_json::from_value(json!({
        "roster_id": 4,
        "matchup_id": null,
        "points": null,
        "starters": null
    }))
    .unwrap();

    assert_eq!(entry.roster_id, 4);
    assert!(entry.matchup_id.is_none());
    assert_eq!(entry.points, 0.0);
    assert!(entry.starters.is_empty());
}

#[test]
fn test_transaction_trade_deserialize() {
    let tx: Transaction = serde_json::from_value(json!({
        "transaction_id": "987",
        "type": "trade",
        "status": "complete",
        "leg": 3,
        "roster_ids": [1, 2],
        "adds": { "4046": 2, "6794": 1 },
        "drops": { "4046": 1, "6794": 2 },
        "draft_picks": [
            { "season": "2025", "round": 1, "roster_id": 1, "owner_id": 2, "previous_owner_id": 1 }
        ]
    }))
    .unwrap();

    assert!(tx.is_trade());
    assert_eq!(tx.leg, Some(3));
    assert_eq!(tx.adds.get(&PlayerId::new("4046")), Some(&2));
    assert_eq!(tx.draft_picks[0].owner_id, 2);
}

#[test]
fn test_transaction_null_moves_are_empty() {
    let tx: Transaction = serde_json::from_value(json!({
        "transaction_id": "1",
        "type": "free_agent",
        "roster_ids": [5],
        "adds": null,
        "drops": null,
        "draft_picks": null
    }))
    .unwrap();

    assert!(!tx.is_trade());
    assert!(tx.adds.is_empty() && tx.drops.is_empty() && tx.draft_picks.is_empty());
}
