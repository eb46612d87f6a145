use super::*;
use crate::{
    datastore::{models::*, queries::*},
    LeagueId, PlayerId, Week,
};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, headers, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> DatastoreClient {
    DatastoreClient::new(format!("{}/", server.uri()), "anon-key").unwrap()
}

#[test]
fn test_query_params_in_order() {
    let q = Query::table("adp_comparison_11")
        .select("full_name,\n    position")
        .order("nfc_playerrank", true)
        .limit(250);

    assert_eq!(q.table_name(), "adp_comparison_11");
    assert_eq!(
        q.params(),
        &[
            ("select".to_string(), "full_name,position".to_string()),
            ("order".to_string(), "nfc_playerrank.asc".to_string()),
            ("limit".to_string(), "250".to_string()),
        ]
    );
}

#[test]
fn test_query_descending_order() {
    let q = Query::table("ktc_test").order("date", false);
    assert_eq!(q.params()[0].1, "date.desc");
}

#[tokio::test]
async fn test_fetch_sends_auth_headers_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/td_props"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .and(query_param("week", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "player": "Derrick Henry",
                "team": "BAL",
                "position": "RB",
                "date": "2024-10-06",
                "week": 5,
                "first_td_odds": "+400",
                "anytime_td_odds": -150,
                "two_plus_td_odds": "N/A",
                "is_completed": 1
            }
        ])))
        .mount(&server)
        .await;

    let rows = client_for(&server).td_props(Week::new(5)).await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.effective_name(), Some("Derrick Henry"));
    assert_eq!(row.game_date.as_deref(), Some("2024-10-06"));
    assert_eq!(row.anytime_td_odds.as_deref(), Some("-150"));
    assert_eq!(row.two_plus_td_odds, None);
    assert!(row.is_completed);
}

#[tokio::test]
async fn test_error_status_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/weekly_props"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "42703",
            "message": "column weekly_props.bogus does not exist"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .weekly_props(Week::new(1))
        .await
        .unwrap_err();
    match err {
        FflError::Datastore {
            table,
            status,
            message,
        } => {
            assert_eq!(table, "weekly_props");
            assert_eq!(status, 400);
            assert!(message.contains("bogus"));
        }
        other => panic!("Expected Datastore error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_with_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leagues"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .leagues_for_user("uid-1")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("upstream down"));
}

#[tokio::test]
async fn test_upsert_league_merges_duplicates() {
    let server = MockServer::start().await;
    let record = LeagueRecord {
        id: LeagueId::new("1048270943318634496"),
        user_uid: "uid-1".to_string(),
        buy_in: Some(100.0),
        total_pot: Some(1200.0),
    };

    Mock::given(method("POST"))
        .and(path("/rest/v1/leagues"))
        .and(query_param("on_conflict", "id"))
        .and(headers(
            "prefer",
            vec!["resolution=merge-duplicates", "return=representation"],
        ))
        .and(body_json(json!([{
            "id": "1048270943318634496",
            "user_uid": "uid-1",
            "buy_in": 100.0,
            "total_pot": 1200.0
        }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 1048270943318634496u64,
            "user_uid": "uid-1",
            "buy_in": 100,
            "total_pot": 1200
        }])))
        .mount(&server)
        .await;

    let saved = client_for(&server).upsert_league(&record).await.unwrap();
    assert_eq!(saved, vec![record]);
}

#[tokio::test]
async fn test_top_adp_orders_and_limits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/adp_comparison_11"))
        .and(query_param("order", "nfc_playerrank.asc"))
        .and(query_param("limit", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"full_name": "CeeDee Lamb", "position": "WR", "nfc_playerrank": 1, "sleeper_playerrank": "2", "nfc_adp": 1.4},
            {"full_name": "Bijan Robinson", "position": "RB", "nfc_playerrank": 2, "sleeper_playerrank": null}
        ])))
        .mount(&server)
        .await;

    let rows = client_for(&server).top_adp(250).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sleeper_playerrank, Some(2.0));
    assert_eq!(rows[1].sleeper_playerrank, None);
    assert_eq!(rows[0].nfc_adp, Some(1.4));
}

#[tokio::test]
async fn test_latest_dynasty_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/ktc_test"))
        .and(query_param("order", "date.desc"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "date": "2024-11-03T00:00:00+00:00" }])),
        )
        .mount(&server)
        .await;

    let date = client_for(&server).latest_dynasty_date().await.unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 11, 3));
    assert_eq!(format_snapshot_date(date.unwrap()), "11/03/2024");
}

#[tokio::test]
async fn test_latest_dynasty_date_empty_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/ktc_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).latest_dynasty_date().await.unwrap(), None);
}

#[tokio::test]
async fn test_weekly_props_embeds_player_and_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/weekly_props"))
        .and(query_param("week", "eq.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "player_id": 88,
            "week": 3,
            "passyardsou": "245.5",
            "passtdsnumber": 1.5,
            "passtdsoverodds": "−120",
            "interceptions": "N/A",
            "nfl_players": {"sleeper_id": "4984", "player_name": "Josh Allen", "position": "QB", "team": "BUF"},
            "nfl_schedule": {"is_completed": "true", "home_team": "BUF", "away_team": "JAX"}
        }])))
        .mount(&server)
        .await;

    let rows = client_for(&server).weekly_props(Week::new(3)).await.unwrap();
    let row = &rows[0];
    assert_eq!(row.player_id, Some(PlayerId::new("88")));
    assert_eq!(row.sleeper_id(), Some(&PlayerId::new("4984")));
    assert_eq!(row.passyardsou, Some(245.5));
    assert_eq!(row.interceptions, None);
    assert_eq!(row.passtdsoverodds.as_deref(), Some("−120"));
    assert!(row.nfl_schedule.as_ref().unwrap().is_completed);
}

#[test]
fn test_weekly_stat_row_accepts_legacy_column_names() {
    let row: WeeklyStatRow = serde_json::from_value(json!({
        "playerID": "4984",
        "passing_yards": 301,
        "passing_touchdowns": 3,
        "rushing_touchdowns": "1"
    }))
    .unwrap();
    assert_eq!(row.player_id, Some(PlayerId::new("4984")));
    assert_eq!(row.passing_tds, Some(3.0));
    assert_eq!(row.rushing_tds, Some(1.0));
    assert_eq!(row.receptions, None);
}

#[test]
fn test_league_record_rejects_bad_id() {
    let res = serde_json::from_value::<LeagueRecord>(json!({"id": true, "user_uid": "u"}));
    assert!(res.is_err());
}
