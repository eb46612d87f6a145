//! Cache transitions for the Sleeper loaders

use super::*;
use crate::core::cache::{cache_dir_for, write_string};
use crate::sleeper::SLEEPER_BASE_URL;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn setup(server: &MockServer, dir: &Path) -> (SleeperClient, CacheManager) {
    (
        SleeperClient::new(server.uri()).unwrap(),
        CacheManager::with_dir(dir.to_path_buf()),
    )
}

#[tokio::test]
async fn test_nfl_state_miss_hit_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/state/nfl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"week": 9, "season": "2024"})))
        .expect(2)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let (client, cache) = setup(&server, dir.path());

    let (state, status) = load_or_fetch_nfl_state(&client, &cache, false).await.unwrap();
    assert_eq!((state.week, status), (9, CacheStatus::Miss));

    let (_, status) = load_or_fetch_nfl_state(&client, &cache, false).await.unwrap();
    assert_eq!(status, CacheStatus::Hit);

    let (_, status) = load_or_fetch_nfl_state(&client, &cache, true).await.unwrap();
    assert_eq!(status, CacheStatus::Refreshed);
}

#[tokio::test]
async fn test_stats_served_from_disk_by_a_new_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/nfl/regular/2024/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "4046": {"pts_ppr": 22.5, "pass_yd": 291.0}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let (client, cache) = setup(&server, dir.path());

    let (stats, status) =
        load_or_fetch_stats(&client, &cache, Season::new(2024), Some(Week::new(3)), false)
            .await
            .unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(stats[&crate::PlayerId::new("4046")]["pts_ppr"], 22.5);

    let reopened = CacheManager::with_dir(dir.path().to_path_buf());
    let (stats, status) =
        load_or_fetch_stats(&client, &reopened, Season::new(2024), Some(Week::new(3)), false)
            .await
            .unwrap();
    assert_eq!(status, CacheStatus::Hit);
    assert_eq!(stats.len(), 1);
}

#[tokio::test]
async fn test_expired_league_entry_is_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/league/1048461014691328000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "league_id": "1048461014691328000",
            "name": "Fresh Name"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let (client, cache) = setup(&server, dir.path());
    let league_id = LeagueId::new("1048461014691328000");

    let key = LeagueCacheKey {
        league_id: league_id.clone(),
    };
    let stale = json!({
        "stored_at": 0,
        "value": {"league_id": "1048461014691328000", "name": "Stale Name"}
    });
    write_string(&cache.leagues.file_path(&key), &stale.to_string()).unwrap();

    let (league, status) = load_or_fetch_league(&client, &cache, &league_id, false)
        .await
        .unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(league.name, "Fresh Name");

    let (league, status) = load_or_fetch_league(&client, &cache, &league_id, false)
        .await
        .unwrap();
    assert_eq!(status, CacheStatus::Hit);
    assert_eq!(league.name, "Fresh Name");
}

#[test]
fn test_cache_dir_per_api_host() {
    let base = Path::new("/cache/sleeper-ffl");
    assert_eq!(cache_dir_for(base, SLEEPER_BASE_URL), base);
    assert_eq!(cache_dir_for(base, "https://api.sleeper.app/v1/"), base);
    assert_eq!(
        cache_dir_for(base, "http://127.0.0.1:5050"),
        base.join("hosts").join("127_0_0_1_5050")
    );
}
