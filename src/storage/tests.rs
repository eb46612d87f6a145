//! Unit tests for storage functionality

use super::queries::DIRECTORY_MAX_AGE;
use super::*;
use crate::{
    cli::types::PlayerId,
    core::cache::now_secs,
    sleeper::types::{PlayerDirectory, PlayerInfo},
};
use std::time::Duration;

fn info(name: &str, pos: &str, team: Option<&str>) -> PlayerInfo {
    PlayerInfo {
        full_name: Some(name.to_string()),
        position: Some(pos.to_string()),
        team: team.map(str::to_string),
        ..Default::default()
    }
}

fn sample_directory() -> PlayerDirectory {
    let mut dir = PlayerDirectory::new();
    dir.insert(PlayerId::new("4046"), info("Patrick Mahomes", "QB", Some("KC")));
    dir.insert(PlayerId::new("6794"), info("Justin Jefferson", "WR", Some("MIN")));
    dir.insert(
        PlayerId::new("KC"),
        PlayerInfo {
            first_name: Some("Kansas City".to_string()),
            last_name: Some("Chiefs".to_string()),
            position: Some("DEF".to_string()),
            team: Some("KC".to_string()),
            ..Default::default()
        },
    );
    dir
}

#[test]
fn test_empty_database_is_stale() {
    let db = PlayerDatabase::open_in_memory().unwrap();
    assert_eq!(db.player_count().unwrap(), 0);
    assert_eq!(db.fetched_at().unwrap(), None);
    assert!(db.is_stale(DIRECTORY_MAX_AGE).unwrap());
}

#[test]
fn test_replace_directory_round_trip() {
    let mut db = PlayerDatabase::open_in_memory().unwrap();
    let dir = sample_directory();

    assert_eq!(db.replace_directory(&dir).unwrap(), 3);
    assert_eq!(db.get_directory().unwrap(), dir);
    assert!(!db.is_stale(DIRECTORY_MAX_AGE).unwrap());

    let def = db.get_player(&PlayerId::new("KC")).unwrap().unwrap();
    assert_eq!(def.full_name, None);
    assert_eq!(def.into_info().1.display_name().as_deref(), Some("Kansas City Chiefs"));
}

#[test]
fn test_replace_directory_drops_old_rows() {
    let mut db = PlayerDatabase::open_in_memory().unwrap();
    db.replace_directory(&sample_directory()).unwrap();

    let mut smaller = PlayerDirectory::new();
    smaller.insert(PlayerId::new("4046"), info("Patrick Mahomes", "QB", Some("KC")));
    db.replace_directory(&smaller).unwrap();

    assert_eq!(db.player_count().unwrap(), 1);
    assert!(db.get_player(&PlayerId::new("6794")).unwrap().is_none());
}

#[test]
fn test_staleness_uses_fetch_stamp() {
    let mut db = PlayerDatabase::open_in_memory().unwrap();
    let two_days_ago = now_secs() - 2 * 24 * 60 * 60;
    db.replace_directory_at(&sample_directory(), two_days_ago).unwrap();

    assert!(db.is_stale(DIRECTORY_MAX_AGE).unwrap());
    assert!(!db.is_stale(Duration::from_secs(3 * 24 * 60 * 60)).unwrap());
}

#[test]
fn test_upsert_player_updates_in_place() {
    let mut db = PlayerDatabase::open_in_memory().unwrap();
    let mut player = Player::from_info(PlayerId::new("1"), &info("Old Name", "RB", None));
    db.upsert_player(&player).unwrap();

    player.full_name = Some("New Name".to_string());
    player.team = Some("DET".to_string());
    db.upsert_player(&player).unwrap();

    assert_eq!(db.player_count().unwrap(), 1);
    assert_eq!(db.get_player(&PlayerId::new("1")).unwrap(), Some(player));
}

#[test]
fn test_clear() {
    let mut db = PlayerDatabase::open_in_memory().unwrap();
    db.replace_directory(&sample_directory()).unwrap();
    db.clear().unwrap();
    assert_eq!(db.player_count().unwrap(), 0);
    assert!(db.is_stale(DIRECTORY_MAX_AGE).unwrap());
}

#[test]
fn test_open_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("players.db");
    {
        let mut db = PlayerDatabase::open(&path).unwrap();
        db.replace_directory(&sample_directory()).unwrap();
    }
    let db = PlayerDatabase::open(&path).unwrap();
    assert_eq!(db.player_count().unwrap(), 3);
}
