use super::*;

fn pool(players: &[(&str, Position, f64)]) -> PlayerPool {
    let mut pool = PlayerPool::default();
    for (id, pos, pts) in players {
        pool.positions.insert(PlayerId::new(*id), *pos);
        pool.points.insert(PlayerId::new(*id), *pts);
    }
    pool
}

fn ids(list: &[&str]) -> Vec<PlayerId> {
    list.iter().map(|s| PlayerId::new(*s)).collect()
}

fn slots(list: &[&str]) -> Vec<RosterSlot> {
    parse_slots(&list.iter().map(|s| s.to_string()).collect::<Vec<_>>())
}

fn roster(id: u32, players: &[&str]) -> Roster {
    Roster {
        roster_id: id,
        owner_id: Some(UserId::new(format!("owner{}", id))),
        players: ids(players),
        starters: vec![],
    }
}

#[test]
fn test_fixed_slots_filled_before_flex() {
    use Position::*;
    let pool = pool(&[
        ("qb", QB, 20.0),
        ("rb1", RB, 25.0),
        ("rb2", RB, 10.0),
        ("wr1", WR, 18.0),
        ("wr2", WR, 15.0),
        ("te", TE, 8.0),
    ]);
    let slots = slots(&["QB", "RB", "WR", "FLEX", "TE", "BN", "BN"]);
    let lineup = optimize_lineup(&ids(&["rb2", "te", "wr2", "qb", "rb1", "wr1"]), &slots, &pool);

    assert_eq!(lineup[0], Some(PlayerId::new("qb")));
    assert_eq!(lineup[1], Some(PlayerId::new("rb1")));
    assert_eq!(lineup[2], Some(PlayerId::new("wr1")));
    // TE slot is filled before FLEX gets to pick.
    assert_eq!(lineup[4], Some(PlayerId::new("te")));
    assert_eq!(lineup[3], Some(PlayerId::new("wr2")));
    assert_eq!(lineup[5], None);
    assert_eq!(lineup[6], None);
}

#[test]
fn test_never_places_ineligible_player() {
    use Position::*;
    let pool = pool(&[("qb", QB, 30.0), ("k", K, 12.0), ("lb", LB, 9.0)]);
    let slots = slots(&["RB", "FLEX", "REC_FLEX", "IDP_FLEX", "SUPER_FLEX"]);
    let lineup = optimize_lineup(&ids(&["qb", "k", "lb"]), &slots, &pool);

    assert_eq!(lineup[0], None);
    assert_eq!(lineup[1], None);
    assert_eq!(lineup[2], None);
    assert_eq!(lineup[3], Some(PlayerId::new("lb")));
    assert_eq!(lineup[4], Some(PlayerId::new("qb")));
}

#[test]
fn test_unknown_position_never_starts() {
    let pool = PlayerPool {
        points: [(PlayerId::new("x"), 50.0)].into_iter().collect(),
        ..Default::default()
    };
    let lineup = optimize_lineup(&ids(&["x"]), &slots(&["FLEX"]), &pool);
    assert_eq!(lineup, vec![None]);
}

#[test]
fn test_slot_labels_count_occurrences() {
    let labels = slot_labels(&slots(&["QB", "RB", "RB", "WR", "FLEX", "FLEX", "BN"]));
    assert_eq!(labels, vec!["QB1", "RB1", "RB2", "WR1", "FLEX1", "FLEX2", "BN1"]);
}

#[test]
fn test_format_slot() {
    assert_eq!(format_slot(&RosterSlot::SuperFlex), "SFLX");
    assert_eq!(format_slot(&RosterSlot::IdpFlex), "IDPF");
    assert_eq!(format_slot(&RosterSlot::RecFlex), "RFLX");
    assert_eq!(format_slot(&RosterSlot::Fixed(Position::RB)), "RB");
}

#[test]
fn test_position_rankings_and_roster_rankings() {
    use Position::*;
    let pool = pool(&[
        ("a_qb", QB, 20.0),
        ("a_rb", RB, 10.0),
        ("b_qb", QB, 25.0),
        ("b_rb", RB, 6.0),
        ("c_qb", QB, 15.0),
    ]);
    let slots = slots(&["QB", "RB", "BN"]);
    let rosters = vec![
        roster(1, &["a_qb", "a_rb"]),
        roster(2, &["b_qb", "b_rb"]),
        roster(3, &["c_qb"]),
    ];

    let rankings = position_rankings(&rosters, &slots, &pool);
    let qbs = &rankings["QB1"];
    assert_eq!(qbs.len(), 3);
    assert_eq!(qbs[0].player_id, PlayerId::new("b_qb"));
    assert_eq!((qbs[2].rank, qbs[2].total), (3, 3));
    assert_eq!(rankings["RB1"].len(), 2);
    assert!(!rankings.contains_key("BN1"));

    let lineups = roster_rankings(&rosters, &slots, &pool);
    assert_eq!(lineups[0].roster_id, 2);
    assert_eq!(lineups[0].total_points, 31.0);
    assert_eq!(lineups[0].lineup.len(), 2, "bench slots are not listed");
    assert_eq!(lineups[0].lineup[0].slot_rank.as_deref(), Some("1/3"));
    assert_eq!(lineups[1].roster_id, 1);
    assert_eq!(lineups[2].lineup[1].player_id, None);
    assert_eq!(lineups[2].lineup[1].slot_rank, None);
}

#[test]
fn test_pool_from_directory() {
    use crate::sleeper::types::PlayerInfo;
    let mut dir = PlayerDirectory::new();
    dir.insert(
        PlayerId::new("1"),
        PlayerInfo {
            position: Some("WR".to_string()),
            ..Default::default()
        },
    );
    dir.insert(
        PlayerId::new("2"),
        PlayerInfo {
            position: Some("OL".to_string()),
            ..Default::default()
        },
    );
    let pool = PlayerPool::from_directory(&dir, HashMap::new());
    assert_eq!(pool.positions.get(&PlayerId::new("1")), Some(&Position::WR));
    assert!(!pool.positions.contains_key(&PlayerId::new("2")));
    assert_eq!(pool.points(&PlayerId::new("1")), 0.0);
}

#[test]
fn test_wrrb_flex_skips_higher_scoring_tight_end() {
    use Position::*;
    let pool = pool(&[("te", TE, 30.0), ("wr", WR, 12.0), ("rb", RB, 9.0)]);
    let slots = slots(&["WRRB_FLEX"]);
    let lineup = optimize_lineup(&ids(&["te", "wr", "rb"]), &slots, &pool);

    assert_eq!(lineup, vec![Some(PlayerId::new("wr"))]);
    assert_eq!(format_slot(&RosterSlot::WrRbFlex), "WRRB");
}
