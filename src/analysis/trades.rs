//! Trade history for a league, split into what each roster gave and got.

use serde::Serialize;
use std::collections::HashMap;

use super::matchups::default_team_name;
use crate::{
    sleeper::types::{DraftPick, PlayerDirectory, Transaction},
    PlayerId,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradedPlayer {
    pub player_id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradedPick {
    pub season: String,
    pub round: u32,
    /// Roster the pick originally belonged to.
    pub original_roster_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSide {
    pub roster_id: u32,
    pub team: String,
    pub players_received: Vec<TradedPlayer>,
    pub players_sent: Vec<TradedPlayer>,
    pub picks_received: Vec<TradedPick>,
    pub picks_sent: Vec<TradedPick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSummary {
    pub transaction_id: String,
    pub week: Option<u16>,
    pub status: Option<String>,
    pub created: Option<i64>,
    pub sides: Vec<TradeSide>,
}

fn traded_player(directory: &PlayerDirectory, id: &PlayerId) -> TradedPlayer {
    TradedPlayer {
        player_id: id.clone(),
        name: directory
            .get(id)
            .and_then(|p| p.display_name())
            .unwrap_or_else(|| format!("Player {}", id)),
    }
}

fn moves_for(
    moves: &HashMap<PlayerId, u32>,
    roster_id: u32,
    directory: &PlayerDirectory,
) -> Vec<TradedPlayer> {
    let mut out: Vec<TradedPlayer> = moves
        .iter()
        .filter(|(_, r)| **r == roster_id)
        .map(|(id, _)| traded_player(directory, id))
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn side(
    tx: &Transaction,
    roster_id: u32,
    directory: &PlayerDirectory,
    names: &HashMap<u32, String>,
) -> TradeSide {
    let pick = |p: &DraftPick| TradedPick {
        season: p.season.clone(),
        round: p.round,
        original_roster_id: p.roster_id,
    };

    TradeSide {
        roster_id,
        team: names
            .get(&roster_id)
            .cloned()
            .unwrap_or_else(|| default_team_name(roster_id)),
        players_received: moves_for(&tx.adds, roster_id, directory),
        players_sent: moves_for(&tx.drops, roster_id, directory),
        picks_received: tx
            .draft_picks
            .iter()
            .filter(|p| p.owner_id == roster_id)
            .map(pick)
            .collect(),
        picks_sent: tx
            .draft_picks
            .iter()
            .filter(|p| p.previous_owner_id == Some(roster_id))
            .map(pick)
            .collect(),
    }
}

/// Trades among `transactions`, newest first. With `roster_id`, only trades
/// that roster took part in.
pub fn trade_summaries(
    transactions: &[Transaction],
    roster_id: Option<u32>,
    directory: &PlayerDirectory,
    names: &HashMap<u32, String>,
) -> Vec<TradeSummary> {
    let mut trades: Vec<TradeSummary> = transactions
        .iter()
        .filter(|tx| tx.is_trade())
        .filter(|tx| roster_id.map_or(true, |r| tx.roster_ids.contains(&r)))
        .map(|tx| TradeSummary {
            transaction_id: tx.transaction_id.clone(),
            week: tx.leg,
            status: tx.status.clone(),
            created: tx.created,
            sides: tx
                .roster_ids
                .iter()
                .map(|r| side(tx, *r, directory, names))
                .collect(),
        })
        .collect();

    trades.sort_by(|a, b| {
        (b.week, b.created)
            .cmp(&(a.week, a.created))
            .then_with(|| a.transaction_id.cmp(&b.transaction_id))
    });
    trades
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sleeper::types::PlayerInfo;

    fn trade(id: &str, week: u16, roster_ids: &[u32]) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            kind: "trade".to_string(),
            status: Some("complete".to_string()),
            leg: Some(week),
            created: Some(1_700_000_000_000 + week as i64),
            roster_ids: roster_ids.to_vec(),
            adds: HashMap::new(),
            drops: HashMap::new(),
            draft_picks: vec![],
        }
    }

    fn directory() -> PlayerDirectory {
        let mut dir = PlayerDirectory::new();
        dir.insert(
            PlayerId::new("4046"),
            PlayerInfo {
                full_name: Some("Patrick Mahomes".to_string()),
                ..Default::default()
            },
        );
        dir
    }

    #[test]
    fn test_sides_split_players_and_picks() {
        let mut tx = trade("t1", 5, &[1, 2]);
        tx.adds.insert(PlayerId::new("4046"), 2);
        tx.drops.insert(PlayerId::new("4046"), 1);
        tx.adds.insert(PlayerId::new("9999"), 1);
        tx.drops.insert(PlayerId::new("9999"), 2);
        tx.draft_picks.push(DraftPick {
            season: "2025".to_string(),
            round: 2,
            roster_id: 1,
            owner_id: 2,
            previous_owner_id: Some(1),
        });
        let names = HashMap::from([(1, "Gridiron Gurus".to_string())]);

        let trades = trade_summaries(&[tx], Some(1), &directory(), &names);
        assert_eq!(trades.len(), 1);
        let [one, two] = &trades[0].sides[..] else {
            panic!("expected two sides");
        };

        assert_eq!(one.team, "Gridiron Gurus");
        assert_eq!(one.players_received[0].name, "Player 9999");
        assert_eq!(one.players_sent[0].name, "Patrick Mahomes");
        assert!(one.picks_received.is_empty());
        assert_eq!(one.picks_sent[0].round, 2);

        assert_eq!(two.team, "Team 2");
        assert_eq!(two.players_received[0].player_id, PlayerId::new("4046"));
        assert_eq!(
            two.picks_received,
            vec![TradedPick {
                season: "2025".to_string(),
                round: 2,
                original_roster_id: 1,
            }]
        );
    }

    #[test]
    fn test_filters_to_trades_for_roster() {
        let mut waiver = trade("w1", 3, &[1]);
        waiver.kind = "waiver".to_string();
        let txs = vec![trade("t1", 2, &[1, 2]), trade("t2", 4, &[3, 4]), waiver];

        let mine = trade_summaries(&txs, Some(1), &directory(), &HashMap::new());
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].transaction_id, "t1");

        let all = trade_summaries(&txs, None, &directory(), &HashMap::new());
        let ids: Vec<_> = all.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }
}
