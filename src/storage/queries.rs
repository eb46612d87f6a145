//! Player directory reads and writes

use super::{models::Player, schema::PlayerDatabase};
use crate::{core::cache::now_secs, sleeper::types::PlayerDirectory, PlayerId};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::time::Duration;

/// The directory is refetched once it is older than this.
pub const DIRECTORY_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

const FETCHED_AT_KEY: &str = "players_fetched_at";

fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        player_id: PlayerId::new(row.get::<_, String>(0)?),
        full_name: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        position: row.get(4)?,
        team: row.get(5)?,
    })
}

impl PlayerDatabase {
    /// Replace the whole directory in one transaction and stamp the fetch time.
    pub fn replace_directory(&mut self, directory: &PlayerDirectory) -> Result<usize> {
        self.replace_directory_at(directory, now_secs())
    }

    pub(crate) fn replace_directory_at(&mut self, directory: &PlayerDirectory, fetched_at: u64) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM players", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO players (player_id, full_name, first_name, last_name, position, team)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )?;
            for (id, info) in directory {
                let p = Player::from_info(id.clone(), info);
                stmt.execute(params![
                    p.player_id.as_str(),
                    p.full_name,
                    p.first_name,
                    p.last_name,
                    p.position,
                    p.team
                ])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?, ?)",
            params![FETCHED_AT_KEY, fetched_at as i64],
        )?;
        tx.commit()?;
        Ok(directory.len())
    }

    /// Insert or update a single player
    pub fn upsert_player(&mut self, player: &Player) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO players (player_id, full_name, first_name, last_name, position, team)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                player.player_id.as_str(),
                player.full_name,
                player.first_name,
                player.last_name,
                player.position,
                player.team
            ],
        )?;
        Ok(())
    }

    pub fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        Ok(self
            .conn
            .query_row(
                "SELECT player_id, full_name, first_name, last_name, position, team
                 FROM players WHERE player_id = ?",
                params![player_id.as_str()],
                row_to_player,
            )
            .optional()?)
    }

    pub fn get_directory(&self) -> Result<PlayerDirectory> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, full_name, first_name, last_name, position, team FROM players",
        )?;
        let rows = stmt.query_map([], row_to_player)?;

        let mut directory = PlayerDirectory::new();
        for row in rows {
            let (id, info) = row?.into_info();
            directory.insert(id, info);
        }
        Ok(directory)
    }

    pub fn player_count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM players", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    /// Unix seconds of the last full directory fetch, if any.
    pub fn fetched_at(&self) -> Result<Option<u64>> {
        let v: Option<i64> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = ?",
                params![FETCHED_AT_KEY],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v.map(|s| s.max(0) as u64))
    }

    /// True when the directory was never fetched or is older than `max_age`.
    pub fn is_stale(&self, max_age: Duration) -> Result<bool> {
        Ok(match self.fetched_at()? {
            Some(at) => now_secs().saturating_sub(at) > max_age.as_secs(),
            None => true,
        })
    }

    /// Drop all players and the fetch stamp.
    pub fn clear(&mut self) -> Result<()> {
        self.conn
            .execute_batch("DELETE FROM players; DELETE FROM meta;")?;
        Ok(())
    }
}
