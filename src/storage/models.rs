//! Data models for the storage layer

use crate::{cli::types::PlayerId, sleeper::types::PlayerInfo};
use serde::{Deserialize, Serialize};

/// One player directory row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub team: Option<String>,
}

impl Player {
    pub fn from_info(player_id: PlayerId, info: &PlayerInfo) -> Self {
        Self {
            player_id,
            full_name: info.full_name.clone(),
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            position: info.position.clone(),
            team: info.team.clone(),
        }
    }

    pub fn into_info(self) -> (PlayerId, PlayerInfo) {
        (
            self.player_id,
            PlayerInfo {
                full_name: self.full_name,
                first_name: self.first_name,
                last_name: self.last_name,
                position: self.position,
                team: self.team,
            },
        )
    }
}
