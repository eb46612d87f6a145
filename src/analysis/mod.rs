//! Pure computations over fetched data: joins, projections and rankings.

pub mod adp;
pub mod dynasty;
pub mod exposure;
pub mod leaderboard;
pub mod lineup;
pub mod matchups;
pub mod projections;
pub mod props;
pub mod rank;
pub mod trades;
pub mod waivers;
