//! Adapters for external dependencies.

pub mod bids_sea;
pub mod players_sea;
pub mod priorities_sea;
pub mod standings_sea;
pub mod teams_sea;
pub mod waivers_sea;
