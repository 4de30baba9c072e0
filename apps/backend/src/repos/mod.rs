//! Repository functions for domain layer.

pub mod bids;
pub mod players;
pub mod priorities;
pub mod standings;
pub mod teams;
pub mod waivers;
