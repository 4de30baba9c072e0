pub mod bids;
pub mod players;
pub mod standings;
pub mod team_priorities;
pub mod teams;
pub mod waiver_claims;
pub mod waivers;

pub use bids::Entity as Bids;
pub use players::Entity as Players;
pub use standings::Entity as Standings;
pub use team_priorities::Entity as TeamPriorities;
pub use teams::Entity as Teams;
pub use waiver_claims::Entity as WaiverClaims;
pub use waivers::Entity as Waivers;
