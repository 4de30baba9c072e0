pub mod market;
pub mod priority;
pub mod resolution;
pub mod sweep;
pub mod waivers;
