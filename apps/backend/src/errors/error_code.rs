//! Error codes for the league market API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Bid amount or target is invalid
    InvalidBid,
    /// Waiver claim is invalid
    InvalidClaim,
    /// Player is not listed on the open market
    PlayerNotOnMarket,
    /// Waiver is no longer open for claims
    WaiverClosed,

    // Resource Not Found
    PlayerNotFound,
    TeamNotFound,
    WaiverNotFound,
    BidNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Team already has a claim on this waiver
    ClaimExists,
    /// Another resolution already completed for the subject
    ResolutionConflict,
    /// Player is listed on the open market
    PlayerOnMarket,
    /// Player has an open waiver
    PlayerOnWaivers,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    /// Stored data violates a market invariant
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidBid => "INVALID_BID",
            Self::InvalidClaim => "INVALID_CLAIM",
            Self::PlayerNotOnMarket => "PLAYER_NOT_ON_MARKET",
            Self::WaiverClosed => "WAIVER_CLOSED",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::WaiverNotFound => "WAIVER_NOT_FOUND",
            Self::BidNotFound => "BID_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::ClaimExists => "CLAIM_EXISTS",
            Self::ResolutionConflict => "RESOLUTION_CONFLICT",
            Self::PlayerOnMarket => "PLAYER_ON_MARKET",
            Self::PlayerOnWaivers => "PLAYER_ON_WAIVERS",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
