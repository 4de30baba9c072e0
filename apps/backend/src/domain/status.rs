//! Bid and claim lifecycles.
//!
//! Both start `Pending` and move exactly once to a terminal status. Storage
//! enforces the same rule with guarded updates (`WHERE status = 'pending'`);
//! these types let services check a transition before issuing the write.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Pending,
    Claimed,
    Rejected,
}

/// A waiver is open until its single claim is awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiverStatus {
    Open,
    Claimed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move from {from} to {to}")]
pub struct StatusTransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

impl BidStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Approved => "approved",
            BidStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, BidStatus::Pending)
    }

    pub fn transition(self, next: BidStatus) -> Result<BidStatus, StatusTransitionError> {
        if self.is_terminal() || !next.is_terminal() {
            return Err(StatusTransitionError {
                from: self.as_str(),
                to: next.as_str(),
            });
        }
        Ok(next)
    }
}

impl ClaimStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Claimed => "claimed",
            ClaimStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }

    pub fn transition(self, next: ClaimStatus) -> Result<ClaimStatus, StatusTransitionError> {
        if self.is_terminal() || !next.is_terminal() {
            return Err(StatusTransitionError {
                from: self.as_str(),
                to: next.as_str(),
            });
        }
        Ok(next)
    }
}
