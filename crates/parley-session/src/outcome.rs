use parley_types::MessageRecord;
use thiserror::Error;

/// Where a send cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Request issued, no response bytes yet
    Sending,
    Streaming,
    Committing,
    ErrorCommitting,
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }
}

/// Why a send was turned away before any request went out
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejected {
    #[error("message is empty")]
    EmptyMessage,

    #[error("a response is already streaming")]
    CycleInFlight,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// A record was appended, either the response or an error notice
    Committed(MessageRecord),
    Rejected(SendRejected),
    /// Aborted before completion; nothing was appended
    Cancelled,
}

impl SendOutcome {
    pub fn record(&self) -> Option<&MessageRecord> {
        match self {
            SendOutcome::Committed(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, SendOutcome::Committed(_))
    }
}
