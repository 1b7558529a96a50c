//! Notification gateway port.
//!
//! The gateway announces workflow events to an external transport. Calls
//! are fire-and-forget with respect to the triggering operation: the
//! returned status feeds the transport's audit log and is never used for
//! control flow.

use crate::editorial::domain::NotificationEvent;
use async_trait::async_trait;

/// Outcome of a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    /// The transport accepted the event.
    Sent,
    /// The transport rejected or failed to deliver the event.
    Failed,
}

impl DeliveryStatus {
    /// Returns whether the attempt succeeded.
    #[must_use]
    pub const fn is_sent(self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Returns the canonical audit-log representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

/// Event announcement contract.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Announces a workflow event.
    ///
    /// Implementations record every attempt (recipient, kind, outcome, and
    /// article/review linkage) in their audit log; callers ignore the
    /// returned status for everything except optional logging.
    async fn notify(&self, event: NotificationEvent) -> DeliveryStatus;
}
