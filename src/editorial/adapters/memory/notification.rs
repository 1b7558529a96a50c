//! In-memory notification gateway with an inspectable audit log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::editorial::{
    domain::{NotificationEvent, NotificationKind, NotificationRecipient},
    ports::{DeliveryStatus, NotificationGateway},
};

/// One recorded notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAttempt {
    event: NotificationEvent,
    status: DeliveryStatus,
}

impl NotificationAttempt {
    /// Returns the announced event.
    #[must_use]
    pub const fn event(&self) -> &NotificationEvent {
        &self.event
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.event.kind()
    }

    /// Returns the addressed recipient.
    #[must_use]
    pub const fn recipient(&self) -> NotificationRecipient {
        self.event.recipient()
    }

    /// Returns the delivery outcome.
    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        self.status
    }
}

#[derive(Debug, Default)]
struct GatewayState {
    attempts: Vec<NotificationAttempt>,
    failing: bool,
}

/// Thread-safe in-memory notification gateway.
///
/// Records every attempt; `set_failing(true)` makes subsequent attempts
/// report [`DeliveryStatus::Failed`], for exercising the fire-and-forget
/// contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationGateway {
    state: Arc<RwLock<GatewayState>>,
}

impl InMemoryNotificationGateway {
    /// Creates a gateway that reports every attempt as sent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent attempts report failure (or success again).
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut state) = self.state.write() {
            state.failing = failing;
        }
    }

    /// Returns a snapshot of all recorded attempts, oldest first.
    #[must_use]
    pub fn attempts(&self) -> Vec<NotificationAttempt> {
        self.state
            .read()
            .map(|state| state.attempts.clone())
            .unwrap_or_default()
    }

    /// Returns how many attempts of the given kind were recorded.
    #[must_use]
    pub fn attempts_of_kind(&self, kind: NotificationKind) -> usize {
        self.state
            .read()
            .map(|state| {
                state
                    .attempts
                    .iter()
                    .filter(|attempt| attempt.kind() == kind)
                    .count()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationGateway for InMemoryNotificationGateway {
    async fn notify(&self, event: NotificationEvent) -> DeliveryStatus {
        let Ok(mut state) = self.state.write() else {
            return DeliveryStatus::Failed;
        };
        let status = if state.failing {
            DeliveryStatus::Failed
        } else {
            DeliveryStatus::Sent
        };
        state.attempts.push(NotificationAttempt { event, status });
        status
    }
}
