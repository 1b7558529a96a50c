//! In-memory adapters for the editorial workflow ports.

mod directory;
mod notification;
mod repository;

pub use directory::{InMemoryAccessDirectory, InMemoryDepartmentPolicies};
pub use notification::{InMemoryNotificationGateway, NotificationAttempt};
pub use repository::InMemoryWorkflowRepository;
