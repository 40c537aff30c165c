/// Account lifecycle and moderation
///
/// The lifecycle engine owns every mutation of the moderation flags; the
/// audit log records each committed transition; the bulk coordinator fans a
/// transition out over many accounts with per-id outcomes.
mod audit;
mod bulk;
mod engine;

pub use audit::{AuditLog, ModerationEvent};
pub use bulk::{BulkFailure, BulkOperationCoordinator, BulkOutcome};
pub use engine::LifecycleEngine;

use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};

/// The administrator performing a transition. Token validation happens
/// upstream; every engine call receives the actor explicitly so the audit
/// trail never depends on ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Lifecycle transition kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Block,
    Unblock,
    /// Soft delete; accounts are never physically destroyed here
    Delete,
    Restore,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Block => "block",
            TransitionKind::Unblock => "unblock",
            TransitionKind::Delete => "delete",
            TransitionKind::Restore => "restore",
        }
    }

    pub fn from_str(s: &str) -> AdminResult<Self> {
        match s.to_lowercase().as_str() {
            "block" => Ok(TransitionKind::Block),
            "unblock" => Ok(TransitionKind::Unblock),
            "delete" => Ok(TransitionKind::Delete),
            "restore" => Ok(TransitionKind::Restore),
            _ => Err(AdminError::Validation(format!(
                "Invalid transition kind: {}",
                s
            ))),
        }
    }
}
