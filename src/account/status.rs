/// Derived display status
///
/// The console never stores a status column; what an admin sees is computed
/// from the two moderation flags plus activity recency, with a fixed
/// precedence: deletion beats blocking beats inactivity.
use super::Account;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days without activity before an account displays as inactive
pub const INACTIVITY_THRESHOLD_DAYS: i64 = 30;

/// Human-facing account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Blocked,
    Deleted,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Blocked => "blocked",
            AccountStatus::Deleted => "deleted",
            AccountStatus::Inactive => "inactive",
        }
    }
}

/// Resolve the display status of an account at `now`.
///
/// Pure function: no clock reads, no I/O. First match wins:
/// deleted, then blocked, then inactive (strictly more than 30 days since
/// the last activity), then active. An account last active exactly 30 days
/// ago is still active.
pub fn resolve(account: &Account, now: DateTime<Utc>) -> AccountStatus {
    resolve_with_threshold(account, now, Duration::days(INACTIVITY_THRESHOLD_DAYS))
}

/// Same derivation with an explicit inactivity threshold
pub fn resolve_with_threshold(
    account: &Account,
    now: DateTime<Utc>,
    threshold: Duration,
) -> AccountStatus {
    if account.is_deleted {
        return AccountStatus::Deleted;
    }

    if account.is_blocked {
        return AccountStatus::Blocked;
    }

    if now - account.last_activity_at > threshold {
        return AccountStatus::Inactive;
    }

    AccountStatus::Active
}
