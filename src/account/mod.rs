/// Account data model
///
/// The moderatable identity record. Accounts are created by the registration
/// service; this core only reads them and flips moderation flags through the
/// lifecycle engine.
mod status;
mod store;

pub use status::{resolve, AccountStatus, INACTIVITY_THRESHOLD_DAYS};
pub use store::{
    AccountStore, ScanFilter, ScanPage, ScanSort, SortField, SortOrder, StatusFilter,
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account record in the database. The id is an opaque identifier minted by
/// the registration service (UUIDs in practice).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub profiles_count: i64,
    pub actions_count: i64,
    // Moderation flags. `is_blocked` and `is_deleted` are independent; the
    // audit fields below are written by their transition and survive the
    // inverse transition (unblock/restore keep the historical record).
    pub is_blocked: bool,
    pub blocked_reason: Option<String>,
    pub blocked_at: Option<DateTime<Utc>>,
    pub blocked_by: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
}

/// Account annotated with its display status, as returned by listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    #[serde(flatten)]
    pub account: Account,
    pub status: AccountStatus,
}

impl AccountView {
    /// Annotate an account with its status resolved against `now`
    pub fn resolve_at(account: Account, now: DateTime<Utc>) -> Self {
        let status = resolve(&account, now);
        Self { account, status }
    }
}

/// Test support: fixture accounts with sensible defaults
pub mod testing {
    use super::Account;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    /// A plain active account last seen a day ago
    pub fn fixture(id: &str, name: &str, email: &str) -> Account {
        let now = Utc::now();
        Account {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            birth_date: None,
            created_at: now - Duration::days(120),
            updated_at: now - Duration::days(1),
            last_activity_at: now - Duration::days(1),
            profiles_count: 1,
            actions_count: 10,
            is_blocked: false,
            blocked_reason: None,
            blocked_at: None,
            blocked_by: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// Fixture with a random id
    pub fn random_fixture(name: &str, email: &str) -> Account {
        fixture(&Uuid::new_v4().to_string(), name, email)
    }
}
