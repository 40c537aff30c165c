/// Moderation audit trail
///
/// Append-only log of committed transitions. Rows are written inside the
/// same transaction as the account flag update, so the log never records a
/// transition that did not commit.
use super::TransitionKind;
use crate::error::AdminResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// One committed transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationEvent {
    pub id: i64,
    pub account_id: String,
    pub action: TransitionKind,
    pub reason: Option<String>,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}

/// Append an event on the given transaction connection
pub(crate) async fn record(
    conn: &mut SqliteConnection,
    account_id: &str,
    action: TransitionKind,
    reason: Option<&str>,
    actor: &str,
    at: DateTime<Utc>,
) -> AdminResult<()> {
    sqlx::query(
        "INSERT INTO moderation_event (account_id, action, reason, actor, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(account_id)
    .bind(action.as_str())
    .bind(reason)
    .bind(actor)
    .bind(at)
    .execute(conn)
    .await?;

    Ok(())
}

/// Read access to the audit trail
#[derive(Clone)]
pub struct AuditLog {
    db: SqlitePool,
}

impl AuditLog {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Moderation history for an account, newest first
    pub async fn history(&self, account_id: &str) -> AdminResult<Vec<ModerationEvent>> {
        let rows = sqlx::query(
            "SELECT id, account_id, action, reason, actor, created_at
             FROM moderation_event
             WHERE account_id = ?1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(account_id)
        .fetch_all(&self.db)
        .await?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            let action_str: String = row.get("action");
            events.push(ModerationEvent {
                id: row.get("id"),
                account_id: row.get("account_id"),
                action: TransitionKind::from_str(&action_str)?,
                reason: row.get("reason"),
                actor: row.get("actor"),
                created_at: row.get("created_at"),
            });
        }

        Ok(events)
    }
}
