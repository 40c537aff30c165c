/// Lifecycle engine
///
/// Validates and applies single account transitions. Each transition runs as
/// one transaction: a precondition-guarded UPDATE plus the audit event
/// insert. Dropping the future before commit rolls everything back, so a
/// cancelled transition never leaves half-written audit fields, and the
/// guarded UPDATE makes concurrent transitions on the same account
/// serialize instead of interleaving.
use super::{audit, Actor, TransitionKind};
use crate::account::{Account, AccountStore};
use crate::error::{AdminError, AdminResult};
use crate::metrics;
use chrono::Utc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct LifecycleEngine {
    store: AccountStore,
}

impl LifecycleEngine {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    /// Block an account, stamping reason, actor and time. Allowed whether or
    /// not the account is deleted; the flags are independent. Re-blocking an
    /// already blocked account is rejected rather than silently overwriting
    /// the previous block record.
    pub async fn block(&self, id: &str, actor: &Actor, reason: &str) -> AdminResult<Account> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AdminError::Validation("Block reason is required".to_string()));
        }

        self.transition(
            id,
            actor,
            TransitionKind::Block,
            Some(reason),
            "UPDATE account
             SET is_blocked = 1, blocked_reason = ?1, blocked_at = ?2, blocked_by = ?3,
                 updated_at = ?2
             WHERE id = ?4 AND is_blocked = 0",
            "already blocked",
        )
        .await
    }

    /// Unblock an account. The historical block record (reason, time, actor)
    /// is deliberately retained.
    pub async fn unblock(&self, id: &str, actor: &Actor) -> AdminResult<Account> {
        self.transition(
            id,
            actor,
            TransitionKind::Unblock,
            None,
            "UPDATE account
             SET is_blocked = 0, updated_at = ?2
             WHERE id = ?4 AND is_blocked = 1",
            "not currently blocked",
        )
        .await
    }

    /// Soft-delete an account. The record stays in place with the flag set.
    pub async fn soft_delete(&self, id: &str, actor: &Actor) -> AdminResult<Account> {
        self.transition(
            id,
            actor,
            TransitionKind::Delete,
            None,
            "UPDATE account
             SET is_deleted = 1, deleted_at = ?2, deleted_by = ?3, updated_at = ?2
             WHERE id = ?4 AND is_deleted = 0",
            "already deleted",
        )
        .await
    }

    /// Restore a soft-deleted account. `is_blocked` is not touched: a
    /// blocked account stays blocked after restore.
    pub async fn restore(&self, id: &str, actor: &Actor) -> AdminResult<Account> {
        self.transition(
            id,
            actor,
            TransitionKind::Restore,
            None,
            "UPDATE account
             SET is_deleted = 0, updated_at = ?2
             WHERE id = ?4 AND is_deleted = 1",
            "not currently deleted",
        )
        .await
    }

    /// Dispatch a transition by kind, as used by the bulk coordinator
    pub async fn apply(
        &self,
        id: &str,
        kind: TransitionKind,
        actor: &Actor,
        reason: Option<&str>,
    ) -> AdminResult<Account> {
        match kind {
            TransitionKind::Block => self.block(id, actor, reason.unwrap_or_default()).await,
            TransitionKind::Unblock => self.unblock(id, actor).await,
            TransitionKind::Delete => self.soft_delete(id, actor).await,
            TransitionKind::Restore => self.restore(id, actor).await,
        }
    }

    async fn transition(
        &self,
        id: &str,
        actor: &Actor,
        kind: TransitionKind,
        reason: Option<&str>,
        update_sql: &str,
        precondition: &str,
    ) -> AdminResult<Account> {
        let now = Utc::now();

        let mut tx = self.store.pool().begin().await?;

        let result = sqlx::query(update_sql)
            .bind(reason)
            .bind(now)
            .bind(&actor.id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Distinguish a missing account from a failed precondition
            let exists = sqlx::query("SELECT 1 FROM account WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();
            drop(tx);

            metrics::TRANSITIONS_TOTAL
                .with_label_values(&[kind.as_str(), "rejected"])
                .inc();

            return if exists {
                warn!(account = id, action = kind.as_str(), "transition rejected: {}", precondition);
                Err(AdminError::InvalidTransition(format!(
                    "Account {} is {}",
                    id, precondition
                )))
            } else {
                Err(AdminError::NotFound(format!("Account {} not found", id)))
            };
        }

        audit::record(&mut *tx, id, kind, reason, &actor.id, now).await?;
        tx.commit().await?;

        metrics::TRANSITIONS_TOTAL
            .with_label_values(&[kind.as_str(), "applied"])
            .inc();
        info!(account = id, actor = %actor.id, action = kind.as_str(), "transition applied");

        self.store.get(id).await
    }
}
