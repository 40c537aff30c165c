/// Admin user-management endpoints
///
/// The only consumer is the admin console. Responses use its envelope:
/// `{success, message, data, pagination?}` with pagination
/// `{total, limit, offset, hasMore}`.
use crate::{
    account::{Account, AccountView},
    context::AppContext,
    error::{AdminError, AdminResult},
    moderation::{Actor, BulkOutcome, ModerationEvent, TransitionKind},
    query::ListParams,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Build admin user-management routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/bulk", post(bulk_action))
        .route("/users/:id", get(get_user).delete(delete_user))
        .route("/users/:id/block", post(block_user))
        .route("/users/:id/unblock", post(unblock_user))
        .route("/users/:id/restore", post(restore_user))
        .route("/users/:id/history", get(get_user_history))
}

/// Console response envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl<T> Envelope<T> {
    fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
            pagination: None,
        })
    }

    fn paginated(message: impl Into<String>, data: T, pagination: Pagination) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
            pagination: Some(pagination),
        })
    }
}

/// List accounts with filtering, sorting and pagination
async fn list_users(
    State(ctx): State<AppContext>,
    _actor: Actor,
    Query(params): Query<ListParams>,
) -> AdminResult<Json<Envelope<Vec<AccountView>>>> {
    let page = ctx.query_service.list(&params, Utc::now()).await?;

    let pagination = Pagination {
        total: page.total,
        limit: page.limit,
        offset: page.offset,
        has_more: page.has_more(),
    };

    Ok(Envelope::paginated(
        "Users retrieved successfully",
        page.rows,
        pagination,
    ))
}

/// Account detail, annotated with the current display status
async fn get_user(
    State(ctx): State<AppContext>,
    _actor: Actor,
    Path(id): Path<String>,
) -> AdminResult<Json<Envelope<AccountView>>> {
    let account = ctx.account_store.get(&id).await?;
    let view = AccountView::resolve_at(account, Utc::now());
    Ok(Envelope::ok("User retrieved successfully", view))
}

#[derive(Debug, Deserialize, Validate)]
pub struct BlockRequest {
    #[validate(length(min = 1, message = "reason is required"))]
    pub reason: String,
}

/// Block an account
async fn block_user(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<String>,
    Json(req): Json<BlockRequest>,
) -> AdminResult<Json<Envelope<Account>>> {
    req.validate()
        .map_err(|e| AdminError::Validation(e.to_string()))?;

    let account = ctx.lifecycle.block(&id, &actor, &req.reason).await?;
    Ok(Envelope::ok("User blocked successfully", account))
}

/// Unblock an account
async fn unblock_user(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<String>,
) -> AdminResult<Json<Envelope<Account>>> {
    let account = ctx.lifecycle.unblock(&id, &actor).await?;
    Ok(Envelope::ok("User unblocked successfully", account))
}

/// Soft-delete an account
async fn delete_user(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<String>,
) -> AdminResult<Json<Envelope<Account>>> {
    let account = ctx.lifecycle.soft_delete(&id, &actor).await?;
    Ok(Envelope::ok("User removed successfully", account))
}

/// Restore a soft-deleted account
async fn restore_user(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<String>,
) -> AdminResult<Json<Envelope<Account>>> {
    let account = ctx.lifecycle.restore(&id, &actor).await?;
    Ok(Envelope::ok("User restored successfully", account))
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkRequest {
    #[validate(length(min = 1, message = "at least one id is required"))]
    pub ids: Vec<String>,
    pub action: TransitionKind,
    pub reason: Option<String>,
}

/// Apply one transition to many accounts with per-id outcomes
async fn bulk_action(
    State(ctx): State<AppContext>,
    actor: Actor,
    Json(req): Json<BulkRequest>,
) -> AdminResult<Json<Envelope<BulkOutcome>>> {
    req.validate()
        .map_err(|e| AdminError::Validation(e.to_string()))?;

    let outcome = ctx
        .bulk
        .apply(&req.ids, req.action, &actor, req.reason.as_deref())
        .await;

    let message = format!(
        "{} succeeded, {} failed",
        outcome.succeeded_count(),
        outcome.failed_count()
    );
    Ok(Envelope::ok(message, outcome))
}

/// Moderation history for one account, newest first
async fn get_user_history(
    State(ctx): State<AppContext>,
    _actor: Actor,
    Path(id): Path<String>,
) -> AdminResult<Json<Envelope<Vec<ModerationEvent>>>> {
    // 404 for unknown accounts rather than an empty history
    ctx.account_store.get(&id).await?;
    let events = ctx.audit_log.history(&id).await?;
    Ok(Envelope::ok("History retrieved successfully", events))
}
