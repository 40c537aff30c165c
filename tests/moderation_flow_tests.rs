/// End-to-end moderation flow tests
///
/// Exercises the wired context (store + engine + query + bulk) over an
/// in-memory database, covering the contract the console relies on.
use chrono::{Duration, Utc};
use marquee_admin::account::{
    resolve, testing::fixture, AccountStatus, SortField, SortOrder, StatusFilter,
};
use marquee_admin::config::{
    LoggingConfig, ModerationConfig, PaginationConfig, ServerConfig, ServiceConfig, StorageConfig,
};
use marquee_admin::context::AppContext;
use marquee_admin::db;
use marquee_admin::error::{AdminError, ErrorKind};
use marquee_admin::moderation::{Actor, TransitionKind};
use marquee_admin::query::ListParams;

fn test_config() -> ServerConfig {
    ServerConfig {
        service: ServiceConfig {
            hostname: "localhost".into(),
            port: 0,
            version: "test".into(),
        },
        storage: StorageConfig {
            data_directory: "./data".into(),
            account_db: "./data/accounts.sqlite".into(),
        },
        pagination: PaginationConfig {
            default_page_size: 20,
            max_page_size: 100,
        },
        moderation: ModerationConfig { bulk_concurrency: 4 },
        logging: LoggingConfig { level: "info".into() },
    }
}

async fn context() -> AppContext {
    let pool = db::memory_pool().await.unwrap();
    AppContext::with_pool(test_config(), pool)
}

fn admin() -> Actor {
    Actor::new("admin-1")
}

#[tokio::test]
async fn block_then_unblock_preserves_audit_record() {
    let ctx = context().await;
    ctx.account_store
        .insert(&fixture("u-1", "Joana Alves", "joana@example.com"))
        .await
        .unwrap();

    let blocked = ctx.lifecycle.block("u-1", &admin(), "spam").await.unwrap();
    assert!(blocked.is_blocked);

    let unblocked = ctx.lifecycle.unblock("u-1", &admin()).await.unwrap();
    assert!(!unblocked.is_blocked);
    assert_eq!(unblocked.blocked_reason.as_deref(), Some("spam"));
    assert_eq!(unblocked.blocked_by.as_deref(), Some("admin-1"));
    assert!(unblocked.blocked_at.is_some());
}

#[tokio::test]
async fn restore_keeps_prior_block_in_force() {
    let ctx = context().await;
    ctx.account_store
        .insert(&fixture("u-1", "Joana Alves", "joana@example.com"))
        .await
        .unwrap();

    ctx.lifecycle.block("u-1", &admin(), "abuse").await.unwrap();
    ctx.lifecycle.soft_delete("u-1", &admin()).await.unwrap();
    let restored = ctx.lifecycle.restore("u-1", &admin()).await.unwrap();

    assert!(!restored.is_deleted);
    assert!(restored.is_blocked);
    assert_eq!(resolve(&restored, Utc::now()), AccountStatus::Blocked);
}

#[tokio::test]
async fn invalid_transitions_surface_the_right_errors() {
    let ctx = context().await;
    ctx.account_store
        .insert(&fixture("u-1", "Joana Alves", "joana@example.com"))
        .await
        .unwrap();

    assert!(matches!(
        ctx.lifecycle.unblock("u-1", &admin()).await.unwrap_err(),
        AdminError::InvalidTransition(_)
    ));
    assert!(matches!(
        ctx.lifecycle.block("u-1", &admin(), "").await.unwrap_err(),
        AdminError::Validation(_)
    ));
    assert!(matches!(
        ctx.lifecycle.restore("u-1", &admin()).await.unwrap_err(),
        AdminError::InvalidTransition(_)
    ));
    assert!(matches!(
        ctx.lifecycle.block("ghost", &admin(), "spam").await.unwrap_err(),
        AdminError::NotFound(_)
    ));
}

#[tokio::test]
async fn bulk_block_tolerates_partial_failure() {
    let ctx = context().await;
    for account in [
        fixture("u-a", "Alice", "alice@example.com"),
        fixture("u-b", "Bruno", "bruno@example.com"),
        fixture("u-c", "Carla", "carla@example.com"),
    ] {
        ctx.account_store.insert(&account).await.unwrap();
    }
    // u-b already carries a block; re-blocking it must fail alone
    ctx.lifecycle.block("u-b", &admin(), "earlier").await.unwrap();

    let ids: Vec<String> = ["u-a", "u-b", "u-c"].iter().map(|s| s.to_string()).collect();
    let outcome = ctx
        .bulk
        .apply(&ids, TransitionKind::Block, &admin(), Some("spam"))
        .await;

    assert_eq!(outcome.succeeded, vec!["u-a".to_string(), "u-c".to_string()]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, "u-b");
    assert_eq!(outcome.failed[0].kind, ErrorKind::InvalidTransition);

    assert!(ctx.account_store.get("u-a").await.unwrap().is_blocked);
    assert!(ctx.account_store.get("u-c").await.unwrap().is_blocked);
    // The failed attempt did not disturb u-b's original record
    assert_eq!(
        ctx.account_store.get("u-b").await.unwrap().blocked_reason.as_deref(),
        Some("earlier")
    );
}

#[tokio::test]
async fn listing_composes_search_status_sort_and_pagination() {
    let ctx = context().await;

    let mut blocked = fixture("l-1", "Jorge Mendes", "jorge@example.com");
    blocked.is_blocked = true;
    let accounts = [
        blocked,
        fixture("l-2", "Joana Alves", "joana@example.com"),
        fixture("l-3", "Pedro Costa", "pedro@example.com"),
        fixture("l-4", "Ana Jordao", "ana@example.com"),
    ];
    for account in &accounts {
        ctx.account_store.insert(account).await.unwrap();
    }

    let page = ctx
        .query_service
        .list(
            &ListParams {
                search: Some("jo".into()),
                status: Some(StatusFilter::Active),
                sort_by: Some(SortField::Name),
                sort_order: Some(SortOrder::Asc),
                limit: Some(10),
                offset: Some(0),
            },
            Utc::now(),
        )
        .await
        .unwrap();

    let names: Vec<_> = page.rows.iter().map(|v| v.account.name.as_str()).collect();
    assert_eq!(names, vec!["Ana Jordao", "Joana Alves"]);
    assert_eq!(page.total, 2);
    assert!(page
        .rows
        .iter()
        .all(|v| !v.account.is_blocked && !v.account.is_deleted));
}

#[tokio::test]
async fn inactivity_boundary_is_strictly_more_than_thirty_days() {
    let ctx = context().await;

    let now = Utc::now();
    let mut boundary = fixture("i-1", "On Boundary", "boundary@example.com");
    boundary.last_activity_at = now - Duration::days(30);
    let mut past = fixture("i-2", "Past Boundary", "past@example.com");
    past.last_activity_at = now - Duration::days(31);
    ctx.account_store.insert(&boundary).await.unwrap();
    ctx.account_store.insert(&past).await.unwrap();

    let page = ctx
        .query_service
        .list(&ListParams::default(), now)
        .await
        .unwrap();

    let status_of = |id: &str| {
        page.rows
            .iter()
            .find(|v| v.account.id == id)
            .map(|v| v.status)
            .unwrap()
    };
    assert_eq!(status_of("i-1"), AccountStatus::Active);
    assert_eq!(status_of("i-2"), AccountStatus::Inactive);
}

#[tokio::test]
async fn audit_history_lists_transitions_newest_first() {
    let ctx = context().await;
    ctx.account_store
        .insert(&fixture("h-1", "Joana Alves", "joana@example.com"))
        .await
        .unwrap();

    ctx.lifecycle.block("h-1", &admin(), "spam").await.unwrap();
    ctx.lifecycle.unblock("h-1", &admin()).await.unwrap();
    ctx.lifecycle.soft_delete("h-1", &admin()).await.unwrap();

    let history = ctx.audit_log.history("h-1").await.unwrap();
    let actions: Vec<_> = history.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            TransitionKind::Delete,
            TransitionKind::Unblock,
            TransitionKind::Block
        ]
    );
    assert!(history.iter().all(|e| e.actor == "admin-1"));
}
