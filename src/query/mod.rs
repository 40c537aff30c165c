/// Listing queries for the console
///
/// Builds filtered, sorted, paginated account listings and annotates each
/// row with its display status. Listings are read-only and run concurrently
/// with transitions; they only ever observe committed rows.
mod freshness;

pub use freshness::{DebouncedSearch, Generation, SearchSequencer, DEFAULT_DEBOUNCE};

use crate::account::{
    AccountStore, AccountView, ScanFilter, ScanPage, ScanSort, SortField, SortOrder, StatusFilter,
};
use crate::config::PaginationConfig;
use crate::error::{AdminError, AdminResult};
use crate::metrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing request as it arrives from the console
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of annotated accounts plus the pre-pagination total
#[derive(Debug, Clone, Serialize)]
pub struct AccountPage {
    pub rows: Vec<AccountView>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl AccountPage {
    pub fn has_more(&self) -> bool {
        self.offset + (self.rows.len() as i64) < self.total
    }
}

#[derive(Clone)]
pub struct QueryService {
    store: AccountStore,
    pagination: PaginationConfig,
}

impl QueryService {
    pub fn new(store: AccountStore, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }

    /// Run a listing query. Each row's status (including the inactivity
    /// bucket) is resolved against the supplied `now`, never cached; two
    /// queries minutes apart may reclassify the same account.
    pub async fn list(&self, params: &ListParams, now: DateTime<Utc>) -> AdminResult<AccountPage> {
        let page = self.validate_page(params)?;

        let filter = ScanFilter {
            search: params.search.clone(),
            status: params.status,
        };
        let sort = ScanSort {
            field: params.sort_by.unwrap_or(SortField::CreatedAt),
            order: params.sort_order.unwrap_or(SortOrder::Desc),
        };

        let result = self.store.search(&filter, sort, page).await;
        metrics::LISTING_QUERIES_TOTAL
            .with_label_values(&[if result.is_ok() { "ok" } else { "error" }])
            .inc();
        let (accounts, total) = result?;

        let rows = accounts
            .into_iter()
            .map(|account| AccountView::resolve_at(account, now))
            .collect();

        Ok(AccountPage {
            rows,
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    fn validate_page(&self, params: &ListParams) -> AdminResult<ScanPage> {
        let limit = params.limit.unwrap_or(self.pagination.default_page_size);
        if limit < 1 {
            return Err(AdminError::Validation("limit must be positive".to_string()));
        }

        let offset = params.offset.unwrap_or(0);
        if offset < 0 {
            return Err(AdminError::Validation("offset cannot be negative".to_string()));
        }

        Ok(ScanPage {
            limit: limit.min(self.pagination.max_page_size),
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::testing::fixture;
    use crate::account::AccountStatus;
    use crate::db;
    use chrono::Duration;

    fn pagination() -> PaginationConfig {
        PaginationConfig {
            default_page_size: 20,
            max_page_size: 100,
        }
    }

    async fn service() -> QueryService {
        let pool = db::memory_pool().await.unwrap();
        let store = AccountStore::new(pool);

        let mut dormant = fixture("q-1", "Joel Dormant", "joel@example.com");
        dormant.last_activity_at = Utc::now() - Duration::days(45);

        let mut blocked = fixture("q-2", "Bruna Jorge", "bruna@example.com");
        blocked.is_blocked = true;
        blocked.blocked_reason = Some("abuse".into());

        for account in [
            dormant,
            blocked,
            fixture("q-3", "Pedro Costa", "pedro@example.com"),
            fixture("q-4", "Ana Jordao", "ana@example.com"),
        ] {
            store.insert(&account).await.unwrap();
        }

        QueryService::new(store, pagination())
    }

    #[tokio::test]
    async fn test_rows_are_annotated_with_display_status() {
        let service = service().await;

        let page = service
            .list(
                &ListParams {
                    sort_by: Some(SortField::Name),
                    sort_order: Some(SortOrder::Asc),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 4);
        let by_id = |id: &str| {
            page.rows
                .iter()
                .find(|v| v.account.id == id)
                .map(|v| v.status)
                .unwrap()
        };
        assert_eq!(by_id("q-1"), AccountStatus::Inactive);
        assert_eq!(by_id("q-2"), AccountStatus::Blocked);
        assert_eq!(by_id("q-3"), AccountStatus::Active);
    }

    #[tokio::test]
    async fn test_inactivity_is_relative_to_query_time() {
        let service = service().await;

        // Same account, two different clocks: the label is computed per
        // query, not stored.
        let now = Utc::now();
        let page_now = service.list(&ListParams::default(), now).await.unwrap();
        let page_future = service
            .list(&ListParams::default(), now + Duration::days(40))
            .await
            .unwrap();

        let active_now = page_now
            .rows
            .iter()
            .find(|v| v.account.id == "q-3")
            .unwrap()
            .status;
        let active_later = page_future
            .rows
            .iter()
            .find(|v| v.account.id == "q-3")
            .unwrap()
            .status;

        assert_eq!(active_now, AccountStatus::Active);
        assert_eq!(active_later, AccountStatus::Inactive);
    }

    #[tokio::test]
    async fn test_search_and_status_filter_compose() {
        let service = service().await;

        let page = service
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

        // "jo" matches Joel (q-1, active flags though inactive display),
        // Bruna Jorge (blocked, filtered out), Ana Jordao and joel@ email.
        let names: Vec<_> = page.rows.iter().map(|v| v.account.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Jordao", "Joel Dormant"]);
    }

    #[tokio::test]
    async fn test_limit_is_capped_and_zero_rejected() {
        let service = service().await;

        let err = service
            .list(
                &ListParams {
                    limit: Some(0),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));

        let page = service
            .list(
                &ListParams {
                    limit: Some(10_000),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await
            .unwrap();
        assert_eq!(page.limit, 100);
    }

    #[tokio::test]
    async fn test_has_more_reflects_remaining_rows() {
        let service = service().await;

        let first = service
            .list(
                &ListParams {
                    limit: Some(3),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await
            .unwrap();
        assert!(first.has_more());

        let last = service
            .list(
                &ListParams {
                    limit: Some(3),
                    offset: Some(3),
                    ..Default::default()
                },
                Utc::now(),
            )
            .await
            .unwrap();
        assert!(!last.has_more());
    }
}
