/// Account store: durable record of accounts and their moderation flags
use super::Account;
use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Status filter over the raw flags. Unlike the derived display status,
/// "active" here simply means neither blocked nor deleted; there is no
/// "inactive" bucket at the storage level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Blocked,
    Deleted,
}

/// Sortable listing fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    Name,
    Email,
    LastActivity,
}

impl SortField {
    /// Whitelisted ORDER BY fragment for the field
    fn order_fragment(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Name => "name COLLATE NOCASE",
            SortField::Email => "email COLLATE NOCASE",
            SortField::LastActivity => "last_activity_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter applied before pagination
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Case-insensitive substring over name or email
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
}

/// Sort specification; ties are always broken by id ascending
#[derive(Debug, Clone, Copy)]
pub struct ScanSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for ScanSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// Validated pagination window
#[derive(Debug, Clone, Copy)]
pub struct ScanPage {
    pub limit: i64,
    pub offset: i64,
}

const ACCOUNT_COLUMNS: &str = "id, name, email, birth_date, created_at, updated_at, \
     last_activity_at, profiles_count, actions_count, \
     is_blocked, blocked_reason, blocked_at, blocked_by, \
     is_deleted, deleted_at, deleted_by";

/// Durable account record store backed by SQLite
#[derive(Clone)]
pub struct AccountStore {
    db: SqlitePool,
}

impl AccountStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    /// Fetch a single account by id
    pub async fn get(&self, id: &str) -> AdminResult<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("Account {} not found", id)))?;

        Ok(account)
    }

    /// Insert an account record. Registration is an external collaborator;
    /// this exists for fixtures and import tooling.
    pub async fn insert(&self, account: &Account) -> AdminResult<()> {
        sqlx::query(
            "INSERT INTO account
             (id, name, email, birth_date, created_at, updated_at, last_activity_at,
              profiles_count, actions_count,
              is_blocked, blocked_reason, blocked_at, blocked_by,
              is_deleted, deleted_at, deleted_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.birth_date)
        .bind(account.created_at)
        .bind(account.updated_at)
        .bind(account.last_activity_at)
        .bind(account.profiles_count)
        .bind(account.actions_count)
        .bind(account.is_blocked)
        .bind(&account.blocked_reason)
        .bind(account.blocked_at)
        .bind(&account.blocked_by)
        .bind(account.is_deleted)
        .bind(account.deleted_at)
        .bind(&account.deleted_by)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Filtered, sorted, paginated scan. Returns the matching page and the
    /// total number of matches before pagination.
    pub async fn search(
        &self,
        filter: &ScanFilter,
        sort: ScanSort,
        page: ScanPage,
    ) -> AdminResult<(Vec<Account>, i64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM account");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.db).await?;

        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account"
        ));
        push_filter(&mut query, filter);
        query.push(format!(
            " ORDER BY {} {}, id ASC",
            sort.field.order_fragment(),
            sort.order.as_sql()
        ));
        query.push(" LIMIT ");
        query.push_bind(page.limit);
        query.push(" OFFSET ");
        query.push_bind(page.offset);

        let rows = query
            .build_query_as::<Account>()
            .fetch_all(&self.db)
            .await?;

        Ok((rows, total))
    }
}

/// Escape LIKE wildcards so a search term only matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Append the WHERE clause for a scan filter
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ScanFilter) {
    let mut first = true;
    let mut prefix = |builder: &mut QueryBuilder<'_, Sqlite>| {
        builder.push(if std::mem::take(&mut first) {
            " WHERE "
        } else {
            " AND "
        });
    };

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let needle = escape_like(&search.trim().to_lowercase());
        prefix(builder);
        builder.push("(LOWER(name) LIKE '%' || ");
        builder.push_bind(needle.clone());
        builder.push(" || '%' ESCAPE '\\' OR LOWER(email) LIKE '%' || ");
        builder.push_bind(needle);
        builder.push(" || '%' ESCAPE '\\')");
    }

    if let Some(status) = filter.status {
        prefix(builder);
        builder.push(match status {
            StatusFilter::Active => "is_blocked = 0 AND is_deleted = 0",
            StatusFilter::Blocked => "is_blocked = 1",
            StatusFilter::Deleted => "is_deleted = 1",
        });
    }
}
