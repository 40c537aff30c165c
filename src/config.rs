/// Configuration management for the Marquee admin core
use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub pagination: PaginationConfig,
    pub moderation: ModerationConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    pub version: String,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub account_db: PathBuf,
}

/// Listing pagination limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size applied when the caller omits `limit`
    pub default_page_size: i64,
    /// Hard cap on `limit`
    pub max_page_size: i64,
}

/// Moderation behavior knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Fan-out bound for bulk operations
    pub bulk_concurrency: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AdminResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("ADMIN_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("ADMIN_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| AdminError::Validation("Invalid port number".to_string()))?;
        let version = env::var("ADMIN_VERSION").unwrap_or_else(|_| "0.1.0".to_string());

        let data_directory: PathBuf = env::var("ADMIN_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let account_db = env::var("ADMIN_ACCOUNT_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("accounts.sqlite"));

        let default_page_size = env::var("ADMIN_DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .unwrap_or(20);
        let max_page_size = env::var("ADMIN_MAX_PAGE_SIZE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);

        let bulk_concurrency = env::var("ADMIN_BULK_CONCURRENCY")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .unwrap_or(8);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                version,
            },
            storage: StorageConfig {
                data_directory,
                account_db,
            },
            pagination: PaginationConfig {
                default_page_size,
                max_page_size,
            },
            moderation: ModerationConfig { bulk_concurrency },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> AdminResult<()> {
        if self.service.hostname.is_empty() {
            return Err(AdminError::Validation("Hostname cannot be empty".to_string()));
        }

        if self.pagination.default_page_size < 1 {
            return Err(AdminError::Validation(
                "Default page size must be positive".to_string(),
            ));
        }

        if self.pagination.max_page_size < self.pagination.default_page_size {
            return Err(AdminError::Validation(
                "Max page size cannot be smaller than the default".to_string(),
            ));
        }

        if self.moderation.bulk_concurrency == 0 {
            return Err(AdminError::Validation(
                "Bulk concurrency must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
