/// Marquee Admin - account lifecycle and moderation core
///
/// The rules governing whether an account is usable, the audit trail of who
/// changed that and why, and the orchestration of applying such changes to
/// many accounts at once with partial-failure tolerance. Everything else the
/// console does (auth, content catalog, dashboards) lives in collaborating
/// services.
pub mod account;
pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod metrics;
pub mod moderation;
pub mod query;
pub mod server;
