pub mod auth;
pub mod snapshot_service;
pub mod sync_log_service;
pub mod sync_service;
