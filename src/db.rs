pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod sales_rep_repo;
pub use sales_rep_repo::SalesRepRepository;
pub mod sync_log_repo;
pub use sync_log_repo::SyncLogRepository;
