mod export;
mod list;
mod service;

pub use service::AuditQueryService;
