// storage/mod.rs
// Database operations module

pub mod admin_log;
pub mod issues;
pub mod migrations;
pub mod models;
pub mod notifications;
pub mod pool;
pub mod profiles;
pub mod responses;

// Re-export commonly used items
pub use issues::{IssueFilter, IssueWithReporter, NewIssue};
pub use migrations::run_migrations;
pub use models::{
    Issue, IssueCategory, IssuePriority, IssueResponse, IssueStatus, Notification,
    NotificationKind, Profile, ResponseType, Role,
};
pub use pool::init_db_pool_with_path;
pub use responses::NewResponseRecord;
