//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod comment_repo;
pub mod feature_repo;
pub mod file_repo;
pub mod invoice_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use comment_repo::CommentRepo;
pub use feature_repo::FeatureRepo;
pub use file_repo::FileRepo;
pub use invoice_repo::InvoiceRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
