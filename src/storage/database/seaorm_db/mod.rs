// Module declarations
mod connection;
mod record_ops;
mod transaction;
mod types;
mod user_ops;

// Re-export public types
pub use record_ops::Records;
pub use types::{DatabaseBackendType, Page, SeaOrmDatabase};
pub use user_ops::{UserChanges, Users};
