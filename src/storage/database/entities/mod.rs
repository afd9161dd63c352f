/// Generic record entity module
pub mod record;
/// User entity module
pub mod user;

pub use record::Entity as Record;
pub use user::Entity as User;
