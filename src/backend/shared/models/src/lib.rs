pub mod ids;
pub mod message;
pub mod ownership;
pub mod receipt;
pub mod session;
pub mod validator;

// Common shared traits
pub trait Timestamped {
    fn created_at(&self) -> chrono::DateTime<chrono::Utc>;
    fn updated_at(&self) -> chrono::DateTime<chrono::Utc>;
}
