pub mod error;
pub mod models;
pub mod persistence;
pub mod query;

// Re-export commonly used types
pub use error::{PersistenceError, PersistenceResult};
pub use models::*;
pub use persistence::PersistenceGateway;
pub use query::InventoryQuery;
