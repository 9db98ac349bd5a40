use patrimonio_api::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Invalid import payload: {0}")]
    InvalidImportShape(String),
    #[error("Identifier is blank")]
    EmptyIdentifier,
    #[error("Observation reason is blank")]
    EmptyReason,
    #[error("No asset matches '{0}'")]
    NotFound(String),
    #[error("Asset '{0}' has not been registered yet")]
    NotRegistered(String),
    #[error("Inventory state lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, InventoryError>;
