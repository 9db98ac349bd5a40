pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub mod history;
pub mod index;
pub mod inventory;
pub mod records;
pub mod stats;
pub mod storage;

pub use error::{InventoryError, Result};
pub use inventory::Inventory;
