pub mod config;
pub mod error;
pub mod types;

pub use config::{LogisticsConfig, StorageCapacities};
pub use error::{Result, WarehouseError};
pub use types::{Tick, TileCoord};
