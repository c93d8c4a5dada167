//! Logistics configuration loaded from TOML
//!
//! Every section is optional. Missing values fall back to the defaults
//! documented on each field, so an empty file is a valid configuration.

use serde::Deserialize;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::TileCoord;
use crate::logistics::assignment::PolicyKind;
use crate::warehouse::TileType;

/// Top-level configuration for a warehouse and its controller
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogisticsConfig {
    pub capacities: StorageCapacities,
    pub policies: PolicyConfig,
    /// Optional ASCII layout, consumed by `Warehouse::from_rows`
    pub layout: Option<LayoutConfig>,
}

/// Capacity given to each new storage unit, per tile family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageCapacities {
    /// Rack capacity (default 20)
    pub rack: u32,
    /// Receive depot capacity (default 5)
    ///
    /// Depots are staging areas. Items sit here only until a place order
    /// moves them to a rack, so they are kept small.
    pub receive_depot: u32,
    /// Ship depot capacity (default 5)
    pub ship_depot: u32,
}

impl Default for StorageCapacities {
    fn default() -> Self {
        Self {
            rack: 20,
            receive_depot: 5,
            ship_depot: 5,
        }
    }
}

impl StorageCapacities {
    /// Capacity for a tile family, `None` for tiles that never hold storage
    pub fn for_type(&self, tile_type: TileType) -> Option<u32> {
        match tile_type {
            TileType::Empty => None,
            TileType::Rack => Some(self.rack),
            TileType::ReceiveDepot => Some(self.receive_depot),
            TileType::ShipDepot => Some(self.ship_depot),
        }
    }
}

/// Which assignment strategy each tile family uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub receive_depot: PolicyKind,
    pub ship_depot: PolicyKind,
    pub rack: PolicyKind,
    /// Reference point for `nearest` policies, as `[x, y]`
    pub anchor: [i32; 2],
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            receive_depot: PolicyKind::Basic,
            ship_depot: PolicyKind::Basic,
            rack: PolicyKind::Basic,
            anchor: [0, 0],
        }
    }
}

impl PolicyConfig {
    pub fn anchor(&self) -> TileCoord {
        TileCoord::new(self.anchor[0], self.anchor[1])
    }
}

/// ASCII warehouse layout: `.` empty, `R` rack, `D` receive depot, `S` ship depot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    pub rows: Vec<String>,
}

impl LogisticsConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = LogisticsConfig::parse("").unwrap();
        assert_eq!(config.capacities, StorageCapacities::default());
        assert_eq!(config.policies, PolicyConfig::default());
        assert!(config.layout.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
            [capacities]
            rack = 8
            receive_depot = 2

            [policies]
            receive_depot = "nearest"
            rack = "load_balanced"
            anchor = [3, 1]

            [layout]
            rows = ["D.R", "..R"]
        "#;
        let config = LogisticsConfig::parse(content).unwrap();

        assert_eq!(config.capacities.rack, 8);
        assert_eq!(config.capacities.receive_depot, 2);
        // Unset field keeps its default
        assert_eq!(config.capacities.ship_depot, 5);
        assert_eq!(config.policies.receive_depot, PolicyKind::Nearest);
        assert_eq!(config.policies.ship_depot, PolicyKind::Basic);
        assert_eq!(config.policies.rack, PolicyKind::LoadBalanced);
        assert_eq!(config.policies.anchor(), TileCoord::new(3, 1));
        assert_eq!(config.layout.unwrap().rows, vec!["D.R", "..R"]);
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let content = r#"
            [policies]
            rack = "random"
        "#;
        let err = LogisticsConfig::parse(content).unwrap_err();
        assert!(matches!(err, crate::core::error::WarehouseError::Config(_)));
    }

    #[test]
    fn test_capacity_for_type() {
        let caps = StorageCapacities::default();
        assert_eq!(caps.for_type(TileType::Empty), None);
        assert_eq!(caps.for_type(TileType::Rack), Some(20));
        assert_eq!(caps.for_type(TileType::ShipDepot), Some(5));
    }
}
