//! Part types serviced by the warehouse

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{Result, WarehouseError};
use crate::inventory::item::Item;

/// Catalogue key for a part type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartId(pub String);

impl PartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A kind of thing the warehouse can hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub description: String,
}

impl Part {
    pub fn new(id: impl Into<PartId>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.id, self.description)
    }
}

/// Registry of parts the warehouse services
#[derive(Debug, Clone, Default)]
pub struct PartCatalogue {
    parts: AHashMap<PartId, Part>,
}

impl PartCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a part; ids must be unique
    pub fn register(&mut self, part: Part) -> Result<()> {
        if self.parts.contains_key(&part.id) {
            return Err(WarehouseError::DuplicatePart(part.id));
        }
        self.parts.insert(part.id.clone(), part);
        Ok(())
    }

    pub fn get(&self, id: &PartId) -> Option<&Part> {
        self.parts.get(id)
    }

    pub fn contains(&self, id: &PartId) -> bool {
        self.parts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// All parts, sorted by id
    pub fn parts(&self) -> Vec<&Part> {
        let mut parts: Vec<&Part> = self.parts.values().collect();
        parts.sort_by(|a, b| a.id.cmp(&b.id));
        parts
    }

    /// Create a fresh item of a registered part
    pub fn create_item(&self, id: &PartId) -> Result<Item> {
        let part = self
            .get(id)
            .ok_or_else(|| WarehouseError::UnknownPart(id.clone()))?;
        Ok(Item::new(part.id.clone()))
    }
}
