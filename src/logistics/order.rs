//! Orders - units of pending movement work

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{Tick, TileCoord};
use crate::inventory::Item;

/// Unique identifier for an order, assigned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of the movement an order asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Move an item out of a receive depot into rack storage
    Place,
    /// Move an item out of a rack onto a ship depot
    Ship,
}

/// Order lifecycle. `Complete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Complete,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => f.write_str("Order pending"),
            OrderStatus::Complete => f.write_str("Order complete"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    kind: OrderKind,
    item: Item,
    source: TileCoord,
    destination: Option<TileCoord>,
    created_at: Tick,
    status: OrderStatus,
}

impl Order {
    /// Request to move `item` from the receive depot at `depot` into storage.
    /// The rack is chosen when the order is executed.
    pub fn place(id: OrderId, depot: TileCoord, item: Item, created_at: Tick) -> Self {
        Self {
            id,
            kind: OrderKind::Place,
            item,
            source: depot,
            destination: None,
            created_at,
            status: OrderStatus::Pending,
        }
    }

    /// Request to move `item` from the rack at `rack` onto the ship depot at `depot`
    pub fn ship(id: OrderId, rack: TileCoord, depot: TileCoord, item: Item, created_at: Tick) -> Self {
        Self {
            id,
            kind: OrderKind::Ship,
            item,
            source: rack,
            destination: Some(depot),
            created_at,
            status: OrderStatus::Pending,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Tile the item is picked up from
    pub fn source(&self) -> TileCoord {
        self.source
    }

    /// Tile the item is delivered to, once known
    pub fn destination(&self) -> Option<TileCoord> {
        self.destination
    }

    pub fn created_at(&self) -> Tick {
        self.created_at
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == OrderStatus::Complete
    }

    pub(crate) fn mark_complete(&mut self) {
        self.status = OrderStatus::Complete;
    }

    pub(crate) fn set_destination(&mut self, destination: TileCoord) {
        self.destination = Some(destination);
    }

    pub(crate) fn clear_destination(&mut self) {
        self.destination = None;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} order {} for {} from {}",
            self.kind,
            self.id,
            self.item.part(),
            self.source
        )?;
        if let Some(dest) = self.destination {
            write!(f, " to {}", dest)?;
        }
        write!(f, " @{} ({})", self.created_at, self.status)
    }
}
