//! Warehouse controller - the single orchestration point for item intake
//!
//! The controller owns the warehouse, the catalogues, one assignment policy
//! per tile family and the order queue. It never routes; executors read the
//! warehouse, build a routing graph and search it themselves.

use crate::core::config::LogisticsConfig;
use crate::core::error::{Result, WarehouseError};
use crate::core::types::{Tick, TileCoord};
use crate::inventory::{InventoryCatalogue, Item, ItemId, PartCatalogue, StorageUnit};
use crate::logistics::assignment::{AssignmentPolicy, BasicAssignmentPolicy};
use crate::logistics::order::{Order, OrderId, OrderKind};
use crate::logistics::queue::OrderQueue;
use crate::warehouse::grid::Warehouse;
use crate::warehouse::tile::{Tile, TileType};

pub struct WarehouseController {
    warehouse: Warehouse,
    part_catalogue: PartCatalogue,
    inventory: InventoryCatalogue,
    receive_depot_policy: Box<dyn AssignmentPolicy>,
    ship_depot_policy: Box<dyn AssignmentPolicy>,
    rack_policy: Box<dyn AssignmentPolicy>,
    orders: OrderQueue,
    current_tick: Tick,
    next_order_id: u64,
}

impl WarehouseController {
    /// Controller with basic (first free tile) policies for every family
    pub fn new(warehouse: Warehouse, part_catalogue: PartCatalogue) -> Self {
        Self::with_policies(
            warehouse,
            part_catalogue,
            Box::new(BasicAssignmentPolicy::receive_depot()),
            Box::new(BasicAssignmentPolicy::ship_depot()),
            Box::new(BasicAssignmentPolicy::rack()),
        )
    }

    pub fn with_policies(
        warehouse: Warehouse,
        part_catalogue: PartCatalogue,
        receive_depot_policy: Box<dyn AssignmentPolicy>,
        ship_depot_policy: Box<dyn AssignmentPolicy>,
        rack_policy: Box<dyn AssignmentPolicy>,
    ) -> Self {
        Self {
            warehouse,
            part_catalogue,
            inventory: InventoryCatalogue::new(),
            receive_depot_policy,
            ship_depot_policy,
            rack_policy,
            orders: OrderQueue::new(),
            current_tick: 0,
            next_order_id: 0,
        }
    }

    /// Build the warehouse from the configured layout and the policies
    /// named in the config
    pub fn from_config(config: &LogisticsConfig, part_catalogue: PartCatalogue) -> Result<Self> {
        let layout = config
            .layout
            .as_ref()
            .ok_or_else(|| WarehouseError::InvalidLayout("no layout configured".into()))?;
        let warehouse = Warehouse::from_rows(layout.rows.as_slice(), &config.capacities)?;
        let policies = &config.policies;
        let anchor = policies.anchor();
        Ok(Self::with_policies(
            warehouse,
            part_catalogue,
            policies.receive_depot.build(TileType::ReceiveDepot, anchor),
            policies.ship_depot.build(TileType::ShipDepot, anchor),
            policies.rack.build(TileType::Rack, anchor),
        ))
    }

    // === Clock ===

    pub fn now(&self) -> Tick {
        self.current_tick
    }

    pub fn advance(&mut self, ticks: Tick) {
        self.current_tick += ticks;
    }

    pub fn set_tick(&mut self, tick: Tick) {
        self.current_tick = tick;
    }

    // === Intake ===

    /// Accept an item from outside into a receive depot and queue the work
    /// of putting it away
    ///
    /// Returns `None`, with nothing changed, when the item's part is not in
    /// the part catalogue or no receive depot has room.
    pub fn receive_item(&mut self, item: Item) -> Option<Order> {
        if !self.part_catalogue.contains(item.part()) {
            tracing::warn!("Rejected {}: unknown part", item);
            return None;
        }
        let Some(depot) = self.receive_depot_policy.assign(&item, &self.warehouse) else {
            tracing::info!("Rejected {}: no receive depot capacity", item.part());
            return None;
        };

        if let Err(err) = self.deposit(item.clone(), depot) {
            tracing::warn!("Receive depot policy chose unusable tile {}: {}", depot, err);
            return None;
        }
        self.inventory.record(item.clone(), depot);

        let order = Order::place(self.next_order_id(), depot, item, self.current_tick);
        tracing::info!("Created {}", order);
        self.orders.add_order(order.clone());
        Some(order)
    }

    /// Queue the work of moving a racked item to a ship depot
    ///
    /// `Ok(None)` when no ship depot has room. Fails with `ItemNotFound`
    /// if the item is not currently on a rack and with `ShipmentPending` if
    /// a ship order for it is already queued.
    pub fn ship_item(&mut self, item_id: ItemId) -> Result<Option<Order>> {
        let rack = self
            .inventory
            .location(item_id)
            .filter(|loc| {
                self.warehouse
                    .tile(*loc)
                    .is_ok_and(|t| t.tile_type() == TileType::Rack)
            })
            .ok_or(WarehouseError::ItemNotFound(item_id))?;
        let item = self
            .inventory
            .get(item_id)
            .cloned()
            .ok_or(WarehouseError::ItemNotFound(item_id))?;
        if self
            .orders
            .iter()
            .any(|o| o.kind() == OrderKind::Ship && o.item().id() == item_id)
        {
            return Err(WarehouseError::ShipmentPending(item_id));
        }

        let Some(depot) = self.ship_depot_policy.assign(&item, &self.warehouse) else {
            tracing::info!("Cannot ship {}: no ship depot capacity", item.part());
            return Ok(None);
        };

        let order = Order::ship(self.next_order_id(), rack, depot, item, self.current_tick);
        tracing::info!("Created {}", order);
        self.orders.add_order(order.clone());
        Ok(Some(order))
    }

    // === Execution ===

    /// Pop the oldest order, carry out its item movement and return it completed
    ///
    /// A place order moves the item from its depot onto the rack picked by
    /// the rack policy. A ship order moves the item onto its ship depot,
    /// falling back to the ship depot policy if that depot has filled up
    /// since. Whenever the move cannot happen (no room anywhere, or the item
    /// is no longer at the order's source) the order still completes, with
    /// no destination, and the item stays where it is. The only error is
    /// `EmptyOrderQueue`.
    pub fn complete_order(&mut self) -> Result<Order> {
        let mut order = self.orders.complete_order()?;
        let item_id = order.item().id();

        if !self.holds(order.source(), item_id) {
            tracing::warn!(
                "{} completed without moving anything: item {} is no longer at {}",
                order.id(),
                item_id,
                order.source()
            );
            order.clear_destination();
            tracing::info!("Completed {}", order);
            return Ok(order);
        }

        let destination = match order.kind() {
            OrderKind::Place => self.rack_policy.assign(order.item(), &self.warehouse),
            OrderKind::Ship => order
                .destination()
                .filter(|depot| self.has_room(*depot))
                .or_else(|| self.ship_depot_policy.assign(order.item(), &self.warehouse)),
        };

        match destination {
            Some(dest) => match self.transfer(item_id, order.source(), dest) {
                Ok(()) => order.set_destination(dest),
                Err(err) => {
                    tracing::warn!(
                        "{} completed without moving {} to {}: {}",
                        order.id(),
                        item_id,
                        dest,
                        err
                    );
                    order.clear_destination();
                }
            },
            None => {
                tracing::warn!(
                    "{} completed with no {} capacity; item stays at {}",
                    order.id(),
                    match order.kind() {
                        OrderKind::Place => TileType::Rack,
                        OrderKind::Ship => TileType::ShipDepot,
                    },
                    order.source()
                );
                order.clear_destination();
            }
        }
        tracing::info!("Completed {}", order);
        Ok(order)
    }

    /// Hand everything on a ship depot to the outside world
    pub fn release_shipment(&mut self, x: i32, y: i32) -> Result<Vec<Item>> {
        let coord = TileCoord::new(x, y);
        let tile = self.warehouse.tile_at_mut(x, y)?;
        if tile.tile_type() != TileType::ShipDepot {
            return Err(WarehouseError::NotAStorageTile(coord));
        }
        let storage = tile
            .storage_mut()
            .ok_or(WarehouseError::NotAStorageTile(coord))?;

        let held: Vec<(ItemId, u32)> = storage
            .items()
            .iter()
            .map(|(item, quantity)| (item.id(), *quantity))
            .collect();
        let mut released = Vec::with_capacity(held.len());
        for (id, quantity) in held {
            released.push(storage.remove(id, quantity)?);
        }
        for item in &released {
            self.inventory.remove(item.id());
        }
        tracing::info!("Released {} items from ship depot {}", released.len(), coord);
        Ok(released)
    }

    /// Replace a tile, dropping catalogue records for any stock it held
    ///
    /// Fails with `TileInUse` while a pending order picks up from or
    /// delivers to that tile.
    pub fn replace_tile(&mut self, tile: Tile) -> Result<()> {
        let coord = tile.coord();
        if let Some(order) = self
            .orders
            .iter()
            .find(|o| o.source() == coord || o.destination() == Some(coord))
        {
            return Err(WarehouseError::TileInUse {
                coord,
                order: order.id(),
            });
        }
        let discarded: Vec<ItemId> = self
            .warehouse
            .tile(coord)?
            .storage()
            .map(|s| s.items().iter().map(|(item, _)| item.id()).collect())
            .unwrap_or_default();
        self.warehouse.set_tile(tile)?;
        for id in discarded {
            self.inventory.remove(id);
        }
        Ok(())
    }

    // === Inspection ===

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn part_catalogue(&self) -> &PartCatalogue {
        &self.part_catalogue
    }

    pub fn part_catalogue_mut(&mut self) -> &mut PartCatalogue {
        &mut self.part_catalogue
    }

    pub fn inventory(&self) -> &InventoryCatalogue {
        &self.inventory
    }

    pub fn orders(&self) -> &OrderQueue {
        &self.orders
    }

    pub fn storage_unit_at(&self, x: i32, y: i32) -> Result<&StorageUnit> {
        self.warehouse
            .tile_at(x, y)?
            .storage()
            .ok_or(WarehouseError::NotAStorageTile(TileCoord::new(x, y)))
    }

    // === Internals ===

    fn next_order_id(&mut self) -> OrderId {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        id
    }

    fn holds(&self, coord: TileCoord, id: ItemId) -> bool {
        self.warehouse
            .tile(coord)
            .ok()
            .and_then(Tile::storage)
            .is_some_and(|s| s.contains(id))
    }

    fn has_room(&self, coord: TileCoord) -> bool {
        self.warehouse
            .tile(coord)
            .ok()
            .and_then(Tile::storage)
            .is_some_and(|s| s.can_accept(1))
    }

    fn storage_mut(&mut self, coord: TileCoord) -> Result<&mut StorageUnit> {
        self.warehouse
            .tile_mut(coord)?
            .storage_mut()
            .ok_or(WarehouseError::NotAStorageTile(coord))
    }

    fn deposit(&mut self, item: Item, coord: TileCoord) -> Result<()> {
        self.storage_mut(coord)?.insert(item, 1)
    }

    /// Move one unit between storage units; the source keeps it on failure
    fn transfer(&mut self, id: ItemId, from: TileCoord, to: TileCoord) -> Result<()> {
        if !self.has_room(to) {
            let free = self.storage_mut(to)?.free_capacity();
            return Err(WarehouseError::StorageFull { requested: 1, free });
        }
        let item = self.storage_mut(from)?.remove(id, 1)?;
        self.deposit(item, to)?;
        self.inventory.relocate(id, to);
        Ok(())
    }
}
