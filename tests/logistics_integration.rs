//! Integration tests for the logistics pipeline
//!
//! These tests drive the controller end to end:
//! - Intake (receive item -> depot storage -> place order)
//! - Order execution (place order -> rack, ship order -> ship depot)
//! - Queue ordering under equal and mixed creation ticks
//! - Configuration-driven setup

use warehouse_logistics::core::config::{LogisticsConfig, StorageCapacities};
use warehouse_logistics::core::types::TileCoord;
use warehouse_logistics::core::WarehouseError;
use warehouse_logistics::inventory::{Item, Part, PartCatalogue, PartId};
use warehouse_logistics::logistics::{
    AssignmentPolicy, BasicAssignmentPolicy, Order, OrderId, OrderKind, OrderQueue,
};
use warehouse_logistics::warehouse::{Tile, TileType, Warehouse, WarehouseController};

fn capacities(rack: u32, receive_depot: u32, ship_depot: u32) -> StorageCapacities {
    StorageCapacities {
        rack,
        receive_depot,
        ship_depot,
    }
}

fn produce() -> PartCatalogue {
    let mut parts = PartCatalogue::new();
    parts
        .register(Part::new("cucumber", "Cucumber", "A Vegetable"))
        .unwrap();
    parts.register(Part::new("banana", "Banana", "A Fruit")).unwrap();
    parts
}

// ============================================================================
// Intake
// ============================================================================

/// A depot with room for one item accepts exactly one
#[test]
fn test_receive_until_depot_exhausted() {
    let warehouse = Warehouse::from_rows(&["DR"], &capacities(1, 1, 1)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    let first = controller.receive_item(Item::new("cucumber"));
    assert!(first.is_some());

    let second = controller.receive_item(Item::new("cucumber"));
    assert!(second.is_none(), "Depot is full, second item must be rejected");
    assert_eq!(controller.orders().len(), 1);
}

/// Freeing depot space by completing the place order reopens intake
#[test]
fn test_completing_order_frees_depot() {
    let warehouse = Warehouse::from_rows(&["DR"], &capacities(1, 1, 1)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    controller.receive_item(Item::new("cucumber")).unwrap();
    assert!(controller.receive_item(Item::new("banana")).is_none());

    controller.complete_order().unwrap();
    assert!(controller.storage_unit_at(0, 0).unwrap().is_empty());
    assert!(controller.receive_item(Item::new("banana")).is_some());
}

/// Items created from the part catalogue carry the part id through the pipeline
#[test]
fn test_catalogue_items_flow_to_racks() {
    let warehouse = Warehouse::from_rows(&["D.RR"], &capacities(1, 4, 1)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    let cucumber = controller
        .part_catalogue()
        .create_item(&PartId::from("cucumber"))
        .unwrap();
    let banana = controller
        .part_catalogue()
        .create_item(&PartId::from("banana"))
        .unwrap();
    controller.receive_item(cucumber.clone()).unwrap();
    controller.receive_item(banana.clone()).unwrap();

    let first = controller.complete_order().unwrap();
    let second = controller.complete_order().unwrap();
    assert_eq!(first.item().part().as_str(), "cucumber");
    assert_eq!(first.destination(), Some(TileCoord::new(2, 0)));
    assert_eq!(second.item().part().as_str(), "banana");
    assert_eq!(second.destination(), Some(TileCoord::new(3, 0)));

    let located: Vec<_> = controller
        .inventory()
        .items()
        .into_iter()
        .map(|(item, at)| (item.id(), at))
        .collect();
    assert!(located.contains(&(cucumber.id(), TileCoord::new(2, 0))));
    assert!(located.contains(&(banana.id(), TileCoord::new(3, 0))));
}

/// Unknown parts are refused before any item exists
#[test]
fn test_unknown_part_rejected() {
    let parts = produce();
    assert!(matches!(
        parts.create_item(&PartId::from("durian")),
        Err(WarehouseError::UnknownPart(_))
    ));
}

/// Hand-built items for unregistered parts never reach a depot
#[test]
fn test_intake_refuses_unregistered_part() {
    let warehouse = Warehouse::from_rows(&["DR"], &capacities(1, 1, 1)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    assert!(controller.receive_item(Item::new("durian")).is_none());
    assert!(controller.orders().is_empty());
    assert!(controller.inventory().is_empty());

    // The depot slot is still free for a known part
    assert!(controller.receive_item(Item::new("banana")).is_some());
}

// ============================================================================
// Order Queue
// ============================================================================

/// Orders created on the same tick complete in insertion order
#[test]
fn test_equal_timestamps_complete_in_insertion_order() {
    let depot = TileCoord::new(0, 0);
    let o1 = Order::place(OrderId(1), depot, Item::new("cucumber"), 7);
    let o2 = Order::place(OrderId(2), depot, Item::new("banana"), 7);
    let (i1, i2) = (o1.item().id(), o2.item().id());

    let mut queue = OrderQueue::new();
    queue.add_order(o1);
    queue.add_order(o2);

    assert_eq!(queue.complete_order().unwrap().item().id(), i1);
    assert_eq!(queue.complete_order().unwrap().item().id(), i2);
}

/// An empty queue is an ordinary, recoverable outcome
#[test]
fn test_empty_queue_reports_no_order() {
    let mut queue = OrderQueue::new();
    assert!(matches!(
        queue.complete_order(),
        Err(WarehouseError::EmptyOrderQueue)
    ));

    let warehouse = Warehouse::new(2, 2).unwrap();
    let mut controller = WarehouseController::new(warehouse, PartCatalogue::new());
    assert!(matches!(
        controller.complete_order(),
        Err(WarehouseError::EmptyOrderQueue)
    ));
}

/// The controller clock orders work even when orders arrive out of tick order
#[test]
fn test_controller_orders_follow_clock() {
    let warehouse = Warehouse::from_rows(&["DDD", "RRR"], &capacities(5, 5, 1)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    controller.set_tick(30);
    let late = controller.receive_item(Item::new("cucumber")).unwrap();
    controller.set_tick(10);
    let early = controller.receive_item(Item::new("banana")).unwrap();

    assert_eq!(controller.complete_order().unwrap().id(), early.id());
    assert_eq!(controller.complete_order().unwrap().id(), late.id());
}

// ============================================================================
// Shipping
// ============================================================================

/// Full round trip: receive, rack, ship, release
#[test]
fn test_receive_store_ship_release() {
    let warehouse = Warehouse::from_rows(&["D...", ".RR.", "...S"], &capacities(2, 2, 2)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    let item = Item::new("cucumber").with_metadata("lot", "A7");
    controller.receive_item(item.clone()).unwrap();
    let placed = controller.complete_order().unwrap();
    assert_eq!(placed.destination(), Some(TileCoord::new(1, 1)));

    controller.advance(5);
    let ship = controller.ship_item(item.id()).unwrap().unwrap();
    assert_eq!(ship.kind(), OrderKind::Ship);
    assert_eq!(ship.created_at(), 5);

    let shipped = controller.complete_order().unwrap();
    assert!(shipped.is_complete());
    assert_eq!(shipped.destination(), Some(TileCoord::new(3, 2)));

    let released = controller.release_shipment(3, 2).unwrap();
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].metadata("lot"), Some("A7"));
    assert!(controller.inventory().is_empty());
}

/// A racked item can only have one ship order in flight
#[test]
fn test_duplicate_ship_request_refused() {
    let warehouse = Warehouse::from_rows(&["D.R.S"], &capacities(2, 2, 2)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    let item = Item::new("cucumber");
    controller.receive_item(item.clone()).unwrap();
    controller.complete_order().unwrap();

    controller.ship_item(item.id()).unwrap().unwrap();
    assert!(matches!(
        controller.ship_item(item.id()),
        Err(WarehouseError::ShipmentPending(_))
    ));

    let shipped = controller.complete_order().unwrap();
    assert_eq!(shipped.destination(), Some(TileCoord::new(4, 0)));
    assert!(matches!(
        controller.complete_order(),
        Err(WarehouseError::EmptyOrderQueue)
    ));
    assert_eq!(controller.release_shipment(4, 0).unwrap().len(), 1);
}

/// Tiles with orders still pointing at them cannot be rebuilt
#[test]
fn test_replace_tile_waits_for_pending_orders() {
    let warehouse = Warehouse::from_rows(&["D.R"], &capacities(2, 2, 2)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    let item = Item::new("cucumber");
    controller.receive_item(item.clone()).unwrap();
    assert!(matches!(
        controller.replace_tile(Tile::empty(0, 0)),
        Err(WarehouseError::TileInUse { .. })
    ));

    let placed = controller.complete_order().unwrap();
    assert_eq!(placed.destination(), Some(TileCoord::new(2, 0)));
    assert_eq!(controller.inventory().location(item.id()), Some(TileCoord::new(2, 0)));
    controller.replace_tile(Tile::empty(0, 0)).unwrap();
}

/// Releasing from anything but a ship depot fails
#[test]
fn test_release_requires_ship_depot() {
    let warehouse = Warehouse::from_rows(&["DR"], &capacities(1, 1, 1)).unwrap();
    let mut controller = WarehouseController::new(warehouse, produce());

    assert!(matches!(
        controller.release_shipment(1, 0),
        Err(WarehouseError::NotAStorageTile(_))
    ));
    assert!(matches!(
        controller.release_shipment(5, 0),
        Err(WarehouseError::TileOutOfBounds { .. })
    ));
}

// ============================================================================
// Policies & Configuration
// ============================================================================

/// Policies only ever pick tiles of their own family with spare room
#[test]
fn test_policy_respects_family_and_capacity() {
    let mut warehouse = Warehouse::from_rows(&["RDS"], &capacities(1, 1, 1)).unwrap();
    let rack = BasicAssignmentPolicy::rack();
    let item = Item::new("cucumber");

    assert_eq!(rack.assign(&item, &warehouse), Some(TileCoord::new(0, 0)));

    warehouse
        .tile_at_mut(0, 0)
        .unwrap()
        .storage_mut()
        .unwrap()
        .insert(item.clone(), 1)
        .unwrap();
    assert_eq!(rack.assign(&item, &warehouse), None);

    warehouse.set_tile(Tile::rack(1, 0, 3)).unwrap();
    assert_eq!(rack.assign(&item, &warehouse), Some(TileCoord::new(1, 0)));
}

/// A TOML config selects capacities, policies and layout together
#[test]
fn test_controller_from_toml() {
    let config = LogisticsConfig::parse(
        r#"
        [capacities]
        rack = 1
        receive_depot = 2

        [policies]
        rack = "load_balanced"

        [layout]
        rows = [
            "D.R",
            "..R",
        ]
        "#,
    )
    .unwrap();
    let mut controller = WarehouseController::from_config(&config, produce()).unwrap();

    assert_eq!(controller.warehouse().tiles_of_type(TileType::Rack).count(), 2);
    assert_eq!(controller.storage_unit_at(0, 0).unwrap().capacity(), 2);

    controller.receive_item(Item::new("cucumber")).unwrap();
    controller.receive_item(Item::new("banana")).unwrap();
    let a = controller.complete_order().unwrap();
    let b = controller.complete_order().unwrap();
    assert_ne!(a.destination(), b.destination());
}

/// Malformed config surfaces as a config error, not a panic
#[test]
fn test_bad_config_is_error() {
    assert!(matches!(
        LogisticsConfig::parse("[capacities]\nrack = \"lots\""),
        Err(WarehouseError::Config(_))
    ));
}
