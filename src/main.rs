//! Warehouse Logistics - Demo Entry Point
//!
//! Loads a layout from a TOML config, pushes a batch of items through
//! intake, completes the resulting orders and prints the route a mover
//! would walk for each item it put away.

use std::path::PathBuf;

use clap::Parser;
use warehouse_logistics::core::error::Result;
use warehouse_logistics::core::config::{LayoutConfig, LogisticsConfig};
use warehouse_logistics::inventory::{Part, PartCatalogue, PartId};
use warehouse_logistics::pathfinding::{access_points, build_graph, RouteFinder};
use warehouse_logistics::warehouse::{TileType, WarehouseController};

const DEFAULT_LAYOUT: [&str; 5] = [
    "D.......S",
    "..R.R.R..",
    "..R.R.R..",
    "..R.R.R..",
    "D.......S",
];

/// Push items through a warehouse layout and show the resulting routes
#[derive(Parser, Debug)]
#[command(name = "warehouse-logistics")]
#[command(about = "Run items through warehouse intake, storage and routing")]
struct Args {
    /// TOML config with capacities, policies and an optional layout
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of items to receive
    #[arg(long, default_value_t = 12)]
    items: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warehouse_logistics=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LogisticsConfig::load(path)?,
        None => LogisticsConfig::default(),
    };
    if config.layout.is_none() {
        tracing::info!("No layout configured, using built-in demo layout");
        config.layout = Some(LayoutConfig {
            rows: DEFAULT_LAYOUT.iter().map(|r| r.to_string()).collect(),
        });
    }

    let mut parts = PartCatalogue::new();
    parts.register(Part::new("cucumber", "Cucumber", "A Vegetable"))?;
    parts.register(Part::new("banana", "Banana", "A Fruit"))?;

    let mut controller = WarehouseController::from_config(&config, parts)?;

    println!("\n=== WAREHOUSE ===");
    for row in controller.warehouse().to_rows() {
        println!("  {}", row);
    }
    println!();

    let part_ids = ["cucumber", "banana"];
    let mut accepted = 0;
    for n in 0..args.items {
        let item = controller
            .part_catalogue()
            .create_item(&PartId::from(part_ids[n % part_ids.len()]))?
            .with_metadata("batch", (n / 4).to_string());
        if controller.receive_item(item).is_some() {
            accepted += 1;
        }
        controller.advance(1);
    }
    println!(
        "Accepted {} of {} items ({} orders queued)",
        accepted,
        args.items,
        controller.orders().len()
    );

    let mut placed = Vec::new();
    while !controller.orders().is_empty() {
        let order = controller.complete_order()?;
        println!("  {}", order);
        if let Some(dest) = order.destination() {
            placed.push((order.source(), dest));
        }
    }

    let graph = build_graph(controller.warehouse());
    let finder = RouteFinder::manhattan(&graph);
    println!("\nRouting graph: {} walkable tiles", graph.len());

    for (source, dest) in placed {
        let starts = access_points(controller.warehouse(), source)?;
        let goals = access_points(controller.warehouse(), dest)?;
        let (Some(start), Some(goal)) = (starts.first(), goals.first()) else {
            println!("  {} -> {}: unreachable (no walkable tile alongside)", source, dest);
            continue;
        };
        match finder.find_route(start, goal)? {
            Some(route) => println!(
                "  {} -> {}: {} steps via {}",
                source,
                dest,
                route.len() - 1,
                route
                    .iter()
                    .map(|n| n.coord().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            None => println!("  {} -> {}: no route", source, dest),
        }
    }

    println!("\nStorage:");
    for tile in controller.warehouse().tiles() {
        if tile.tile_type() != TileType::Empty {
            println!("  {}", tile);
        }
    }

    Ok(())
}
