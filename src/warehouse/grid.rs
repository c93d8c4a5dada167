//! The warehouse floor: a fixed-size grid of tiles

use crate::core::config::StorageCapacities;
use crate::core::error::{Result, WarehouseError};
use crate::core::types::TileCoord;
use crate::warehouse::tile::{Tile, TileKind, TileType};

/// Fixed-size 2D grid of tiles, stored row-major
#[derive(Debug, Clone)]
pub struct Warehouse {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    /// Bumped on every `set_tile`; routing graphs remember the value they were built from
    revision: u64,
}

impl Warehouse {
    /// An all-empty warehouse
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(WarehouseError::InvalidDimensions { width, height });
        }
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(Tile::empty(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
            revision: 0,
        })
    }

    /// Build a warehouse from ASCII rows (`.` empty, `R` rack, `D` receive
    /// depot, `S` ship depot). Row 0 is y = 0.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], capacities: &StorageCapacities) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(WarehouseError::InvalidLayout("layout has no tiles".into()));
        }

        let mut warehouse = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(WarehouseError::InvalidLayout(format!(
                    "row {} has {} tiles, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, glyph) in row.chars().enumerate() {
                let tile_type = TileType::from_glyph(glyph).ok_or_else(|| {
                    WarehouseError::InvalidLayout(format!("unknown tile '{}' at ({}, {})", glyph, x, y))
                })?;
                let kind = TileKind::from_type(tile_type, capacities.for_type(tile_type));
                let index = y * width + x;
                warehouse.tiles[index] = Tile::new(TileCoord::new(x as i32, y as i32), kind);
            }
        }
        Ok(warehouse)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Result<usize> {
        if self.contains(TileCoord::new(x, y)) {
            Ok(y as usize * self.width + x as usize)
        } else {
            Err(WarehouseError::TileOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Result<&Tile> {
        let index = self.index_of(x, y)?;
        Ok(&self.tiles[index])
    }

    /// Mutable access for storage contents; kind and coordinates stay fixed
    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> Result<&mut Tile> {
        let index = self.index_of(x, y)?;
        Ok(&mut self.tiles[index])
    }

    pub fn tile(&self, coord: TileCoord) -> Result<&Tile> {
        self.tile_at(coord.x, coord.y)
    }

    pub fn tile_mut(&mut self, coord: TileCoord) -> Result<&mut Tile> {
        self.tile_at_mut(coord.x, coord.y)
    }

    /// Replace the tile at the new tile's coordinates
    ///
    /// Whatever storage unit the old tile owned is dropped with it.
    pub fn set_tile(&mut self, tile: Tile) -> Result<()> {
        let index = self.index_of(tile.x(), tile.y())?;
        let coord = tile.coord();
        let old = std::mem::replace(&mut self.tiles[index], tile);
        if let Some(storage) = old.into_storage() {
            if !storage.is_empty() {
                tracing::debug!(
                    "Replacing tile at {} discarded {} stored units",
                    coord,
                    storage.total()
                );
            }
        }
        self.revision += 1;
        Ok(())
    }

    /// All tiles in row-major order: increasing y, then increasing x
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles_of_type(&self, tile_type: TileType) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(move |t| t.tile_type() == tile_type)
    }

    /// ASCII rendering in the same glyphs `from_rows` accepts
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(|t| t.tile_type().glyph()).collect())
            .collect()
    }
}
