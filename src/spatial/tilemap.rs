//! Coordinate-keyed tile store shared by the generation passes
//!
//! The grid layer is a `BTreeMap` so iteration follows coordinate order
//! (column by column, top to bottom) and every pass that walks the map is
//! reproducible for a given seed. The off-grid layer is an ordered sequence
//! whose order doubles as draw order.

use std::collections::{BTreeMap, BTreeSet};

use crate::io::configuration::TILE_SIZE_PX;
use crate::spatial::coordinates::{GridCoordinate, PixelRect};
use crate::spatial::tiles::{OffgridTile, SpawnKind, Tile, TileKind};

const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Pixel extents of the occupied grid, used for camera clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEdges {
    /// Left edge of the leftmost column
    pub left: i32,
    /// Left edge of the rightmost column
    pub right: i32,
    /// Top edge of the lowest row
    pub bottom: i32,
}

/// Grid tiles plus the off-grid decoration layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tilemap {
    tiles: BTreeMap<GridCoordinate, Tile>,
    offgrid: Vec<OffgridTile>,
}

impl Tilemap {
    /// Create an empty tilemap
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tilemap from already validated parts
    pub fn from_parts(tiles: BTreeMap<GridCoordinate, Tile>, offgrid: Vec<OffgridTile>) -> Self {
        Self { tiles, offgrid }
    }

    /// Tile at a coordinate
    pub fn get(&self, coord: GridCoordinate) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// Mutable tile at a coordinate
    pub fn get_mut(&mut self, coord: GridCoordinate) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    /// Whether any tile occupies the coordinate
    pub fn contains(&self, coord: GridCoordinate) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Kind of the tile at a coordinate
    pub fn kind_at(&self, coord: GridCoordinate) -> Option<TileKind> {
        self.tiles.get(&coord).map(|tile| tile.kind)
    }

    /// Place a tile at its own position, replacing any previous occupant
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.pos, tile)
    }

    /// Remove and return the tile at a coordinate
    pub fn remove(&mut self, coord: GridCoordinate) -> Option<Tile> {
        self.tiles.remove(&coord)
    }

    /// Grid tiles in coordinate order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Occupied coordinates in order
    pub fn coordinates(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.tiles.keys().copied()
    }

    /// Number of grid tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid layer is empty
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Off-grid tiles in draw order
    pub fn offgrid(&self) -> &[OffgridTile] {
        &self.offgrid
    }

    /// Append an off-grid tile
    pub fn push_offgrid(&mut self, tile: OffgridTile) {
        self.offgrid.push(tile);
    }

    /// Replace the whole off-grid sequence
    pub fn replace_offgrid(&mut self, offgrid: Vec<OffgridTile>) {
        self.offgrid = offgrid;
    }

    /// Smallest occupied row, i.e. the highest terrain
    pub fn top_row(&self) -> Option<i32> {
        self.tiles.keys().map(|coord| coord.y).min()
    }

    /// Pixel extents of the occupied grid
    pub fn map_edges(&self) -> Option<MapEdges> {
        let left = self.tiles.keys().map(|coord| coord.x).min()?;
        let right = self.tiles.keys().map(|coord| coord.x).max()?;
        let bottom = self.tiles.keys().map(|coord| coord.y).max()?;
        Some(MapEdges {
            left: left * TILE_SIZE_PX,
            right: right * TILE_SIZE_PX,
            bottom: bottom * TILE_SIZE_PX,
        })
    }

    /// Whether the cell holds water
    pub fn is_water(&self, coord: GridCoordinate) -> bool {
        self.kind_at(coord) == Some(TileKind::Water)
    }

    /// Spawnpoint markers still present in the grid
    pub fn spawnpoints(&self) -> impl Iterator<Item = (SpawnKind, GridCoordinate)> + '_ {
        self.tiles
            .values()
            .filter_map(|tile| tile.spawn_kind().map(|kind| (kind, tile.pos)))
    }

    /// Tiles in the 3x3 neighborhood of every cell a body covers
    ///
    /// `pos` is the body's top-left pixel and `size` its extent in pixels.
    /// Bodies wider or taller than one tile probe the extra cells along that
    /// axis; each tile is returned once.
    pub fn neighbor_tiles(&self, pos: [f32; 2], size: [f32; 2]) -> Vec<&Tile> {
        let origin = GridCoordinate::containing(pos[0], pos[1]);
        let tile_size = TILE_SIZE_PX as f32;
        let extra_x = (size[0] / tile_size) as i32;
        let extra_y = (size[1] / tile_size) as i32;

        let mut probes = vec![origin];
        if size[0] > tile_size && size[1] > tile_size {
            probes.push(origin.offset(extra_x, extra_y));
        } else if size[0] > tile_size {
            probes.extend((1..=extra_x).map(|dx| origin.offset(dx, 0)));
        } else if size[1] > tile_size {
            probes.extend((1..=extra_y).map(|dy| origin.offset(0, -dy)));
        }

        let cells: BTreeSet<GridCoordinate> = probes
            .iter()
            .flat_map(|probe| {
                NEIGHBOR_OFFSETS
                    .iter()
                    .map(move |&(dx, dy)| probe.offset(dx, dy))
            })
            .collect();

        cells
            .into_iter()
            .filter_map(|cell| self.tiles.get(&cell))
            .collect()
    }

    /// Collision rectangles of physics tiles around a body
    pub fn neighbor_physics_rects(&self, pos: [f32; 2], size: [f32; 2]) -> Vec<PixelRect> {
        self.neighbor_tiles(pos, size)
            .into_iter()
            .filter(|tile| tile.kind.is_physics())
            .map(|tile| PixelRect::from_cell(tile.pos))
            .collect()
    }

    /// Whether the cells diagonally below a body's left and right edges are empty
    ///
    /// Returns `(left_open, right_open)`; patrolling entities turn around on an
    /// open side instead of walking off a ledge.
    pub fn ledge_check(&self, body: PixelRect) -> (bool, bool) {
        let column = body.x.div_euclid(TILE_SIZE_PX);
        let row = body.bottom().div_euclid(TILE_SIZE_PX) + 1;
        let left_open = !self.contains(GridCoordinate::new(column, row));
        let right_open = !self.contains(GridCoordinate::new(column + 1, row));
        (left_open, right_open)
    }

    /// Remove and return every tile whose (kind, variant) is listed
    ///
    /// Off-grid matches come first and keep their pixel positions; grid
    /// matches follow in coordinate order, converted to pixel space. With
    /// `keep` set the matches are reported but left in place.
    pub fn extract(&mut self, pairs: &[(TileKind, u8)], keep: bool) -> Vec<OffgridTile> {
        let matches_pair = |kind: TileKind, variant: u8| pairs.contains(&(kind, variant));

        let mut extracted: Vec<OffgridTile> = self
            .offgrid
            .iter()
            .filter(|tile| matches_pair(tile.kind, tile.variant))
            .copied()
            .collect();

        let grid_matches: Vec<GridCoordinate> = self
            .tiles
            .values()
            .filter(|tile| matches_pair(tile.kind, tile.variant))
            .map(|tile| tile.pos)
            .collect();

        extracted.extend(
            grid_matches
                .iter()
                .filter_map(|coord| self.tiles.get(coord))
                .map(Tile::to_pixel_space),
        );

        if !keep {
            self.offgrid
                .retain(|tile| !matches_pair(tile.kind, tile.variant));
            for coord in &grid_matches {
                self.tiles.remove(coord);
            }
        }

        extracted
    }

    /// Remove and return every spawnpoint marker
    pub fn extract_spawnpoints(&mut self) -> Vec<OffgridTile> {
        let pairs = SpawnKind::ALL.map(SpawnKind::extraction_pair);
        self.extract(&pairs, false)
    }
}
