//! PNG preview export: one pixel per grid cell with a transparent background

use std::path::Path;

use image::{ImageBuffer, Rgba};
use ndarray::Array2;

use crate::io::error::{MapError, Result, WithContext};
use crate::spatial::tilemap::Tilemap;
use crate::spatial::tiles::{Tile, TileKind};

/// Raster code of an empty cell
pub const EMPTY_CELL: u8 = 0;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const SPAWN_CODE_BASE: u8 = 10;

/// Raster code of a tile
///
/// Materials use 1 to 4; spawnpoints use 10 plus their spawn variant so every
/// entity kind stays distinguishable.
pub const fn cell_code(tile: &Tile) -> u8 {
    match tile.kind {
        TileKind::Grass => 1,
        TileKind::Stone => 2,
        TileKind::GrassyStone => 3,
        TileKind::Water => 4,
        TileKind::Spawnpoint => SPAWN_CODE_BASE.saturating_add(tile.variant),
        TileKind::Decor | TileKind::BgFoliage | TileKind::BgGrass => 5,
    }
}

/// Preview color of a raster code
pub const fn code_color(code: u8) -> Rgba<u8> {
    match code {
        1 => Rgba([86, 160, 60, 255]),
        2 => Rgba([120, 120, 128, 255]),
        3 => Rgba([104, 136, 92, 255]),
        4 => Rgba([58, 110, 200, 200]),
        5 => Rgba([200, 180, 90, 255]),
        10 => Rgba([255, 255, 255, 255]),
        11 => Rgba([170, 60, 220, 255]),
        12 | 13 => Rgba([240, 200, 40, 255]),
        14..=16 => Rgba([220, 40, 40, 255]),
        _ => TRANSPARENT,
    }
}

/// Rasterize the grid layer over its occupied bounding box
///
/// Rows of the array are grid rows from the top; cells without a tile hold
/// [`EMPTY_CELL`]. Returns `None` for a tilemap without grid tiles.
pub fn rasterize(tilemap: &Tilemap) -> Option<Array2<u8>> {
    let min_x = tilemap.coordinates().map(|coord| coord.x).min()?;
    let max_x = tilemap.coordinates().map(|coord| coord.x).max()?;
    let min_y = tilemap.coordinates().map(|coord| coord.y).min()?;
    let max_y = tilemap.coordinates().map(|coord| coord.y).max()?;

    let rows = (max_y - min_y + 1) as usize;
    let cols = (max_x - min_x + 1) as usize;
    let mut raster = Array2::from_elem((rows, cols), EMPTY_CELL);

    for tile in tilemap.tiles() {
        let row = (tile.pos.y - min_y) as usize;
        let col = (tile.pos.x - min_x) as usize;
        if let Some(cell) = raster.get_mut([row, col]) {
            *cell = cell_code(tile);
        }
    }

    Some(raster)
}

/// Export the grid layer as a PNG preview
///
/// # Errors
///
/// Returns an error if:
/// - The tilemap has no grid tiles
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(tilemap: &Tilemap, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    let raster = rasterize(tilemap).ok_or(MapError::EmptyTilemap {
        operation: "export preview",
    })?;

    let (rows, cols) = raster.dim();
    let img = ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| {
        raster
            .get([y as usize, x as usize])
            .map_or(TRANSPARENT, |&code| code_color(code))
    });

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    img.save(output_path)
        .map_err(|e| MapError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
