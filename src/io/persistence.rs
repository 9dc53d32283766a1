//! JSON save and load of tilemaps
//!
//! Grid tiles are stored in an object keyed by `"x;y"`; every entry repeats
//! its position in `pos`, and a key that disagrees with it is rejected.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::io::error::{MapError, Result, WithContext};
use crate::spatial::coordinates::GridCoordinate;
use crate::spatial::tilemap::Tilemap;
use crate::spatial::tiles::{OffgridTile, Tile};

#[derive(Debug, Serialize, Deserialize)]
struct TilemapDocument {
    tilemap: BTreeMap<String, Tile>,
    offgrid: Vec<OffgridTile>,
}

impl TilemapDocument {
    fn from_tilemap(tilemap: &Tilemap) -> Self {
        Self {
            tilemap: tilemap
                .tiles()
                .map(|tile| (tile.pos.to_string(), *tile))
                .collect(),
            offgrid: tilemap.offgrid().to_vec(),
        }
    }

    fn into_tilemap(self, path: &Path) -> Result<Tilemap> {
        let malformed = |reason: String| MapError::MalformedTilemap {
            path: path.to_path_buf(),
            reason,
        };

        let mut tiles = BTreeMap::new();
        for (key, tile) in self.tilemap {
            let coord = key
                .parse::<GridCoordinate>()
                .map_err(|e| malformed(e.to_string()))?;
            if coord != tile.pos {
                return Err(malformed(format!(
                    "key '{key}' does not match tile position {}",
                    tile.pos
                )));
            }
            tiles.insert(coord, tile);
        }

        Ok(Tilemap::from_parts(tiles, self.offgrid))
    }
}

impl Tilemap {
    /// Serialize to the persisted JSON form
    ///
    /// # Errors
    ///
    /// Returns `MapError::Serialization` if encoding fails
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&TilemapDocument::from_tilemap(self))?)
    }

    /// Parse the persisted JSON form
    ///
    /// # Errors
    ///
    /// Returns `MapError::Serialization` for invalid JSON, missing fields or
    /// unknown kinds, and `MapError::MalformedTilemap` for bad keys
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: TilemapDocument = serde_json::from_str(json)?;
        document.into_tilemap(Path::new("<string>"))
    }

    /// Write the tilemap to a JSON file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }

        let json = self.to_json_string().with_path(path, "serialize tilemap")?;
        fs::write(path, json).with_path(path, "write tilemap")?;
        debug!("saved {} tiles to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a tilemap from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid tilemap
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_path(path, "read tilemap")?;
        let document: TilemapDocument =
            serde_json::from_str(&json).with_path(path, "parse tilemap")?;
        let tilemap = document.into_tilemap(path)?;
        debug!("loaded {} tiles from {}", tilemap.len(), path.display());
        Ok(tilemap)
    }
}
