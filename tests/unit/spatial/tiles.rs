//! Tests for tile kinds, spawn kinds and tile serialization

#[cfg(test)]
mod tests {
    use platformgen::spatial::coordinates::{GridCoordinate, PixelPosition};
    use platformgen::spatial::tiles::{SpawnKind, Tile, TileKind};

    // Tests every spawn kind survives a variant round trip
    // Verified by swapping two variant numbers
    #[test]
    fn test_spawn_variants_round_trip() {
        for (expected, kind) in SpawnKind::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(kind.variant()), expected);
            assert_eq!(SpawnKind::from_variant(kind.variant()), Some(kind));
        }
        assert_eq!(SpawnKind::from_variant(7), None);
    }

    // Tests only the three tiers count as enemies
    // Verified by including the rare chest
    #[test]
    fn test_enemy_kinds() {
        let enemies: Vec<SpawnKind> = SpawnKind::ALL
            .into_iter()
            .filter(|kind| kind.is_enemy())
            .collect();
        assert_eq!(enemies, SpawnKind::ENEMIES.to_vec());
    }

    // Tests kind classification used by autotiling and physics
    // Verified by marking water as auto-tiled
    #[test]
    fn test_kind_classification() {
        assert!(TileKind::BgGrass.is_autotiled());
        assert!(!TileKind::Water.is_autotiled());
        assert!(TileKind::Water.is_physics());
        assert!(!TileKind::Spawnpoint.is_physics());
        assert!(!TileKind::Water.is_solid());
        assert!(TileKind::SOLID.iter().all(|kind| kind.is_solid()));
    }

    // Tests tiles use the persisted field and kind names
    // Verified by removing the type rename
    #[test]
    fn test_tile_serialization_names() {
        let tile = Tile::new(TileKind::GrassyStone, 4, GridCoordinate::new(3, -1));
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(json, r#"{"type":"grassystone","variant":4,"pos":[3,-1]}"#);

        let parsed: Tile =
            serde_json::from_str(r#"{"type":"bg_grass","variant":1,"pos":[0,2]}"#).unwrap();
        assert_eq!(parsed.kind, TileKind::BgGrass);
        assert_eq!(parsed.kind.name(), "bg_grass");
    }

    // Tests spawnpoint tiles decode their entity kind
    // Verified by returning a kind for non-spawnpoint tiles
    #[test]
    fn test_spawnpoint_tiles() {
        let pos = GridCoordinate::new(4, 2);
        let marker = Tile::spawnpoint(SpawnKind::Portal, pos);
        assert_eq!(marker.kind, TileKind::Spawnpoint);
        assert_eq!(marker.variant, 1);
        assert_eq!(marker.spawn_kind(), Some(SpawnKind::Portal));
        assert_eq!(Tile::new(TileKind::Grass, 1, pos).spawn_kind(), None);
        assert_eq!(SpawnKind::RareChest.to_string(), "rare chest");
    }

    // Tests grid tiles convert to pixel space at their top-left corner
    // Verified by converting to the tile center
    #[test]
    fn test_to_pixel_space() {
        let tile = Tile::new(TileKind::Stone, 8, GridCoordinate::new(-2, 3));
        let offgrid = tile.to_pixel_space();
        assert_eq!(offgrid.kind, TileKind::Stone);
        assert_eq!(offgrid.variant, 8);
        assert_eq!(offgrid.pos, PixelPosition::new(-32, 48));
    }
}
