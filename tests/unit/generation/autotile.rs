//! Tests for neighbor masks, variant lookup and both autotiling passes

#[cfg(test)]
mod tests {
    use platformgen::generation::autotile::{
        CORNER_UP_LEFT_VARIANT, CORNER_UP_RIGHT_VARIANT, DOWN, DOWN_RIGHT, LEFT, NeighborMask,
        RIGHT, SUBMERGED_VARIANT, UP, UP_LEFT, UP_RIGHT, autotile, autotile_grid,
        autotile_offgrid, base_variant, resolve_variant,
    };
    use platformgen::spatial::coordinates::{GridCoordinate, PixelPosition};
    use platformgen::spatial::tilemap::Tilemap;
    use platformgen::spatial::tiles::{OffgridTile, SpawnKind, Tile, TileKind};

    fn block(kind: TileKind) -> Tilemap {
        let mut tilemap = Tilemap::new();
        for x in 0..3 {
            for y in 0..3 {
                tilemap.insert(Tile::new(kind, 1, GridCoordinate::new(x, y)));
            }
        }
        tilemap
    }

    fn variant_at(tilemap: &Tilemap, x: i32, y: i32) -> Option<u8> {
        tilemap.get(GridCoordinate::new(x, y)).map(|tile| tile.variant)
    }

    // Tests the edge lookup ignores diagonals and rejects undrawn masks
    // Verified by including diagonal bits in the lookup
    #[test]
    fn test_base_variant() {
        assert_eq!(base_variant(LEFT | UP | DOWN | RIGHT), Some(8));
        assert_eq!(base_variant(RIGHT | DOWN), Some(0));
        assert_eq!(base_variant(RIGHT | DOWN | DOWN_RIGHT), Some(0));
        assert_eq!(base_variant(LEFT | RIGHT), Some(1));
        assert_eq!(base_variant(RIGHT), None);
        assert_eq!(base_variant(0), None);
    }

    // Tests corners need every other neighbor present and the diagonal empty
    // Verified by accepting a different-kind diagonal as a corner
    #[test]
    fn test_resolve_variant_corners() {
        let all = u8::MAX;
        let up_left = NeighborMask {
            present: all & !UP_LEFT,
            empty: UP_LEFT,
        };
        let up_right = NeighborMask {
            present: all & !UP_RIGHT,
            empty: UP_RIGHT,
        };
        let foreign = NeighborMask {
            present: all & !UP_LEFT,
            empty: 0,
        };

        assert_eq!(resolve_variant(up_left, 1), CORNER_UP_LEFT_VARIANT);
        assert_eq!(resolve_variant(up_right, 1), CORNER_UP_RIGHT_VARIANT);
        assert_eq!(resolve_variant(foreign, 1), 8);
        assert_eq!(resolve_variant(NeighborMask::default(), 6), 6);
    }

    // Tests masks separate same-kind, foreign and empty neighbors
    // Verified by treating foreign tiles as empty
    #[test]
    fn test_neighbor_mask() {
        let mut tilemap = block(TileKind::Grass);
        tilemap.insert(Tile::new(TileKind::Stone, 1, GridCoordinate::new(0, 0)));

        let centre = NeighborMask::around(&tilemap, GridCoordinate::new(1, 1), TileKind::Grass);
        assert_eq!(centre.present, u8::MAX & !UP_LEFT);
        assert_eq!(centre.empty, 0);

        let corner = NeighborMask::around(&tilemap, GridCoordinate::new(2, 2), TileKind::Grass);
        assert_eq!(corner.present & (LEFT | UP), LEFT | UP);
        assert_eq!(corner.empty & (RIGHT | DOWN), RIGHT | DOWN);
    }

    // Tests a solid block gets interior and edge variants
    // Verified by swapping the left and right edge variants
    #[test]
    fn test_grid_block_variants() {
        let mut tilemap = block(TileKind::Stone);
        autotile_grid(&mut tilemap);

        let expected = [
            ((0, 0), 0),
            ((1, 0), 1),
            ((2, 0), 2),
            ((2, 1), 3),
            ((2, 2), 4),
            ((1, 2), 5),
            ((0, 2), 6),
            ((0, 1), 7),
            ((1, 1), 8),
        ];
        for ((x, y), variant) in expected {
            assert_eq!(variant_at(&tilemap, x, y), Some(variant), "tile ({x}, {y})");
        }
    }

    // Tests a missing upper diagonal produces a concave corner
    // Verified by checking the lower diagonals
    #[test]
    fn test_grid_concave_corners() {
        let mut left = block(TileKind::Grass);
        left.remove(GridCoordinate::new(0, 0));
        autotile_grid(&mut left);
        assert_eq!(variant_at(&left, 1, 1), Some(CORNER_UP_LEFT_VARIANT));

        let mut right = block(TileKind::Grass);
        right.remove(GridCoordinate::new(2, 0));
        autotile_grid(&mut right);
        assert_eq!(variant_at(&right, 1, 1), Some(CORNER_UP_RIGHT_VARIANT));
    }

    // Tests tiles under water are submerged but spawnpoints keep their kind
    // Verified by autotiling spawnpoints under water
    #[test]
    fn test_grid_submerged_tiles() {
        let mut tilemap = Tilemap::new();
        tilemap.insert(Tile::new(TileKind::Water, 1, GridCoordinate::new(0, 0)));
        tilemap.insert(Tile::new(TileKind::Grass, 1, GridCoordinate::new(0, 1)));
        tilemap.insert(Tile::new(TileKind::Water, 2, GridCoordinate::new(1, 0)));
        tilemap.insert(Tile::spawnpoint(SpawnKind::Chest, GridCoordinate::new(1, 1)));

        autotile_grid(&mut tilemap);

        assert_eq!(variant_at(&tilemap, 0, 1), Some(SUBMERGED_VARIANT));
        assert_eq!(variant_at(&tilemap, 1, 1), Some(SpawnKind::Chest.variant()));
        assert_eq!(variant_at(&tilemap, 1, 0), Some(2));
    }

    // Tests clumps are stitched and moved behind other off-grid tiles in reverse
    // Verified by keeping clumps in their original order
    #[test]
    fn test_offgrid_clumps() {
        let decor = OffgridTile::new(TileKind::Decor, 4, PixelPosition::new(100, 100));
        let clump = |x, y| OffgridTile::new(TileKind::BgGrass, 1, PixelPosition::new(x, y));

        let mut tilemap = Tilemap::new();
        tilemap.push_offgrid(decor);
        for (x, y) in [(0, 0), (16, 0), (0, 16), (16, 16)] {
            tilemap.push_offgrid(clump(x, y));
        }

        autotile_offgrid(&mut tilemap);

        let expected = vec![
            OffgridTile::new(TileKind::BgGrass, 4, PixelPosition::new(16, 16)),
            OffgridTile::new(TileKind::BgGrass, 6, PixelPosition::new(0, 16)),
            OffgridTile::new(TileKind::BgGrass, 2, PixelPosition::new(16, 0)),
            OffgridTile::new(TileKind::BgGrass, 0, PixelPosition::new(0, 0)),
            decor,
        ];
        assert_eq!(tilemap.offgrid(), expected.as_slice());
    }

    // Tests the combined pass touches both layers
    // Verified by skipping the off-grid pass
    #[test]
    fn test_autotile_both_layers() {
        let mut tilemap = block(TileKind::GrassyStone);
        tilemap.push_offgrid(OffgridTile::new(TileKind::BgGrass, 1, PixelPosition::new(0, 0)));
        tilemap.push_offgrid(OffgridTile::new(TileKind::BgGrass, 1, PixelPosition::new(16, 0)));

        autotile(&mut tilemap);

        assert_eq!(variant_at(&tilemap, 1, 1), Some(8));
        let variants: Vec<u8> = tilemap.offgrid().iter().map(|tile| tile.variant).collect();
        // Only a left neighbor draws an edge; a lone right neighbor keeps the variant
        assert_eq!(variants, vec![2, 1]);
    }
}
