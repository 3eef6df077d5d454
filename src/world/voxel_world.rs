//! Sparse block storage keyed by grid coordinate
//!
//! Every mutation is a single hash-map operation, so the cost of an
//! interaction event does not depend on how large the world has grown.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::core::{BlockType, Face, VoxelCoord, VoxelError, VoxelResult};

/// World shared between the game loop (single writer) and render readers.
pub type SharedWorld = Arc<RwLock<VoxelWorld>>;

#[derive(Default, Clone, Debug)]
pub struct VoxelWorld {
    blocks: FxHashMap<VoxelCoord, BlockType>,
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn get(&self, coord: VoxelCoord) -> Option<BlockType> {
        self.blocks.get(&coord).copied()
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.blocks.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Puts `block` into an empty cell. Occupied cells are left untouched.
    pub fn place(&mut self, coord: VoxelCoord, block: BlockType) -> VoxelResult<()> {
        if self.blocks.contains_key(&coord) {
            return Err(VoxelError::Occupied(coord));
        }
        self.blocks.insert(coord, block);
        tracing::debug!("Placed {} at {}", block, coord);
        Ok(())
    }

    /// Clears a cell and hands back what was there.
    pub fn remove(&mut self, coord: VoxelCoord) -> VoxelResult<BlockType> {
        let block = self
            .blocks
            .remove(&coord)
            .ok_or(VoxelError::NotFound(coord))?;
        tracing::debug!("Removed {} at {}", block, coord);
        Ok(block)
    }

    /// Cell adjacent to `coord` across the face whose normal is `normal`.
    /// Fails with `OutOfBounds` when the step would leave the `i32` grid.
    pub fn neighbor_position(coord: VoxelCoord, normal: VoxelCoord) -> VoxelResult<VoxelCoord> {
        let step = Face::from_normal(normal)?.normal();
        let (Some(x), Some(y), Some(z)) = (
            coord.x.checked_add(step.x),
            coord.y.checked_add(step.y),
            coord.z.checked_add(step.z),
        ) else {
            return Err(VoxelError::OutOfBounds(coord));
        };
        Ok(VoxelCoord::new(x, y, z))
    }

    /// Occupied face-adjacent cells of `coord`.
    pub fn neighbors(
        &self,
        coord: VoxelCoord,
    ) -> impl Iterator<Item = (Face, VoxelCoord, BlockType)> + '_ {
        Face::ALL.into_iter().filter_map(move |face| {
            let pos = coord + face.normal();
            self.get(pos).map(|block| (face, pos, block))
        })
    }

    /// Faces of `coord` that border air. A renderer only needs to draw these.
    pub fn exposed_faces(&self, coord: VoxelCoord) -> Vec<Face> {
        Face::ALL
            .into_iter()
            .filter(|face| {
                self.get(coord + face.normal())
                    .is_none_or(|neighbor| neighbor.is_transparent())
            })
            .collect()
    }

    /// Highest occupied y in the column at (x, z). Scans the whole map.
    pub fn column_top(&self, x: i32, z: i32) -> Option<i32> {
        self.blocks
            .keys()
            .filter(|pos| pos.x == x && pos.z == z)
            .map(|pos| pos.y)
            .max()
    }

    /// Bulk insert used at startup. Cells that are already filled keep
    /// their block; returns how many entries were inserted.
    pub fn populate<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (VoxelCoord, BlockType)>,
    {
        let iter = entries.into_iter();
        self.blocks.reserve(iter.size_hint().0);

        let mut inserted = 0;
        let mut skipped = 0;
        for (coord, block) in iter {
            if self.blocks.contains_key(&coord) {
                skipped += 1;
                continue;
            }
            self.blocks.insert(coord, block);
            inserted += 1;
        }

        if skipped > 0 {
            tracing::warn!("Populate skipped {} occupied cells", skipped);
        }
        inserted
    }

    /// Every block in the world. Holding the borrow prevents mutation, so a
    /// single pass always sees a consistent set; call again to restart.
    pub fn all_blocks(&self) -> impl Iterator<Item = (VoxelCoord, BlockType)> + Clone + '_ {
        self.blocks.iter().map(|(&coord, &block)| (coord, block))
    }

    /// Owned copy of the current contents for readers on other threads.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            blocks: self.all_blocks().collect(),
        }
    }

    pub fn into_shared(self) -> SharedWorld {
        Arc::new(RwLock::new(self))
    }
}

/// Point-in-time copy of a world, unaffected by later mutations.
#[derive(Clone, Debug, Default)]
pub struct WorldSnapshot {
    blocks: Vec<(VoxelCoord, BlockType)>,
}

impl WorldSnapshot {
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, BlockType)> + Clone + '_ {
        self.blocks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<'a> IntoIterator for &'a WorldSnapshot {
    type Item = &'a (VoxelCoord, BlockType);
    type IntoIter = std::slice::Iter<'a, (VoxelCoord, BlockType)>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Takes a snapshot under the read lock.
pub fn snapshot_shared(world: &SharedWorld) -> WorldSnapshot {
    world.read().snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_place_then_get() {
        let mut world = VoxelWorld::new();
        let pos = IVec3::new(-3, 7, 12);
        world.place(pos, BlockType::Brick).unwrap();
        assert_eq!(world.get(pos), Some(BlockType::Brick));
        assert_eq!(world.get(IVec3::ZERO), None);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_remove_twice_fails() {
        let mut world = VoxelWorld::new();
        let pos = IVec3::new(1, 2, 3);
        world.place(pos, BlockType::Glass).unwrap();

        assert_eq!(world.remove(pos), Ok(BlockType::Glass));
        assert_eq!(world.get(pos), None);
        assert_eq!(world.remove(pos), Err(VoxelError::NotFound(pos)));
        assert!(world.is_empty());
    }

    #[test]
    fn test_place_on_occupied_keeps_original() {
        let mut world = VoxelWorld::new();
        let pos = IVec3::new(0, 0, 0);
        world.place(pos, BlockType::Stone).unwrap();

        assert_eq!(
            world.place(pos, BlockType::Diamond),
            Err(VoxelError::Occupied(pos))
        );
        assert_eq!(world.get(pos), Some(BlockType::Stone));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_neighbor_position() {
        assert_eq!(
            VoxelWorld::neighbor_position(IVec3::ZERO, IVec3::Y),
            Ok(IVec3::new(0, 1, 0))
        );
        assert_eq!(
            VoxelWorld::neighbor_position(IVec3::new(2, 3, 4), IVec3::NEG_X),
            Ok(IVec3::new(1, 3, 4))
        );
        let bad = IVec3::new(0, 1, 1);
        assert_eq!(
            VoxelWorld::neighbor_position(IVec3::ZERO, bad),
            Err(VoxelError::InvalidNormal(bad))
        );
    }

    #[test]
    fn test_neighbor_position_at_grid_edge() {
        let top = IVec3::new(0, i32::MAX, 0);
        assert_eq!(
            VoxelWorld::neighbor_position(top, IVec3::Y),
            Err(VoxelError::OutOfBounds(top))
        );
        assert_eq!(
            VoxelWorld::neighbor_position(top, IVec3::NEG_Y),
            Ok(IVec3::new(0, i32::MAX - 1, 0))
        );
        let corner = IVec3::splat(i32::MIN);
        assert_eq!(
            VoxelWorld::neighbor_position(corner, IVec3::NEG_X),
            Err(VoxelError::OutOfBounds(corner))
        );
        assert_eq!(
            VoxelWorld::neighbor_position(corner, IVec3::Z),
            Ok(IVec3::new(i32::MIN, i32::MIN, i32::MIN + 1))
        );
    }

    #[test]
    fn test_neighbors_and_exposed_faces() {
        let mut world = VoxelWorld::new();
        let center = IVec3::new(5, 5, 5);
        world.place(center, BlockType::Stone).unwrap();
        world.place(center + IVec3::Y, BlockType::Dirt).unwrap();
        world.place(center + IVec3::X, BlockType::Glass).unwrap();

        let found: HashSet<Face> = world.neighbors(center).map(|(face, _, _)| face).collect();
        assert_eq!(found, HashSet::from([Face::PosY, Face::PosX]));

        let exposed = world.exposed_faces(center);
        assert!(!exposed.contains(&Face::PosY));
        // glass lets the face show through
        assert!(exposed.contains(&Face::PosX));
        assert_eq!(exposed.len(), 5);
    }

    #[test]
    fn test_column_top() {
        let mut world = VoxelWorld::new();
        world.place(IVec3::new(1, 0, 1), BlockType::Stone).unwrap();
        world.place(IVec3::new(1, 4, 1), BlockType::Leaf).unwrap();
        world.place(IVec3::new(2, 9, 1), BlockType::Leaf).unwrap();
        assert_eq!(world.column_top(1, 1), Some(4));
        assert_eq!(world.column_top(0, 0), None);
    }

    #[test]
    fn test_populate_skips_occupied() {
        let mut world = VoxelWorld::new();
        world.place(IVec3::ZERO, BlockType::Diamond).unwrap();

        let inserted = world.populate(vec![
            (IVec3::ZERO, BlockType::Grass),
            (IVec3::X, BlockType::Grass),
            (IVec3::Z, BlockType::Dirt),
        ]);
        assert_eq!(inserted, 2);
        assert_eq!(world.get(IVec3::ZERO), Some(BlockType::Diamond));
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_all_blocks_is_restartable() {
        let mut world = VoxelWorld::new();
        for x in 0..10 {
            world.place(IVec3::new(x, 0, 0), BlockType::Plank).unwrap();
        }
        let iter = world.all_blocks();
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first.len(), 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_is_isolated_from_mutation() {
        let mut world = VoxelWorld::new();
        world.place(IVec3::ZERO, BlockType::Grass).unwrap();
        let snapshot = world.snapshot();

        world.place(IVec3::ONE, BlockType::Grass).unwrap();
        world.remove(IVec3::ZERO).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.iter().collect::<Vec<_>>(),
            vec![(IVec3::ZERO, BlockType::Grass)]
        );
        assert_eq!((&snapshot).into_iter().count(), 1);
    }

    #[test]
    fn test_shared_readers_see_whole_mutations() {
        let shared = VoxelWorld::new().into_shared();

        let reader = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = snapshot_shared(&shared);
                    // writer always inserts pairs, so a reader never sees an odd count
                    assert_eq!(snapshot.len() % 2, 0);
                }
            })
        };

        for x in 0..200 {
            let mut world = shared.write();
            world.place(IVec3::new(x, 0, 0), BlockType::Stone).unwrap();
            world.place(IVec3::new(x, 1, 0), BlockType::Grass).unwrap();
        }

        reader.join().unwrap();
        assert_eq!(shared.read().len(), 400);
    }
}
