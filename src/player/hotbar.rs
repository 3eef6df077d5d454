use crate::core::{BlockType, VoxelError, VoxelResult};

/// Which block type is equipped for placement.
///
/// The slot table is fixed at construction; the only transition is
/// [`select`](Hotbar::select), so `index` is always a valid slot.
#[derive(Debug, Clone)]
pub struct Hotbar {
    slots: Vec<BlockType>,
    index: usize,
}

impl Hotbar {
    pub fn new(slots: Vec<BlockType>) -> VoxelResult<Self> {
        if slots.is_empty() {
            return Err(VoxelError::InvalidConfig(
                "hotbar needs at least one slot".to_string(),
            ));
        }
        Ok(Self { slots, index: 0 })
    }

    pub fn select(&mut self, index: usize) -> VoxelResult<()> {
        if index >= self.slots.len() {
            return Err(VoxelError::IndexOutOfRange {
                index,
                slot_count: self.slots.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Number keys are 1-based: key `1` picks slot 0.
    pub fn select_key(&mut self, digit: u8) -> VoxelResult<()> {
        // there is no key before `1`; report it as slot 0 being out of reach
        let Some(index) = (digit as usize).checked_sub(1) else {
            return Err(VoxelError::IndexOutOfRange {
                index: 0,
                slot_count: self.slots.len(),
            });
        };
        self.select(index)
    }

    /// Moves the selection by `delta`, wrapping at both ends.
    pub fn cycle(&mut self, delta: i32) {
        let count = self.slots.len() as i64;
        self.index = (self.index as i64 + delta as i64).rem_euclid(count) as usize;
    }

    pub fn current(&self) -> BlockType {
        self.slots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[BlockType] {
        &self.slots
    }
}
