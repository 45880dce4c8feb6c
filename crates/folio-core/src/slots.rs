//! Generational slot storage behind the browser host's `NodeId`s.

use crate::host::NodeId;

const INDEX_BITS: u32 = 20;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;
const GENERATION_MASK: u32 = u32::MAX >> INDEX_BITS;

struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// Values addressed by `NodeId`. An id packs a slot index (low 20 bits) with
/// the slot's generation, so an id kept past `remove` goes stale instead of
/// aliasing whatever reuses the slot.
pub struct Slots<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    fn unpack(node: NodeId) -> (usize, u32) {
        ((node.0 & INDEX_MASK) as usize, node.0 >> INDEX_BITS)
    }

    pub fn insert(&mut self, value: T) -> NodeId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    value: None,
                    generation: 0,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        NodeId((slot.generation << INDEX_BITS) | index)
    }

    pub fn get(&self, node: NodeId) -> Option<&T> {
        let (index, generation) = Self::unpack(node);
        self.slots
            .get(index)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Frees the slot for reuse. Stale ids are ignored.
    pub fn remove(&mut self, node: NodeId) -> Option<T> {
        let (index, generation) = Self::unpack(node);
        let slot = self
            .slots
            .get_mut(index)
            .filter(|slot| slot.generation == generation && slot.value.is_some())?;
        let value = slot.value.take();
        slot.generation = (slot.generation + 1) & GENERATION_MASK;
        self.free.push(index as u32);
        value
    }

    /// Slots allocated so far, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
