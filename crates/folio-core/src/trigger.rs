use crate::host::NodeId;
use std::cell::RefCell;
use std::collections::HashSet;

/// Remembers which elements already ran a one-shot action.
#[derive(Debug, Default)]
pub struct OneShot {
    fired: RefCell<HashSet<NodeId>>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once per node: the first time it is seen.
    pub fn fire(&self, node: NodeId) -> bool {
        self.fired.borrow_mut().insert(node)
    }

    pub fn has_fired(&self, node: NodeId) -> bool {
        self.fired.borrow().contains(&node)
    }

    pub fn len(&self) -> usize {
        self.fired.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.borrow().is_empty()
    }
}
