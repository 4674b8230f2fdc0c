/// Node indices are stored as `u8`
pub const MAX_CAPACITY: usize = u8::MAX as usize;

/// Stable address of a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeIdx(u8);

impl From<NodeIdx> for usize {
    fn from(idx: NodeIdx) -> usize {
        idx.0.into()
    }
}

/// Doubly-linked list node
pub struct Node<T> {
    pub value: T,
    pub left: Option<NodeIdx>,
    pub right: Option<NodeIdx>,
}

/// Fixed-capacity node arena with a stack of free slots
///
/// Allocation takes the slot on top of the free stack, release pushes the slot back, so
/// both are O(1) and the most recently released slot is reused first.
pub struct NodePool<T, const N: usize> {
    nodes: [Option<Node<T>>; N],
    free: [NodeIdx; N],
    used: usize,
    peak: usize,
}

impl<T, const N: usize> NodePool<T, N> {
    const ASSERT_CAPACITY: () = core::assert!(N <= MAX_CAPACITY);

    pub fn new() -> Self {
        let () = Self::ASSERT_CAPACITY;
        Self {
            nodes: core::array::from_fn(|_| None),
            free: core::array::from_fn(|i| NodeIdx(unwrap!(u8::try_from(i)))),
            used: 0,
            peak: 0,
        }
    }

    /// Drops every allocated value and returns all slots to the free stack.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn in_use(&self) -> usize {
        self.used
    }

    pub fn available(&self) -> usize {
        N - self.used
    }

    /// Largest number of simultaneously allocated nodes
    ///
    /// The mark drops back to zero as soon as it reaches the pool capacity, so it flags
    /// saturation rather than recording a historical maximum.
    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn allocate(&mut self, value: T) -> Result<NodeIdx, T> {
        if self.used == N {
            return Err(value);
        }
        let idx = self.free[self.used];
        self.used += 1;

        if self.used > self.peak {
            self.peak = self.used;
        }
        if self.peak == N {
            self.peak = 0;
        }

        self.nodes[usize::from(idx)] = Some(Node {
            value,
            left: None,
            right: None,
        });
        Ok(idx)
    }

    /// Returns the slot to the free stack. Releasing a free slot is a no-op.
    pub fn release(&mut self, idx: NodeIdx) -> Option<T> {
        let node = self.nodes.get_mut(usize::from(idx))?.take()?;
        self.used -= 1;
        self.free[self.used] = idx;
        Some(node.value)
    }

    pub fn get(&self, idx: NodeIdx) -> Option<&Node<T>> {
        self.nodes.get(usize::from(idx))?.as_ref()
    }

    pub fn get_mut(&mut self, idx: NodeIdx) -> Option<&mut Node<T>> {
        self.nodes.get_mut(usize::from(idx))?.as_mut()
    }
}

impl<T, const N: usize> Default for NodePool<T, N> {
    fn default() -> Self {
        NodePool::new()
    }
}

impl<T, const N: usize> core::ops::Index<NodeIdx> for NodePool<T, N> {
    type Output = Node<T>;
    fn index(&self, index: NodeIdx) -> &Self::Output {
        unwrap!(self.get(index))
    }
}

impl<T, const N: usize> core::ops::IndexMut<NodeIdx> for NodePool<T, N> {
    fn index_mut(&mut self, index: NodeIdx) -> &mut Self::Output {
        unwrap!(self.get_mut(index))
    }
}
