use crate::core::MessageId;
use crate::utils::{NodeIdx, NodePool};

struct Keyed<T> {
    key: MessageId,
    value: T,
}

/// Doubly-linked list ordered ascending by message identifier
///
/// The head holds the lowest identifier, i.e. the frame that would win bus arbitration.
/// A new entry is placed ahead of entries with an equal identifier, so among equal
/// identifiers the most recently inserted one is served first.
///
/// Insertion walks the list from the head: O(n) with n bounded by the pool capacity.
/// Head access and removal are O(1).
pub struct PendingList<T, const N: usize> {
    pool: NodePool<Keyed<T>, N>,
    head: Option<NodeIdx>,
}

impl<T, const N: usize> PendingList<T, N> {
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            head: None,
        }
    }

    pub fn clear(&mut self) {
        self.pool.reset();
        self.head = None;
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.pool.in_use()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Saturation-resetting high-water mark of the list length, see [`NodePool::peak`]
    pub fn peak_len(&self) -> usize {
        self.pool.peak()
    }

    /// Inserts the value in identifier order. Returns the value back if no node is left.
    pub fn insert(&mut self, key: MessageId, value: T) -> Result<(), T> {
        let new = self
            .pool
            .allocate(Keyed { key, value })
            .map_err(|entry| entry.value)?;

        let Some(head) = self.head else {
            self.head = Some(new);
            return Ok(());
        };

        if key <= self.pool[head].value.key {
            self.pool[head].left = Some(new);
            self.pool[new].right = Some(head);
            self.head = Some(new);
            return Ok(());
        }

        let mut current = head;
        loop {
            let Some(right) = self.pool[current].right else {
                // The new entry has the highest identifier in the list
                self.pool[current].right = Some(new);
                self.pool[new].left = Some(current);
                return Ok(());
            };
            current = right;
            if key <= self.pool[current].value.key {
                break;
            }
        }

        let left = unwrap!(self.pool[current].left);
        self.pool[current].left = Some(new);
        self.pool[left].right = Some(new);
        self.pool[new].left = Some(left);
        self.pool[new].right = Some(current);
        Ok(())
    }

    pub fn head(&self) -> Option<(MessageId, &T)> {
        let entry = &self.pool[self.head?].value;
        Some((entry.key, &entry.value))
    }

    /// Removes the head and releases its node
    pub fn pop_head(&mut self) -> Option<(MessageId, T)> {
        let head = self.head?;
        let right = self.pool[head].right;
        let entry = unwrap!(self.pool.release(head));
        if let Some(right) = right {
            self.pool[right].left = None;
        }
        self.head = right;
        Some((entry.key, entry.value))
    }

    /// Iterates from the head towards higher identifiers
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            list: self,
            next: self.head,
        }
    }
}

impl<T, const N: usize> Default for PendingList<T, N> {
    fn default() -> Self {
        PendingList::new()
    }
}

pub struct Iter<'a, T, const N: usize> {
    list: &'a PendingList<T, N>,
    next: Option<NodeIdx>,
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = (MessageId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.list.pool[self.next?];
        self.next = node.right;
        Some((node.value.key, &node.value.value))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn id(value: u16) -> MessageId {
        MessageId::new(value).unwrap()
    }

    fn contents<const N: usize>(list: &PendingList<u32, N>) -> Vec<(u16, u32)> {
        list.iter()
            .map(|(key, value)| (key.into_u16(), *value))
            .collect()
    }

    #[test]
    fn test_empty() {
        let mut list = PendingList::<u32, 4>::new();
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.pop_head(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_ascending_order() {
        let mut list = PendingList::<u32, 8>::new();
        list.insert(id(0x30), 0).unwrap();
        list.insert(id(0x10), 1).unwrap();
        list.insert(id(0x50), 2).unwrap();
        list.insert(id(0x20), 3).unwrap();
        list.insert(id(0x40), 4).unwrap();

        assert_eq!(
            contents(&list),
            [(0x10, 1), (0x20, 3), (0x30, 0), (0x40, 4), (0x50, 2)]
        );
        assert_eq!(list.head(), Some((id(0x10), &1)));
    }

    #[test]
    fn test_equal_id_newest_first() {
        let mut list = PendingList::<u32, 8>::new();
        list.insert(id(0x10), 0).unwrap();
        list.insert(id(0x20), 1).unwrap();
        list.insert(id(0x20), 2).unwrap();
        list.insert(id(0x10), 3).unwrap();
        list.insert(id(0x20), 4).unwrap();

        assert_eq!(
            contents(&list),
            [(0x10, 3), (0x10, 0), (0x20, 4), (0x20, 2), (0x20, 1)]
        );
    }

    #[test]
    fn test_pop_head() {
        let mut list = PendingList::<u32, 4>::new();
        list.insert(id(0x02), 2).unwrap();
        list.insert(id(0x01), 1).unwrap();
        list.insert(id(0x03), 3).unwrap();

        assert_eq!(list.pop_head(), Some((id(0x01), 1)));
        assert_eq!(list.pop_head(), Some((id(0x02), 2)));
        assert_eq!(list.len(), 1);

        // The list stays consistent after removals
        list.insert(id(0x00), 0).unwrap();
        assert_eq!(contents(&list), [(0x00, 0), (0x03, 3)]);

        assert_eq!(list.pop_head(), Some((id(0x00), 0)));
        assert_eq!(list.pop_head(), Some((id(0x03), 3)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_exhausted() {
        let mut list = PendingList::<u32, 2>::new();
        list.insert(id(0x01), 1).unwrap();
        list.insert(id(0x02), 2).unwrap();
        assert_eq!(list.insert(id(0x00), 0), Err(0));
        assert_eq!(contents(&list), [(0x01, 1), (0x02, 2)]);

        list.pop_head();
        list.insert(id(0x00), 0).unwrap();
        assert_eq!(contents(&list), [(0x00, 0), (0x02, 2)]);
    }

    #[test]
    fn test_clear() {
        let mut list = PendingList::<u32, 2>::new();
        list.insert(id(0x01), 1).unwrap();
        list.insert(id(0x02), 2).unwrap();
        assert_eq!(list.peak_len(), 0);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        list.insert(id(0x03), 3).unwrap();
        assert_eq!(list.peak_len(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::vec::Vec;

        const NODES: usize = 96;

        fn message_id() -> impl Strategy<Value = MessageId> {
            (0u16..=0x7ff).prop_map(MessageId::from_u16_truncating)
        }

        proptest! {
            #[test]
            fn insert_keeps_order(ids in prop::collection::vec(message_id(), 0..=NODES)) {
                let mut list = PendingList::<usize, NODES>::new();
                for (seq, id) in ids.iter().enumerate() {
                    prop_assert!(list.insert(*id, seq).is_ok());

                    let entries: Vec<(MessageId, usize)> =
                        list.iter().map(|(id, seq)| (id, *seq)).collect();
                    prop_assert_eq!(entries.len(), seq + 1);
                    for pair in entries.windows(2) {
                        let (left, right) = (pair[0], pair[1]);
                        prop_assert!(left.0 <= right.0);
                        if left.0 == right.0 {
                            // Newest of equal identifiers first
                            prop_assert!(left.1 > right.1);
                        }
                    }
                }
            }

            #[test]
            fn pop_head_in_order(ids in prop::collection::vec(message_id(), 0..=NODES)) {
                let mut list = PendingList::<(), NODES>::new();
                for id in &ids {
                    prop_assert!(list.insert(*id, ()).is_ok());
                }

                let mut expected = ids.clone();
                expected.sort();
                let mut popped = Vec::new();
                while let Some((id, ())) = list.pop_head() {
                    popped.push(id);
                }
                prop_assert_eq!(popped, expected);
                prop_assert!(list.is_empty());
            }
        }
    }
}
