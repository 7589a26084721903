//! Fixed-capacity tables keyed by identifier.

use super::id::Id;
use std::marker::PhantomData;
use thiserror::Error;

/// An identifier whose index does not fit the table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("identifier index {index} exceeds table capacity {capacity}")]
pub struct CapacityError {
    pub index: usize,
    pub capacity: usize,
}

/// Slot table indexed by [`Id::index`].
///
/// All slots are allocated up front and the table never grows: an
/// identifier whose index is at or beyond the capacity is rejected by the
/// inserting operations and is simply absent for lookups. Absent entries
/// are explicit `None` slots. Iteration visits occupied slots in ascending
/// index order.
#[derive(Clone, Debug)]
pub struct IdTable<K: Id, V> {
    slots: Vec<Option<V>>,
    _key: PhantomData<K>,
}

impl<K: Id, V> IdTable<K, V> {
    /// Create a table holding identifiers with index below `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            _key: PhantomData,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Store `value`, returning whatever occupied the slot before.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        Ok(self.slot_mut(key)?.replace(value))
    }

    /// Get the entry for `key`, creating it with `init` when absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, init: F) -> Result<&mut V, CapacityError>
    where
        F: FnOnce() -> V,
    {
        Ok(self.slot_mut(key)?.get_or_insert_with(init))
    }

    /// Occupied slots in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|v| (index, v)))
    }

    /// Occupied slots in ascending index order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut V)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|v| (index, v)))
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut(&mut self, key: K) -> Result<&mut Option<V>, CapacityError> {
        let index = key.index();
        let capacity = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(CapacityError { index, capacity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_return_none() {
        let table: IdTable<u8, &str> = IdTable::with_capacity(4);
        assert!(table.get(2).is_none());
        assert!(table.get(200).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn insert_overwrites_and_returns_previous() {
        let mut table = IdTable::with_capacity(2);
        assert_eq!(table.insert(1u8, "first"), Ok(None));
        assert_eq!(table.insert(1u8, "second"), Ok(Some("first")));
        assert_eq!(table.get(1), Some(&"second"));
    }

    #[test]
    fn insert_past_capacity_is_rejected() {
        let mut table = IdTable::with_capacity(2);
        assert_eq!(
            table.insert(9u16, 90),
            Err(CapacityError {
                index: 9,
                capacity: 2
            })
        );
        assert!(table.get(9).is_none());
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 2);
    }

    #[test]
    fn huge_identifiers_neither_overflow_nor_allocate() {
        let mut wide: IdTable<usize, u8> = IdTable::with_capacity(4);
        assert!(wide.insert(usize::MAX, 1).is_err());
        assert!(wide.get_or_insert_with(usize::MAX, || 1).is_err());
        assert!(wide.get(usize::MAX).is_none());

        let mut large: IdTable<u32, u8> = IdTable::with_capacity(4);
        assert!(large.insert(3_000_000_000, 1).is_err());
        assert_eq!(large.capacity(), 4);
    }

    #[test]
    fn iteration_is_in_index_order() {
        let mut table = IdTable::with_capacity(8);
        table.insert(5u8, 'c').unwrap();
        table.insert(0u8, 'a').unwrap();
        table.insert(3u8, 'b').unwrap();

        let values: Vec<char> = table.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['a', 'b', 'c']);
    }

    #[test]
    fn get_or_insert_with_only_initialises_once() {
        let mut table = IdTable::with_capacity(4);
        *table.get_or_insert_with(2u8, || 10).unwrap() += 1;
        *table.get_or_insert_with(2u8, || 100).unwrap() += 1;
        assert_eq!(table.get(2), Some(&12));
    }
}
