//! # Open Addressing Hash Map
//!
//! This module provides a string-keyed **HashMap** using *open addressing* with quadratic probing.
//! All entries live in a single contiguous slot array whose length is always prime.
//!
//! ## Key Features
//! - **Quadratic probing**: a key whose initial slot is `h = hash(key) mod capacity` is looked up in
//!   slots `(h + j²) mod capacity` for `j = 0, 1, 2, ...`. With a prime capacity and a load factor
//!   below one half, an insertion always finds a free slot.
//! - **Tombstones**: removal turns the slot into a tombstone that remembers the removed key, so probe
//!   sequences of other keys that pass through it stay intact. Tombstones are reused by later
//!   insertions and dropped whenever the table is rebuilt.
//! - **Automatic growth**: before each insertion, if `len / capacity >= 0.5` the table is rebuilt
//!   with twice the capacity (rounded up to a prime).
//! - **Injected hashing**: the hash function is any `Fn(&str) -> u64`; the map reduces it modulo the
//!   capacity itself.
//!
//! The map is single-threaded. Iterators borrow it immutably, so it cannot be modified mid-iteration.

use std::fmt;
use std::mem;

use log::{debug, trace};

use super::prime::{next_prime, prime_at_least};
use super::string_hash::{hash_function_1, HashFn};
use super::DEFAULT_CAPACITY;
use crate::error::{Error, Result};

/// Load factor at which the next insertion first grows the table.
const MAX_LOAD_FACTOR: f64 = 0.5;

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

/// A slot is `Empty`, `Occupied` by a live entry, or a `Tombstone` left behind by a removed key.
#[derive(Debug, Clone)]
enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
    Tombstone(String),
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<V> Slot<V> {
    fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied(entry) => Some(&entry.value),
            _ => None,
        }
    }

    fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied(entry) => Some(&mut entry.value),
            _ => None,
        }
    }
}

/// Read-only view of one slot, as returned by [`OpenAddressingMap::slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRef<'a, V> {
    Empty,
    Occupied(&'a str, &'a V),
    Tombstone(&'a str),
}

/// Slot indices `(initial + j²) mod capacity` for `j = 0..capacity`.
///
/// Consecutive squares differ by `2j + 1`, so the index is advanced incrementally and never has to
/// square a large `j`.
#[derive(Debug, Clone)]
struct Probe {
    index: usize,
    j: usize,
    capacity: usize,
}

impl Iterator for Probe {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.j >= self.capacity {
            return None;
        }
        let current = self.index;
        self.index = (self.index + 2 * self.j + 1) % self.capacity;
        self.j += 1;
        Some(current)
    }
}

/// A builder for the `OpenAddressingMap`, allowing you to specify the initial capacity and hash function.
#[derive(Debug, Clone)]
pub struct OpenAddressingBuilder<H> {
    capacity: usize,
    hasher: H,
}

impl Default for OpenAddressingBuilder<HashFn> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hasher: hash_function_1,
        }
    }
}

impl OpenAddressingBuilder<HashFn> {
    /// Create a new builder with the default capacity and `hash_function_1`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: Fn(&str) -> u64> OpenAddressingBuilder<H> {
    /// Sets the initial capacity (rounded up to a prime on build).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the hash function.
    pub fn with_hasher<T: Fn(&str) -> u64>(self, hasher: T) -> OpenAddressingBuilder<T> {
        OpenAddressingBuilder {
            capacity: self.capacity,
            hasher,
        }
    }

    /// Finalize building the map. A zero capacity is treated as 1.
    pub fn build<V>(self) -> OpenAddressingMap<V, H> {
        OpenAddressingMap::new(self.capacity, self.hasher)
    }

    /// Like [`build`](Self::build), but rejects a zero capacity instead of clamping it.
    pub fn try_build<V>(self) -> Result<OpenAddressingMap<V, H>> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(0));
        }
        Ok(self.build())
    }
}

/// String-keyed hash map with quadratic probing over a prime-sized slot array.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = HashFn> {
    slots: Vec<Slot<V>>,
    capacity: usize,
    len: usize,
    hash_function: H,
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, Default::default);
    slots
}

impl<V> OpenAddressingMap<V> {
    /// Creates a map with the given capacity (rounded up to a prime) and `hash_function_1`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, hash_function_1)
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V, H> OpenAddressingMap<V, H> {
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots. Always prime.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity as f64
    }

    /// Slots not holding a live entry (`capacity - len`); tombstones count as empty.
    pub fn empty_slot_count(&self) -> usize {
        self.capacity - self.len
    }

    /// Drops every entry and tombstone, keeping the capacity.
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.capacity);
        self.len = 0;
    }

    /// Iterates over live entries in ascending slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Iterates over the keys of live entries.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over the values of live entries.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Collects all live `(key, value)` pairs in slot order.
    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Inspects the slot at `index`; `None` when out of range.
    pub fn slot(&self, index: usize) -> Option<SlotRef<'_, V>> {
        self.slots.get(index).map(|slot| match slot {
            Slot::Empty => SlotRef::Empty,
            Slot::Occupied(entry) => SlotRef::Occupied(&entry.key, &entry.value),
            Slot::Tombstone(key) => SlotRef::Tombstone(key),
        })
    }
}

impl<V, H: Fn(&str) -> u64> OpenAddressingMap<V, H> {
    /// Creates a map with `initial_capacity` rounded up to a prime (a zero capacity is treated as 1).
    pub fn new(initial_capacity: usize, hash_function: H) -> Self {
        let capacity = next_prime(initial_capacity.max(1));
        OpenAddressingMap {
            slots: empty_slots(capacity),
            capacity,
            len: 0,
            hash_function,
        }
    }

    /// Inserts or updates `key`. Returns the previous value if the key was already present.
    ///
    /// Grows the table first if the load factor has reached one half.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.grow();
        }

        let key = key.into();
        // first reusable slot on the probe path; keep probing past tombstones for a live copy of key
        let mut vacant = None;
        for idx in self.probe(&key) {
            match &mut self.slots[idx] {
                Slot::Empty => {
                    vacant.get_or_insert(idx);
                    break;
                }
                Slot::Tombstone(k) => {
                    vacant.get_or_insert(idx);
                    if *k == key {
                        break;
                    }
                }
                Slot::Occupied(entry) => {
                    if entry.key == key {
                        return Some(mem::replace(&mut entry.value, value));
                    }
                }
            }
        }

        match vacant {
            Some(idx) => {
                self.slots[idx] = Slot::Occupied(Entry { key, value });
                self.len += 1;
                None
            }
            None => {
                // unreachable while the load factor stays below one half
                self.grow();
                self.put(key, value)
            }
        }
    }

    /// Returns a reference to the value for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let idx = self.find(key)?;
        self.slots[idx].value()
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.find(key)?;
        self.slots[idx].value_mut()
    }

    /// Returns true if `key` has a live entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot. Returns the removed value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.find(key)?;
        match mem::take(&mut self.slots[idx]) {
            Slot::Occupied(Entry { key, value }) => {
                self.slots[idx] = Slot::Tombstone(key);
                self.len -= 1;
                Some(value)
            }
            other => {
                self.slots[idx] = other;
                None
            }
        }
    }

    /// Rebuilds the table with `new_capacity` slots (rounded up to a prime).
    ///
    /// Silently ignored if `new_capacity` is smaller than the number of live entries.
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            debug!("open addressing resize ignored: {}", err);
        }
    }

    /// Rebuilds the table with `new_capacity` slots (rounded up to a prime), reinserting every live
    /// entry in slot order. Reinsertion goes through [`put`](Self::put), so the new table may grow
    /// again if `new_capacity` leaves it at least half full.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < self.len {
            return Err(Error::CapacityTooSmall {
                requested: new_capacity,
                len: self.len,
            });
        }
        let new_capacity = prime_at_least(new_capacity);
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        let old_capacity = mem::replace(&mut self.capacity, new_capacity);
        self.len = 0;

        for slot in old_slots {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value);
            }
        }
        trace!(
            "open addressing rehash {} -> {} slots, {} entries",
            old_capacity,
            self.capacity,
            self.len
        );
        Ok(())
    }

    fn grow(&mut self) {
        debug!(
            "open addressing map growing from {} slots at load {:.2}",
            self.capacity,
            self.load_factor()
        );
        self.resize(self.capacity * 2);
    }

    fn probe(&self, key: &str) -> Probe {
        Probe {
            index: ((self.hash_function)(key) % self.capacity as u64) as usize,
            j: 0,
            capacity: self.capacity,
        }
    }

    /// Slot index of the live entry for `key`.
    fn find(&self, key: &str) -> Option<usize> {
        for idx in self.probe(key) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                // a live copy of the key is never placed behind its own tombstone
                Slot::Tombstone(k) if k == key => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(idx),
                _ => {}
            }
        }
        None
    }
}

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Dumps every slot as `index: contents`, one per line. Not a stable format.
impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{}: None", i)?,
                Slot::Occupied(entry) => writeln!(f, "{}: {} => {}", i, entry.key, entry.value)?,
                Slot::Tombstone(key) => writeln!(f, "{}: {} (removed)", i, key)?,
            }
        }
        Ok(())
    }
}

/// Iterator over the live entries of an [`OpenAddressingMap`], in slot order.
#[derive(Debug)]
pub struct Iter<'a, V> {
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied(entry) => Some((entry.key.as_str(), &entry.value)),
            _ => None,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len()))
    }
}

impl<'a, V, H> IntoIterator for &'a OpenAddressingMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V, H: Fn(&str) -> u64> Extend<(K, V)> for OpenAddressingMap<V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OpenAddressingMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}
