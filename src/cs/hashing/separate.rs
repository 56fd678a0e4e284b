//! # Separate Chaining Hash Map
//!
//! This module implements a string-keyed **HashMap** using **separate chaining**:
//! - A prime number of buckets, each an owned singly-linked list of entries kept in insertion order.
//! - **Injected** hash function (`Fn(&str) -> u64`), reduced modulo the bucket count by the map.
//! - **Insert**, **get**, **remove**, **iter** with expected **O(1)** cost while the load factor stays
//!   below one.
//! - Automatic growth: before each insertion, if `len / capacity >= 1.0` the map is rebuilt with twice
//!   as many buckets (rounded up to a prime). The map never shrinks.

use std::fmt;
use std::iter;
use std::mem;

use log::{debug, trace};

use super::prime::{next_prime, prime_at_least};
use super::string_hash::{hash_function_1, HashFn};
use super::DEFAULT_CAPACITY;
use crate::error::{Error, Result};

/// Load factor at which the next insertion first grows the map.
const MAX_LOAD_FACTOR: f64 = 1.0;

type Link<V> = Option<Box<Node<V>>>;

struct Node<V> {
    key: String,
    value: V,
    next: Link<V>,
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// One bucket: the head of a singly-linked list.
///
/// Drop, clone and debug-format walk the chain in a loop; the derived versions would recurse once
/// per node and overflow the stack on long chains.
struct Bucket<V> {
    head: Link<V>,
}

impl<V> Default for Bucket<V> {
    fn default() -> Self {
        Bucket { head: None }
    }
}

impl<V> Drop for Bucket<V> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<V: Clone> Clone for Bucket<V> {
    fn clone(&self) -> Self {
        let mut bucket = Bucket::default();
        let mut tail = &mut bucket.head;
        for node in self.nodes() {
            let copy = tail.insert(Box::new(Node {
                key: node.key.clone(),
                value: node.value.clone(),
                next: None,
            }));
            tail = &mut copy.next;
        }
        bucket
    }
}

impl<V: fmt::Debug> fmt::Debug for Bucket<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.nodes()).finish()
    }
}

impl<V> Bucket<V> {
    fn nodes(&self) -> impl Iterator<Item = &Node<V>> {
        iter::successors(self.head.as_deref(), |node| node.next.as_deref())
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        self.nodes().find(|node| node.key == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        let mut link = self.head.as_deref_mut();
        while let Some(node) = link {
            if node.key == key {
                return Some(node);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    /// Overwrites the value for `key`, or appends a new node at the tail.
    /// Returns the old value when the key was already present.
    fn upsert(&mut self, key: String, value: V) -> Option<V> {
        let mut link = &mut self.head;
        while let Some(node) = link {
            if node.key == key {
                return Some(mem::replace(&mut node.value, value));
            }
            link = &mut node.next;
        }
        *link = Some(Box::new(Node {
            key,
            value,
            next: None,
        }));
        None
    }

    /// Unlinks the node for `key`.
    fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            link = &mut link.as_mut()?.next;
        }
        let Node { value, next, .. } = *link.take()?;
        *link = next;
        Some(value)
    }
}

fn empty_buckets<V>(capacity: usize) -> Vec<Bucket<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Default::default);
    buckets
}

/// A builder for the `ChainedHashMap`.
/// Typically you'll call `.with_capacity(...)`, `.with_hasher(...)`, then `.build()`.
#[derive(Debug, Clone)]
pub struct ChainedHashMapBuilder<H> {
    capacity: usize,
    hasher: H,
}

impl Default for ChainedHashMapBuilder<HashFn> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hasher: hash_function_1,
        }
    }
}

impl ChainedHashMapBuilder<HashFn> {
    /// Creates a new builder with the default capacity and `hash_function_1`.
    pub fn new() -> Self {
        Default::default()
    }
}

impl<H: Fn(&str) -> u64> ChainedHashMapBuilder<H> {
    /// Sets the initial number of buckets (rounded up to a prime on build).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets a custom hash function.
    pub fn with_hasher<T: Fn(&str) -> u64>(self, hasher: T) -> ChainedHashMapBuilder<T> {
        ChainedHashMapBuilder {
            capacity: self.capacity,
            hasher,
        }
    }

    /// Build the final `ChainedHashMap`. A zero capacity is treated as 1.
    pub fn build<V>(self) -> ChainedHashMap<V, H> {
        ChainedHashMap::new(self.capacity, self.hasher)
    }

    /// Like [`build`](Self::build), but rejects a zero capacity.
    pub fn try_build<V>(self) -> Result<ChainedHashMap<V, H>> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(0));
        }
        Ok(self.build())
    }
}

/// A separate-chaining map from `String` keys to `V`, with a prime number of buckets.
#[derive(Clone)]
pub struct ChainedHashMap<V, H = HashFn> {
    buckets: Vec<Bucket<V>>,
    /// The number of buckets. Always prime.
    capacity: usize,
    /// The number of stored key-value pairs.
    len: usize,
    hash_function: H,
}

impl<V> ChainedHashMap<V> {
    /// Creates a new map with the given number of buckets (rounded up to a prime) and `hash_function_1`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, hash_function_1)
    }
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V, H> ChainedHashMap<V, H> {
    /// Returns the number of key-value pairs in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity as f64
    }

    /// Number of buckets holding no entries.
    pub fn empty_bucket_count(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Number of entries chained in bucket `index`; `None` when out of range.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(|bucket| bucket.nodes().count())
    }

    /// Clears the map, keeping the number of buckets.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.capacity);
        self.len = 0;
    }

    /// Iterates over entries by bucket index, then chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            node: None,
        }
    }

    /// Iterates over the keys, in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over the values, in iteration order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Collects every `(key, value)` pair in iteration order.
    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V, H: Fn(&str) -> u64> ChainedHashMap<V, H> {
    /// Creates a map with `initial_capacity` buckets rounded up to a prime (zero is treated as 1).
    pub fn new(initial_capacity: usize, hash_function: H) -> Self {
        let capacity = next_prime(initial_capacity.max(1));
        ChainedHashMap {
            buckets: empty_buckets(capacity),
            capacity,
            len: 0,
            hash_function,
        }
    }

    /// Inserts a key-value pair into the map.
    /// If the key already exists, its value is replaced and the old value returned.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.load_factor() >= MAX_LOAD_FACTOR {
            debug!(
                "chained map growing from {} buckets with {} entries",
                self.capacity, self.len
            );
            self.resize(self.capacity * 2);
        }

        let key = key.into();
        let idx = self.bucket_index(&key);
        let old = self.buckets[idx].upsert(key, value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Returns a reference to the value corresponding to the key, if present.
    pub fn get(&self, key: &str) -> Option<&V> {
        let idx = self.bucket_index(key);
        self.buckets[idx].find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value corresponding to the key, if present.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.bucket_index(key);
        self.buckets[idx].find_mut(key).map(|node| &mut node.value)
    }

    /// Returns true if the key's bucket holds it.
    pub fn contains_key(&self, key: &str) -> bool {
        let idx = self.bucket_index(key);
        self.buckets[idx].find(key).is_some()
    }

    /// Removes and returns the value for the specified key, if present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.bucket_index(key);
        let removed = self.buckets[idx].remove(key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Rebuilds the map with `new_capacity` buckets (rounded up to a prime). Ignored if zero.
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            debug!("chained resize ignored: {}", err);
        }
    }

    /// Rebuilds the map with `new_capacity` buckets (rounded up to a prime) and re-inserts every
    /// entry, bucket by bucket, through [`put`](Self::put). The rebuilt map may grow again if
    /// `new_capacity` is at or below the number of entries.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < 1 {
            return Err(Error::ZeroCapacity);
        }
        let new_capacity = prime_at_least(new_capacity);
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let old_capacity = mem::replace(&mut self.capacity, new_capacity);
        self.len = 0;

        for mut bucket in old_buckets {
            let mut link = bucket.head.take();
            while let Some(node) = link {
                let Node { key, value, next } = *node;
                self.put(key, value);
                link = next;
            }
        }
        trace!(
            "chained rehash {} -> {} buckets, {} entries",
            old_capacity,
            self.capacity,
            self.len
        );
        Ok(())
    }

    fn bucket_index(&self, key: &str) -> usize {
        ((self.hash_function)(key) % self.capacity as u64) as usize
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainedHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Dumps each bucket as `index: key => value -> key => value`. Not a stable format.
impl<V: fmt::Display, H> fmt::Display for ChainedHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{}:", i)?;
            for (n, node) in bucket.nodes().enumerate() {
                let sep = if n == 0 { " " } else { " -> " };
                write!(f, "{}{} => {}", sep, node.key, node.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`ChainedHashMap`].
#[derive(Debug)]
pub struct Iter<'a, V> {
    buckets: std::slice::Iter<'a, Bucket<V>>,
    node: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                return Some((node.key.as_str(), &node.value));
            }
            self.node = self.buckets.next()?.head.as_deref();
        }
    }
}

impl<'a, V, H> IntoIterator for &'a ChainedHashMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V, H: Fn(&str) -> u64> Extend<(K, V)> for ChainedHashMap<V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ChainedHashMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}
