//! HashTable: bucket array of chain heads over an entry arena.

use crate::error::TableError;
use crate::hash::PolyHasher;
use crate::{GROWTH_FACTOR, INITIAL_SIZE, MAX_LOAD_FACTOR};
use core::fmt;
use core::marker::PhantomData;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Entry<V> {
    key: Box<str>,
    value: V,
    hash: u64,
    next: Option<DefaultKey>, // next entry in the same chain
}

type Buckets = Vec<Option<DefaultKey>>;

fn alloc_buckets(size: usize) -> Result<Buckets, TableError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(size)
        .map_err(|_| TableError::AllocationFailure { buckets: size })?;
    buckets.resize(size, None);
    Ok(buckets)
}

/// Configuration for a [`HashTable`].
///
/// ```
/// use chain_hashtable::HashTable;
///
/// let mut t = HashTable::builder()
///     .name("sessions")
///     .size(8)
///     .build()
///     .unwrap();
/// t.insert("alice", 1);
/// assert_eq!(t.size(), 8);
/// assert_eq!(t.name(), Some("sessions"));
/// ```
pub struct HashTableBuilder<V> {
    size: Option<usize>,
    name: Option<String>,
    max_buckets: Option<usize>,
    _pd: PhantomData<fn() -> V>,
}

impl<V> Default for HashTableBuilder<V> {
    fn default() -> Self {
        Self {
            size: None,
            name: None,
            max_buckets: None,
            _pd: PhantomData,
        }
    }
}

impl<V> Clone for HashTableBuilder<V> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            name: self.name.clone(),
            max_buckets: self.max_buckets,
            _pd: PhantomData,
        }
    }
}

impl<V> fmt::Debug for HashTableBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTableBuilder")
            .field("size", &self.size)
            .field("name", &self.name)
            .field("max_buckets", &self.max_buckets)
            .finish()
    }
}

impl<V> HashTableBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial bucket count; values below 1 are raised to 1.
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Name used in diagnostics only; it plays no part in hashing.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Ceiling on the bucket count. Once reached, inserts keep succeeding
    /// but the table stops growing.
    pub fn max_buckets(mut self, limit: usize) -> Self {
        self.max_buckets = Some(limit.max(1));
        self
    }

    pub fn build(self) -> Result<HashTable<V>, TableError> {
        let size = self.size.unwrap_or(INITIAL_SIZE).max(1);
        if let Some(limit) = self.max_buckets {
            if size > limit {
                return Err(TableError::BucketLimit {
                    requested: size,
                    limit,
                });
            }
        }
        let buckets = alloc_buckets(size)?;
        Ok(HashTable::from_parts(buckets, self.name, self.max_buckets))
    }
}

/// Bucket count after one growth step from `old`, honoring `limit`.
fn grown_size(old: usize, limit: Option<usize>) -> Result<usize, TableError> {
    let requested = old
        .checked_mul(GROWTH_FACTOR)
        .ok_or(TableError::AllocationFailure { buckets: usize::MAX })?;
    match limit {
        Some(limit) if requested > limit => Err(TableError::BucketLimit { requested, limit }),
        _ => Ok(requested),
    }
}

pub struct HashTable<V> {
    buckets: Buckets,
    slots: SlotMap<DefaultKey, Entry<V>>, // storage for every live entry
    name: Option<String>,
    max_buckets: Option<usize>,
}

impl<V> HashTable<V> {
    /// Create a table with `INITIAL_SIZE` buckets.
    pub fn new() -> Self {
        Self::with_size(INITIAL_SIZE)
    }

    /// Create a table with `size` buckets (at least one).
    pub fn with_size(size: usize) -> Self {
        Self::from_parts(vec![None; size.max(1)], None, None)
    }

    /// Create a table with `INITIAL_SIZE` buckets and a diagnostic name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_parts(vec![None; INITIAL_SIZE], Some(name.into()), None)
    }

    /// Like `with_size`, but reports a bucket array that cannot be
    /// reserved instead of aborting.
    pub fn try_with_size(size: usize) -> Result<Self, TableError> {
        HashTableBuilder::new().size(size).build()
    }

    pub fn builder() -> HashTableBuilder<V> {
        HashTableBuilder::new()
    }

    fn from_parts(buckets: Buckets, name: Option<String>, max_buckets: Option<usize>) -> Self {
        let t = Self {
            buckets,
            slots: SlotMap::with_key(),
            name,
            max_buckets,
        };
        log::debug!("created table {} with {} buckets", t.label(), t.size());
        t
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current number of buckets.
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Average chain length.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.size() as f64
    }

    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Bucket index of `key` at the current size.
    pub fn hash(&self, key: &str) -> usize {
        self.index_of(PolyHasher::hash_bytes(key.as_bytes()))
    }

    fn find_slot(&self, hash: u64, key: &str) -> Option<DefaultKey> {
        let mut cur = self.buckets[self.index_of(hash)];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.hash == hash && *e.key == *key {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    pub fn search(&self, key: &str) -> Option<&V> {
        let hash = PolyHasher::hash_bytes(key.as_bytes());
        self.find_slot(hash, key).map(|k| &self.slots[k].value)
    }

    pub fn search_mut(&mut self, key: &str) -> Option<&mut V> {
        let hash = PolyHasher::hash_bytes(key.as_bytes());
        let k = self.find_slot(hash, key)?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        let hash = PolyHasher::hash_bytes(key.as_bytes());
        self.find_slot(hash, key).is_some()
    }

    /// Insert or overwrite. Returns the value previously stored under
    /// `key`, leaving its fate to the caller.
    ///
    /// May grow the bucket array afterwards; a failed growth is logged and
    /// does not undo the insert.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let hash = PolyHasher::hash_bytes(key.as_bytes());
        if let Some(k) = self.find_slot(hash, key) {
            log::trace!("table {}: overwrite {:?}", self.label(), key);
            return Some(core::mem::replace(&mut self.slots[k].value, value));
        }

        let index = self.index_of(hash);
        let k = self.slots.insert(Entry {
            key: Box::from(key),
            value,
            hash,
            next: self.buckets[index],
        });
        self.buckets[index] = Some(k);
        log::trace!("table {}: insert {:?} into bucket {}", self.label(), key, index);

        if self.len() > MAX_LOAD_FACTOR.saturating_mul(self.size()) {
            match self.grow() {
                Ok(()) => {}
                // A capped table hits its ceiling on every new key.
                Err(e @ TableError::BucketLimit { .. }) => log::debug!(
                    "table {}: resize skipped at {} entries over {} buckets: {}",
                    self.label(),
                    self.len(),
                    self.size(),
                    e
                ),
                Err(e) => log::warn!(
                    "table {}: resize skipped at {} entries over {} buckets: {}",
                    self.label(),
                    self.len(),
                    self.size(),
                    e
                ),
            }
        }
        None
    }

    /// Relink every entry into a bucket array `GROWTH_FACTOR` times larger.
    /// On error the table is left exactly as it was.
    fn grow(&mut self) -> Result<(), TableError> {
        let old = self.size();
        let requested = grown_size(old, self.max_buckets)?;
        let mut buckets = alloc_buckets(requested)?;

        for (k, entry) in self.slots.iter_mut() {
            let index = (entry.hash % requested as u64) as usize;
            entry.next = buckets[index];
            buckets[index] = Some(k);
        }
        self.buckets = buckets;

        log::debug!(
            "table {}: resized {} -> {} buckets ({} entries)",
            self.label(),
            old,
            requested,
            self.len()
        );
        Ok(())
    }

    /// Remove `key`, handing its value back. Absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let hash = PolyHasher::hash_bytes(key.as_bytes());
        let index = self.index_of(hash);

        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[index];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.hash == hash && *e.key == *key {
                let next = e.next;
                match prev {
                    None => self.buckets[index] = next,
                    Some(p) => self.slots[p].next = next,
                }
                log::trace!("table {}: delete {:?} from bucket {}", self.label(), key, index);
                return self.slots.remove(k).map(|e| e.value);
            }
            prev = cur;
            cur = e.next;
        }
        None
    }

    /// Release the table, every entry and every key copy.
    pub fn destroy(self) {
        log::debug!(
            "destroying table {} ({} entries, {} buckets)",
            self.label(),
            self.len(),
            self.size()
        );
        drop(self);
    }

    /// Structural check: every entry is reachable exactly once, from the
    /// bucket its hash selects, and its cached hash matches its key.
    #[cfg(test)]
    pub(crate) fn invariants_hold(&self) -> bool {
        if self.buckets.is_empty() {
            return false;
        }
        let mut reachable = 0usize;
        for (index, head) in self.buckets.iter().enumerate() {
            let mut cur = *head;
            while let Some(k) = cur {
                let Some(e) = self.slots.get(k) else {
                    return false;
                };
                if e.hash != PolyHasher::hash_bytes(e.key.as_bytes()) || self.index_of(e.hash) != index {
                    return false;
                }
                reachable += 1;
                // A cycle would walk past the arena length.
                if reachable > self.slots.len() {
                    return false;
                }
                cur = e.next;
            }
        }
        reachable == self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn chain_len(&self, index: usize) -> usize {
        let mut n = 0;
        let mut cur = self.buckets[index];
        while let Some(k) = cur {
            n += 1;
            cur = self.slots[k].next;
        }
        n
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("size", &self.size())
            .finish()
    }
}
