//! chain-hashtable: a string-keyed hash table with separate chaining and
//! doubling growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, self-contained key→value table that higher-level
//!   components can embed without reaching for a general-purpose map.
//! - Pieces:
//!   - `PolyHasher`: deterministic polynomial hash over the key's bytes.
//!   - `HashTable<V>`: bucket array of chain heads plus an entry arena;
//!     owns a copy of every key, stores values without inspecting them.
//!   - `HashTableBuilder`: initial size, diagnostic name and an optional
//!     ceiling on the bucket count.
//!
//! Layout
//! - Entries live in a `SlotMap`; chains are singly linked through the
//!   arena keys, so unlinking and relinking never touches key storage.
//! - Each entry caches the full 64-bit hash of its key. Rehashing only
//!   reduces the cached hash modulo the new size.
//! - New entries are linked at the head of their chain.
//!
//! Growth
//! - Tables start with `INITIAL_SIZE` buckets and grow by `GROWTH_FACTOR`.
//! - The check runs after an insert commits: if `len > MAX_LOAD_FACTOR *
//!   size`, the bucket array is replaced by one `GROWTH_FACTOR` times
//!   larger.
//! - Growth is all-or-nothing. When the new array cannot be reserved, or
//!   the builder's `max_buckets` ceiling would be crossed, the table keeps
//!   its current buckets, logs a warning and the insert still succeeds.
//!   The load factor then exceeds the bound until a later insert manages
//!   to grow.
//! - The bucket count never shrinks.
//!
//! Values
//! - `V` is opaque to the table. Overwriting or deleting a key hands the
//!   previous value back to the caller; nothing is dropped behind their
//!   back. Use `&T`, `Rc<T>` or `NonNull<T>` for non-owning values.
//!
//! Notes and non-goals
//! - No internal synchronization; mutation takes `&mut self`.
//! - No iteration over entries.
//! - `destroy` consumes the table, so a destroyed table cannot be used.

mod error;
pub mod hash;
mod hash_table;
mod hash_table_proptest;

/// Bucket count of a table created without an explicit size.
pub const INITIAL_SIZE: usize = 2;
/// Factor by which the bucket count grows on resize.
pub const GROWTH_FACTOR: usize = 2;
/// Maximum average chain length tolerated before growing.
pub const MAX_LOAD_FACTOR: usize = 2;

// Public surface
pub use error::TableError;
pub use hash::PolyHasher;
pub use hash_table::{HashTable, HashTableBuilder};
