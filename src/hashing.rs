//! Deterministic `HashMap` and `HashSet` variants. The hashing data structures in the standard
//! library are randomly seeded, which would make iteration order (and with it the order of
//! random draws) differ between runs with the same seed. `FxHasher` has no random state.
//!
//! The `hash_str` free function derives per-stream seeds in `crate::random`.

use rustc_hash::FxHasher;
use std::hash::Hasher;

pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_bytes());
    hasher.finish()
}
