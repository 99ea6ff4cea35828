//! Optimized collection types for vitrail.
//!
//! Re-exports AHash-backed hash collections so every crate in the
//! workspace keys its maps with the same hasher.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashmap_roundtrip() {
        let mut map = HashMap::new();
        map.insert(7u64, "seven");
        assert_eq!(map.get(&7), Some(&"seven"));
        assert_eq!(map.get(&8), None);
    }

    #[test]
    fn hashset_membership() {
        let mut set = HashSet::new();
        set.insert("node");
        assert!(set.contains("node"));
        assert!(!set.contains("surface"));
    }
}
