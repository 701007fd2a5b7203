//! Fixed-seed hash builder for internal maps.
//!
//! The tracked-element map never hashes attacker-controlled keys, so HashDoS
//! resistance buys nothing here. A zero-sized foldhash builder with a
//! constant seed keeps the map allocation-free per instance and makes
//! iteration-affecting hashes deterministic across runs.

use std::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// Zero-sized `BuildHasher` over foldhash with a fixed seed.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FixedSeedBuilder;

impl BuildHasher for FixedSeedBuilder {
    type Hasher = FoldHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        FixedState::with_seed(0x9e3779b97f4a7c15).build_hasher()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_is_zero_sized_and_deterministic() {
        assert_eq!(std::mem::size_of::<FixedSeedBuilder>(), 0);
        assert_eq!(
            FixedSeedBuilder.hash_one("darkMode"),
            FixedSeedBuilder.hash_one("darkMode"),
        );
    }
}
