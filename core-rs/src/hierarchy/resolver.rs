//! Base class resolution - most specific implementation type for a class list

use crate::hierarchy::kind::LatticeType;
use crate::hierarchy::map::TypeHierarchy;

/// A resolved implementation type and the level it was found at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<K> {
    pub kind: K,
    pub level: usize,
}

impl<K: LatticeType> TypeHierarchy<K> {
    /// Pick the deepest type whose covered classes meet `requested`
    ///
    /// Levels are searched deepest first, entries within a level in URI
    /// order, so the first hit is the most specific match. No match (or an
    /// empty request) resolves to the root at level 0.
    pub fn resolve<S: AsRef<str>>(&self, requested: &[S]) -> Resolution<K> {
        for (level, entries) in self.levels_deepest_first() {
            for entry in entries.values() {
                if requested
                    .iter()
                    .any(|class| entry.covered.contains(class.as_ref()))
                {
                    return Resolution {
                        kind: entry.kind,
                        level,
                    };
                }
            }
        }

        Resolution {
            kind: K::root(),
            level: 0,
        }
    }
}
