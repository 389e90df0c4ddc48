//! Leveled type hierarchy
//!
//! `level -> { canonical class URI -> entry }`, where level is the depth of
//! the implementation type below the lattice root and the entry carries the
//! ontology subclass closure of the type's canonical class.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

use crate::hierarchy::kind::{EntityKind, LatticeType};
use crate::ontology::OntologyIndex;

/// One implementation type and the ontology classes it covers
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyEntry<K> {
    pub kind: K,
    pub class_uri: String,
    pub covered: Arc<BTreeSet<String>>,
}

/// Leveled map from implementation types to covered ontology classes
///
/// Each type is recorded exactly once, at its greatest depth below the
/// root. Entries within a level are ordered by class URI.
#[derive(Debug, Clone)]
pub struct TypeHierarchy<K: LatticeType = EntityKind> {
    levels: BTreeMap<usize, BTreeMap<String, HierarchyEntry<K>>>,
    level_of: HashMap<K, usize>,
}

impl<K: LatticeType> TypeHierarchy<K> {
    /// Walk the lattice depth-first from the root and map every type
    pub fn build(index: &OntologyIndex) -> Self {
        let mut depths: HashMap<K, usize> = HashMap::new();
        visit(K::root(), 0, &mut depths);

        let mut levels: BTreeMap<usize, BTreeMap<String, HierarchyEntry<K>>> = BTreeMap::new();
        for kind in K::all() {
            let Some(&level) = depths.get(kind) else {
                continue;
            };
            let class_uri = kind.canonical_class();
            let covered = index.subclass_closure(&class_uri);
            debug!(?kind, level, covered = covered.len(), "mapped type");
            levels.entry(level).or_default().insert(
                class_uri.clone(),
                HierarchyEntry {
                    kind: *kind,
                    class_uri,
                    covered,
                },
            );
        }

        info!(
            types = depths.len(),
            levels = levels.len(),
            "type hierarchy built"
        );
        Self {
            levels,
            level_of: depths,
        }
    }

    /// Recompute from scratch, e.g. after `OntologyIndex::add_classes`
    pub fn rebuild(&mut self, index: &OntologyIndex) {
        *self = Self::build(index);
    }

    pub fn level_of(&self, kind: K) -> Option<usize> {
        self.level_of.get(&kind).copied()
    }

    /// Entries at `level`, ordered by class URI
    pub fn entries_at(&self, level: usize) -> impl Iterator<Item = &HierarchyEntry<K>> {
        self.levels.get(&level).into_iter().flat_map(|entries| entries.values())
    }

    pub fn entry_for(&self, kind: K) -> Option<&HierarchyEntry<K>> {
        let level = self.level_of(kind)?;
        self.levels.get(&level)?.get(&kind.canonical_class())
    }

    /// Deepest level present
    pub fn depth(&self) -> usize {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of mapped types
    pub fn len(&self) -> usize {
        self.level_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.level_of.is_empty()
    }

    /// Levels from deepest to shallowest
    pub(crate) fn levels_deepest_first(
        &self,
    ) -> impl Iterator<Item = (usize, &BTreeMap<String, HierarchyEntry<K>>)> {
        self.levels.iter().rev().map(|(level, entries)| (*level, entries))
    }
}

/// Depth-first in declared order; a type reached along several paths keeps
/// the deepest level seen.
fn visit<K: LatticeType>(kind: K, level: usize, depths: &mut HashMap<K, usize>) {
    match depths.get(&kind) {
        Some(&seen) if seen >= level => return,
        _ => {}
    }
    depths.insert(kind, level);
    for sub in kind.direct_subtypes() {
        visit(sub, level + 1, depths);
    }
}
