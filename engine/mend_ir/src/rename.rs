//! Variable-renaming map.
//!
//! Built incrementally during matching: a binding `donor → target` means
//! every occurrence of the donor name must be read as the target name for
//! the rest of the same match. The map is kept injective in both directions
//! so two donor names can never collapse onto one target name.
//!
//! Candidate match paths that fail must undo the bindings they added; the
//! journal records insertion order so [`RenameMap::rollback`] can restore
//! any earlier state cheaply.

use rustc_hash::FxHashMap;

use crate::Name;

/// Journal position for [`RenameMap::rollback`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RenameMark(usize);

/// Consistent donor-name to target-name map with rollback.
#[derive(Clone, Debug, Default)]
pub struct RenameMap {
    forward: FxHashMap<Name, Name>,
    reverse: FxHashMap<Name, Name>,
    journal: Vec<Name>,
}

impl RenameMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target name a donor name must be read as, if bound.
    pub fn resolve(&self, donor: Name) -> Option<Name> {
        self.forward.get(&donor).copied()
    }

    /// Donor name bound to a target name, if any.
    pub fn resolve_reverse(&self, target: Name) -> Option<Name> {
        self.reverse.get(&target).copied()
    }

    /// Try to bind `donor → target`.
    ///
    /// Succeeds if the pair is already bound, or if neither side is bound at
    /// all. A conflicting binding on either side leaves the map untouched
    /// and returns `false` — the caller abandons that candidate path.
    pub fn try_bind(&mut self, donor: Name, target: Name) -> bool {
        match self.forward.get(&donor) {
            Some(&bound) => return bound == target,
            None => {
                if self.reverse.contains_key(&target) {
                    return false;
                }
            }
        }
        self.forward.insert(donor, target);
        self.reverse.insert(target, donor);
        self.journal.push(donor);
        true
    }

    /// Current journal position.
    pub fn mark(&self) -> RenameMark {
        RenameMark(self.journal.len())
    }

    /// Undo every binding added after `mark`.
    pub fn rollback(&mut self, mark: RenameMark) {
        while self.journal.len() > mark.0 {
            // Journal entries always have matching map entries.
            if let Some(donor) = self.journal.pop() {
                if let Some(target) = self.forward.remove(&donor) {
                    self.reverse.remove(&target);
                }
            }
        }
    }

    /// Number of committed bindings.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if no bindings are committed.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate (donor, target) pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, Name)> + '_ {
        self.journal
            .iter()
            .filter_map(|&d| self.forward.get(&d).map(|&t| (d, t)))
    }
}
