//! Scope constraint sets.
//!
//! Enumerates every variable usable at a code location with its declared
//! type. Consulted by the matcher (to reject renamings to out-of-scope
//! names) and by the simplification walk (to reject expressions referencing
//! unavailable variables).

use rustc_hash::FxHashMap;

use crate::Name;

/// Variables usable at a code location, mapped to declared type names.
///
/// `Name::EMPTY` as a type means "type unknown"; unknown types are
/// compatible with everything.
#[derive(Clone, Debug, Default)]
pub struct ScopeSet {
    vars: FxHashMap<Name, Name>,
}

impl ScopeSet {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. A re-declaration overwrites the previous type.
    pub fn declare(&mut self, name: Name, ty: Name) {
        self.vars.insert(name, ty);
    }

    /// Declared type of a variable, if in scope.
    pub fn lookup(&self, name: Name) -> Option<Name> {
        self.vars.get(&name).copied()
    }

    /// Returns `true` if the variable is usable here.
    pub fn contains(&self, name: Name) -> bool {
        self.vars.contains_key(&name)
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variables are declared.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate declared (variable, type) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, Name)> + '_ {
        self.vars.iter().map(|(&n, &t)| (n, t))
    }

    /// Type compatibility: equal names, or either side unknown.
    pub fn compatible(a: Name, b: Name) -> bool {
        a == b || a == Name::EMPTY || b == Name::EMPTY
    }
}
