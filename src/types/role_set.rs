use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// The roles present in a genome, as seen by [`Rule::check`](crate::Rule::check).
pub trait RoleSet {
    fn contains_role(&self, role: &str) -> bool;
}

impl<S: BuildHasher> RoleSet for HashSet<String, S> {
    fn contains_role(&self, role: &str) -> bool {
        self.contains(role)
    }
}

impl<S: BuildHasher> RoleSet for HashSet<&str, S> {
    fn contains_role(&self, role: &str) -> bool {
        self.contains(role)
    }
}

impl RoleSet for BTreeSet<String> {
    fn contains_role(&self, role: &str) -> bool {
        self.contains(role)
    }
}

impl RoleSet for BTreeSet<&str> {
    fn contains_role(&self, role: &str) -> bool {
        self.contains(role)
    }
}

impl<T: RoleSet + ?Sized> RoleSet for &T {
    fn contains_role(&self, role: &str) -> bool {
        (**self).contains_role(role)
    }
}
