//! Deduplicated set of units referenced by at least one chain.

use rustc_hash::FxHashSet;

use super::{DependencyChain, RouteUnit};

/// Units to relocate, in first-seen order.
///
/// Membership is by source path, so a layout shared by many pages appears
/// once no matter how many chains reference it.
#[derive(Debug, Default)]
pub struct UsedDependencySet<'a> {
    order: Vec<&'a RouteUnit>,
    seen: FxHashSet<&'a str>,
}

impl<'a> UsedDependencySet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the unit was not present yet.
    pub fn insert(&mut self, unit: &'a RouteUnit) -> bool {
        if !self.seen.insert(unit.source.as_str()) {
            return false;
        }
        self.order.push(unit);
        true
    }

    pub fn extend_chain(&mut self, chain: &DependencyChain<'a>) {
        for unit in chain.units() {
            self.insert(unit);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RouteUnit> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a RouteUnit] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a, 'c> FromIterator<&'c DependencyChain<'a>> for UsedDependencySet<'a> {
    fn from_iter<I: IntoIterator<Item = &'c DependencyChain<'a>>>(chains: I) -> Self {
        let mut used = Self::new();
        for chain in chains {
            used.extend_chain(chain);
        }
        used
    }
}
