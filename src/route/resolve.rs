//! Dependency chain resolution.
//!
//! A page's chain is every layout whose directory is a whole-segment prefix
//! of the page path, shallow first, then the page unit at exactly that path.
//! Resolution is a pure read of the index, so pages resolve in parallel and
//! the results are reduced into one [`UsedDependencySet`] afterwards.

use rayon::prelude::*;
use serde::Serialize;

use super::{RouteIndex, RouteUnit, UnitKind, UsedDependencySet};
use crate::core::NavPath;

/// Ordered loader chain of a single page.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyChain<'a> {
    pub path: NavPath,
    units: Vec<&'a RouteUnit>,
}

impl<'a> DependencyChain<'a> {
    /// Units in execution order: outermost layout first, page last.
    pub fn units(&self) -> impl ExactSizeIterator<Item = &'a RouteUnit> + '_ {
        self.units.iter().copied()
    }

    /// The page unit, if the page has one.
    pub fn page(&self) -> Option<&'a RouteUnit> {
        self.units
            .last()
            .copied()
            .filter(|unit| unit.kind == UnitKind::Page)
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Chains of a page list together with the units they reference.
#[derive(Debug)]
pub struct Resolution<'a> {
    /// One chain per input path, in input order.
    pub chains: Vec<DependencyChain<'a>>,
    pub used: UsedDependencySet<'a>,
}

impl RouteIndex {
    pub fn resolve(&self, path: &NavPath) -> DependencyChain<'_> {
        let mut units: Vec<&RouteUnit> = self
            .layouts()
            .filter(|layout| layout.prefix.covers(path))
            .collect();
        units.extend(self.page(path));

        DependencyChain {
            path: path.clone(),
            units,
        }
    }

    /// Resolve every path in parallel; the used set follows input order.
    pub fn resolve_all(&self, paths: &[NavPath]) -> Resolution<'_> {
        let chains: Vec<_> = paths.par_iter().map(|path| self.resolve(path)).collect();
        let used = chains.iter().collect();
        Resolution { chains, used }
    }
}
