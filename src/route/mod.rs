//! Route tree model: units, index, chain resolution.

mod conflict;
mod index;
mod resolve;
mod unit;
mod used;

pub use conflict::{NameCollision, format_collisions};
pub use index::RouteIndex;
pub use resolve::{DependencyChain, Resolution};
pub use unit::{LOAD_SUFFIX, PROTECTED_DIR, RouteUnit, UnitKind, function_name};
pub use used::UsedDependencySet;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route root `{0}` does not exist")]
    MissingRoot(PathBuf),

    #[error("load function name collision:\n{}", format_collisions(.0))]
    NameCollision(Vec<NameCollision>),
}
