//! Core types - pure abstractions shared across the codebase.

mod nav;

pub use nav::NavPath;
