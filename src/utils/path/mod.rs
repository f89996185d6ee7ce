//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_against`)
//! - [`route`]: Slash-separated path helpers (`to_slash`, `relative_slash`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, resolve_against};
pub use route::{relative_slash, to_slash};
