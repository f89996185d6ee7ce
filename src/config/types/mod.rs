//! Configuration utility types.
//!
//! | Module   | Purpose                              |
//! |----------|--------------------------------------|
//! | `error`  | Configuration error + diagnostics    |
//! | `field`  | Dotted field path for diagnostics    |

mod error;
mod field;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
