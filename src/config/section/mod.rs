//! Configuration section definitions.
//!
//! | Section   | Purpose                                         |
//! |-----------|-------------------------------------------------|
//! | `[build]` | Output directories and conversion flags         |
//! | `[kit]`   | Upstream build outputs and route source tree    |

pub mod build;
mod kit;

pub use build::BuildSectionConfig;
pub use kit::KitSectionConfig;
