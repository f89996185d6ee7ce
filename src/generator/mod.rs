//! PHP output generation.
//!
//! - `protocol` - client data shapes, JSON and PHP renderings
//! - `endpoint` - per-page `__data.php` scripts
//! - `html` - bootstrap rewrite of prerendered pages
//! - `page` - per-page conversion driving the two above
//! - `entry` - client start entry patch
//! - `relocate` - unit sources moved under `_protected`

mod endpoint;
mod entry;
mod html;
mod page;
pub mod protocol;
mod relocate;

pub use endpoint::{DATA_JSON_FILE, ENDPOINT_FILE, endpoint_path, render_endpoint};
pub use entry::patch_start_entry;
pub use html::convert_html;
pub use page::{PageOutcome, generate_page};
pub use relocate::{relocate_all, rename_load};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::NavPath;

/// Prerendered output the upstream build should have produced but did not.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("prerendered page `{}` missing for {page}", file.display())]
    MissingHtml {
        page: NavPath,
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prerendered data `{}` missing for {page}", file.display())]
    MissingData { page: NavPath, file: PathBuf },
}
