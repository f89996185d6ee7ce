//! Prerendered HTML to PHP page conversion.
//!
//! ```text
//! <script>const data = [{"type":"data","data":{..}}];</script>
//!   ↓
//! <?php include_once __DIR__ . "/blog/__data.php"; ?>
//! <script>const data = <?php echo $json_data_result; ?>;</script>
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::protocol::{PhpVar, php_string};

/// Inline data bootstrap emitted by the client renderer.
static BOOTSTRAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)const data = \[.*\];").unwrap());

/// Result of rewriting one page.
#[derive(Debug)]
pub struct ConvertedHtml {
    pub content: String,
    /// `false` when the page had no bootstrap literal to replace.
    pub has_bootstrap: bool,
}

/// Replace the first bootstrap literal with the endpoint result and prepend
/// an include of the endpoint.
///
/// `endpoint` is the endpoint location relative to the page's directory.
pub fn convert_html(html: &str, endpoint: &str) -> ConvertedHtml {
    let replacement = format!(
        "const data = <?php echo {}; ?>;",
        PhpVar::JSON_RESULT.name()
    );
    let has_bootstrap = BOOTSTRAP.is_match(html);
    let body = BOOTSTRAP.replace(html, NoExpand(&replacement));

    let include = php_string(&format!("/{endpoint}"));
    ConvertedHtml {
        content: format!("<?php include_once __DIR__ . {include}; ?>\n{body}"),
        has_bootstrap,
    }
}

/// `blog.html` -> `blog.php`, `blog/index.html` -> `blog/index.php`.
///
/// Files without an `.html` extension keep their name.
pub fn php_page_path(html: &Path) -> PathBuf {
    match html.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("html") => html.with_extension("php"),
        _ => html.to_path_buf(),
    }
}
