//! Small helpers shared across the pipeline: anchor slugs, numeric field
//! parsing, and file system checks for output directories.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

/// Convert a product name to a URL-friendly anchor.
///
/// Lowercases the name, collapses every run of non-alphanumeric characters
/// into a single hyphen, and trims leading/trailing hyphens. Used both for
/// in-page anchors and for image filenames, so a given product always maps
/// to the same slug.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(anchor_slug("Brandywine Tomato"), "brandywine-tomato");
/// assert_eq!(anchor_slug("Sugar Snap (Organic)"), "sugar-snap-organic");
/// ```
pub fn anchor_slug(name: &str) -> String {
    NON_ALNUM
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Extract the first integer from a free-text field.
///
/// Days-to-maturity values come through as text like `"65-75 days"` or
/// `"78"`; the first number is the sort key. Returns `None` when the text
/// contains no digits.
pub fn first_number(s: &str) -> Option<u32> {
    FIRST_NUMBER
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then probes it with a create/delete of a
/// scratch file so permission problems surface before the scrape starts
/// rather than after the last product page has been fetched.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync write via std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_slug_basic() {
        assert_eq!(anchor_slug("Brandywine Tomato"), "brandywine-tomato");
        assert_eq!(anchor_slug("Sugar Snap (Organic)"), "sugar-snap-organic");
    }

    #[test]
    fn test_anchor_slug_collapses_runs() {
        assert_eq!(anchor_slug("King   of -- the North"), "king-of-the-north");
    }

    #[test]
    fn test_anchor_slug_trims_edges() {
        assert_eq!(anchor_slug("'Black' Shiso!"), "black-shiso");
        assert_eq!(anchor_slug("---"), "");
    }

    #[test]
    fn test_first_number_range() {
        assert_eq!(first_number("65-75 days"), Some(65));
        assert_eq!(first_number("78"), Some(78));
    }

    #[test]
    fn test_first_number_missing() {
        assert_eq!(first_number("N/A"), None);
        assert_eq!(first_number(""), None);
    }
}
