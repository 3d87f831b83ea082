//! HTML and API scrapers.
//!
//! # Submodules
//!
//! - [`orders`]: extracts product URLs from saved order-history HTML
//! - [`product`]: fetches and parses catalog product pages
//! - [`wikimedia`]: fetches fallback images from the Commons search API
//!
//! All fetching goes through a shared `reqwest` client configured with a
//! browser User-Agent; the catalog serves a reduced page to unknown agents.

pub mod orders;
pub mod product;
pub mod wikimedia;

/// User-Agent presented to the catalog and to Wikimedia.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
