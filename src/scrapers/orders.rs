//! Order-history scraping.
//!
//! The input is one or more saved order-history pages from the catalog's
//! account area. Each purchased product appears as a line item whose details
//! block links to the product page; both the thumbnail and the title link to
//! the same URL, so extraction de-duplicates while preserving first-seen
//! order.

use itertools::Itertools;
use scraper::{Html, Selector};
use std::error::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Extract product URLs from one order-history page.
///
/// Saved pages occasionally carry fragment or javascript hrefs next to the
/// real links; only absolute http(s) URLs are kept.
pub fn extract_product_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("div.product-line-item-details a[href]").unwrap();

    document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| match Url::parse(href) {
            Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
            Err(_) => {
                warn!(%href, "Skipping non-absolute product link");
                false
            }
        })
        .map(str::to_string)
        .unique()
        .collect()
}

/// Collect product URLs from an order-history file, or from every `.html`
/// file in a directory, de-duplicated across files.
#[instrument(level = "info", skip_all, fields(path = %input_path))]
pub async fn collect_order_urls(input_path: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let metadata = fs::metadata(input_path).await?;

    let mut urls: Vec<String> = Vec::new();
    if metadata.is_dir() {
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(input_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("html") {
                paths.push(path);
            }
        }
        paths.sort();
        for path in paths {
            let html = fs::read_to_string(&path).await?;
            let found = extract_product_urls(&html);
            debug!(path = %path.display(), count = found.len(), "Extracted order URLs");
            urls.extend(found);
        }
    } else {
        let html = fs::read_to_string(input_path).await?;
        urls = extract_product_urls(&html);
    }

    let urls: Vec<String> = urls.into_iter().unique().collect();
    info!(count = urls.len(), "Found unique product URLs");
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_HTML: &str = r#"
        <html><body>
          <div class="product-line-item-details">
            <a href="https://example.com/p/sun-gold"><img src="a.jpg"></a>
            <a href="https://example.com/p/sun-gold">Sun Gold Cherry Tomato</a>
          </div>
          <div class="product-line-item-details">
            <a href="https://example.com/p/provider">Provider Bush Bean</a>
          </div>
          <div class="other">
            <a href="https://example.com/ignored">not a line item</a>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_dedupes_and_preserves_order() {
        let urls = extract_product_urls(ORDER_HTML);
        assert_eq!(
            urls,
            vec![
                "https://example.com/p/sun-gold".to_string(),
                "https://example.com/p/provider".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_ignores_other_anchors() {
        let urls = extract_product_urls(ORDER_HTML);
        assert!(!urls.iter().any(|u| u.contains("ignored")));
    }

    #[test]
    fn test_extract_empty_page() {
        assert!(extract_product_urls("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_extract_drops_non_http_links() {
        let html = r##"
            <div class="product-line-item-details">
              <a href="#reorder">Reorder</a>
              <a href="javascript:void(0)">Details</a>
              <a href="https://example.com/p/hakurei">Hakurei Turnip</a>
            </div>
        "##;
        assert_eq!(
            extract_product_urls(html),
            vec!["https://example.com/p/hakurei".to_string()]
        );
    }
}
