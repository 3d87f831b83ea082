//! Product-page scraping.
//!
//! Catalog product pages carry the variety name in `h1.product-name`, a
//! quick-facts definition list (`dl.c-facts__list`), and the growing
//! information inside an accordion panel. Parsing is a pure function over
//! the fetched HTML so it stays easy to test; fetching wraps it with the
//! shared client and best-effort error handling.

use crate::models::SeedProduct;
use crate::utils::anchor_slug;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};

/// Placeholder for fields the page did not provide.
const NOT_AVAILABLE: &str = "N/A";

/// The structured fields parsed out of one product page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub name: String,
    pub latin_name: String,
    pub days_to_maturity: String,
    pub life_cycle: String,
    pub hybrid_status: String,
    pub disease_resistance: String,
    pub growing_info: String,
    pub image_url: Option<String>,
}

// Element text with whitespace-trimmed fragments joined by `sep`.
fn joined_text(element: &ElementRef, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Parse the structured fields out of a product page.
pub fn parse_product_page(html: &str) -> ProductPage {
    let document = Html::parse_document(html);

    let name_selector = Selector::parse("h1.product-name").unwrap();
    let name = document
        .select(&name_selector)
        .next()
        .map(|el| joined_text(&el, " "))
        .unwrap_or_else(|| "Unknown".to_string());

    let quick_facts = parse_quick_facts(&document);
    let fact = |key: &str| {
        quick_facts
            .get(key)
            .cloned()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    let growing_info = growing_info_div(&document)
        .map(|el| joined_text(&el, " | "))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    ProductPage {
        name,
        latin_name: fact("Latin Name"),
        days_to_maturity: fact("Days To Maturity"),
        life_cycle: fact("Life Cycle"),
        hybrid_status: fact("Hybrid Status"),
        disease_resistance: fact("Disease Resistance Codes"),
        growing_info,
        image_url: image_url(&document),
    }
}

// Zip dt/dd pairs from the quick-facts list. The term cell also holds an
// "About" popover button, so the key is taken from the inner h3 when
// present, else truncated at "About".
fn parse_quick_facts(document: &Html) -> HashMap<String, String> {
    let list_selector = Selector::parse("dl.c-facts__list").unwrap();
    let term_selector = Selector::parse("dt.c-facts__term").unwrap();
    let definition_selector = Selector::parse("dd.c-facts__definition").unwrap();
    let h3_selector = Selector::parse("h3").unwrap();

    let mut facts = HashMap::new();
    let Some(list) = document.select(&list_selector).next() else {
        return facts;
    };

    let terms: Vec<_> = list.select(&term_selector).collect();
    let definitions: Vec<_> = list.select(&definition_selector).collect();
    for (term, definition) in terms.iter().zip(definitions.iter()) {
        let key = match term.select(&h3_selector).next() {
            Some(h3) => h3.text().collect::<String>().trim().to_string(),
            None => {
                let raw = joined_text(term, " ");
                raw.split("About").next().unwrap_or("").trim().to_string()
            }
        };
        facts.insert(key, joined_text(definition, " "));
    }
    facts
}

// The growing-info panel: the dedicated content div when present, else the
// accordion body following the "Growing Information" header.
fn growing_info_div<'a>(document: &'a Html) -> Option<ElementRef<'a>> {
    let content_selector = Selector::parse("div.s-lgc-pdp-content").unwrap();
    if let Some(div) = document.select(&content_selector).next() {
        return Some(div);
    }

    let header_selector = Selector::parse("div.c-accordion__header").unwrap();
    for header in document.select(&header_selector) {
        let text = header.text().collect::<String>().to_lowercase();
        if !text.contains("growing information") {
            continue;
        }
        let mut node = header.next_sibling();
        while let Some(sibling) = node {
            if let Some(element) = ElementRef::wrap(sibling) {
                if element.value().classes().any(|c| c == "c-accordion__body") {
                    return Some(element);
                }
            }
            node = sibling.next_sibling();
        }
    }
    None
}

// og:image first; the catalog's product-image img then the schema.org
// itemprop as fallbacks.
fn image_url(document: &Html) -> Option<String> {
    let og_selector = Selector::parse(r#"meta[property="og:image"]"#).unwrap();
    if let Some(content) = document
        .select(&og_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
    {
        return Some(content.to_string());
    }

    for selector in ["img.c-product-image__img", r#"img[itemprop="image"]"#] {
        let image_selector = Selector::parse(selector).unwrap();
        if let Some(src) = document
            .select(&image_selector)
            .next()
            .and_then(|img| img.value().attr("src"))
        {
            return Some(src.to_string());
        }
    }
    None
}

/// Fetch one product page and assemble a [`SeedProduct`] record.
///
/// Non-200 responses produce `Ok(None)` so the scrape loop can log and move
/// on; only transport errors surface as `Err`.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_product(
    client: &Client,
    url: &str,
    images_dir: &str,
) -> Result<Option<SeedProduct>, Box<dyn Error>> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        warn!(status = %response.status(), "Product page returned non-success status");
        return Ok(None);
    }
    let body = response.text().await?;
    let page = parse_product_page(&body);
    debug!(name = %page.name, "Parsed product page");

    let image_path = match &page.image_url {
        Some(image_url) => download_image(client, image_url, &page.name, images_dir)
            .await
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        None => NOT_AVAILABLE.to_string(),
    };

    Ok(Some(SeedProduct {
        name: page.name,
        latin_name: page.latin_name,
        days_to_maturity: page.days_to_maturity,
        life_cycle: page.life_cycle,
        hybrid_status: page.hybrid_status,
        disease_resistance: page.disease_resistance,
        growing_info: page.growing_info,
        url: url.to_string(),
        image_path,
    }))
}

// Extension taken from the image URL; anything missing or implausibly long
// becomes .jpg.
fn image_extension(image_url: &str) -> String {
    let ext = Path::new(image_url)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    if ext.is_empty() || ext.len() > 5 {
        ".jpg".to_string()
    } else {
        ext
    }
}

/// Download a product image into `images_dir`, named by the product slug.
///
/// Returns the site-relative `images/<file>` path stored in the CSV, or
/// `None` when the download failed. Existing files are reused so re-scrapes
/// do not refetch images.
#[instrument(level = "info", skip_all, fields(%image_url))]
pub async fn download_image(
    client: &Client,
    image_url: &str,
    product_name: &str,
    images_dir: &str,
) -> Option<String> {
    let filename = format!("{}{}", anchor_slug(product_name), image_extension(image_url));
    let filepath = format!("{}/{}", images_dir.trim_end_matches('/'), filename);
    let relative = format!("images/{filename}");

    if Path::new(&filepath).exists() {
        return Some(relative);
    }

    if let Err(e) = fs::create_dir_all(images_dir).await {
        error!(error = %e, dir = %images_dir, "Could not create image directory");
        return None;
    }

    match client.get(image_url).send().await {
        Ok(response) if response.status().is_success() => match response.bytes().await {
            Ok(bytes) => match fs::write(&filepath, &bytes).await {
                Ok(()) => {
                    info!(path = %filepath, bytes = bytes.len(), "Saved product image");
                    Some(relative)
                }
                Err(e) => {
                    error!(error = %e, path = %filepath, "Failed writing image");
                    None
                }
            },
            Err(e) => {
                error!(error = %e, "Failed reading image body");
                None
            }
        },
        Ok(response) => {
            warn!(status = %response.status(), "Image download failed");
            None
        }
        Err(e) => {
            error!(error = %e, "Image request failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_HTML: &str = r#"
        <html><head>
          <meta property="og:image" content="https://cdn.example.com/sun-gold.jpg">
        </head><body>
          <h1 class="product-name">Sun Gold Cherry Tomato</h1>
          <dl class="c-facts__list">
            <dt class="c-facts__term"><h3>Latin Name</h3><button>About Latin Name</button></dt>
            <dd class="c-facts__definition">Solanum lycopersicum</dd>
            <dt class="c-facts__term">Days To Maturity About Days To Maturity</dt>
            <dd class="c-facts__definition">57</dd>
            <dt class="c-facts__term"><h3>Hybrid Status</h3></dt>
            <dd class="c-facts__definition">F1</dd>
          </dl>
          <div class="s-lgc-pdp-content">
            <p>CULTURE:</p><p>Rich, well-drained soil.</p>
            <p>HARVEST:</p><p>Pick fully colored fruit.</p>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_name_and_facts() {
        let page = parse_product_page(PRODUCT_HTML);
        assert_eq!(page.name, "Sun Gold Cherry Tomato");
        assert_eq!(page.latin_name, "Solanum lycopersicum");
        assert_eq!(page.days_to_maturity, "57");
        assert_eq!(page.hybrid_status, "F1");
        // Not on the page
        assert_eq!(page.life_cycle, "N/A");
        assert_eq!(page.disease_resistance, "N/A");
    }

    #[test]
    fn test_growing_info_pipe_joined() {
        let page = parse_product_page(PRODUCT_HTML);
        assert_eq!(
            page.growing_info,
            "CULTURE: | Rich, well-drained soil. | HARVEST: | Pick fully colored fruit."
        );
    }

    #[test]
    fn test_og_image_preferred() {
        let page = parse_product_page(PRODUCT_HTML);
        assert_eq!(
            page.image_url.as_deref(),
            Some("https://cdn.example.com/sun-gold.jpg")
        );
    }

    #[test]
    fn test_image_fallback_to_product_img() {
        let html = r#"
            <html><body>
              <h1 class="product-name">Provider Bush Bean</h1>
              <img class="c-product-image__img" src="https://cdn.example.com/provider.png">
            </body></html>
        "#;
        let page = parse_product_page(html);
        assert_eq!(
            page.image_url.as_deref(),
            Some("https://cdn.example.com/provider.png")
        );
    }

    #[test]
    fn test_accordion_fallback_for_growing_info() {
        let html = r#"
            <html><body>
              <h1 class="product-name">Hakurei Turnip</h1>
              <div class="c-accordion__header"><a>Growing Information</a></div>
              <div class="c-accordion__body"><p>CULTURE:</p><p>Sow early.</p></div>
            </body></html>
        "#;
        let page = parse_product_page(html);
        assert_eq!(page.growing_info, "CULTURE: | Sow early.");
    }

    #[test]
    fn test_missing_everything_degrades() {
        let page = parse_product_page("<html><body></body></html>");
        assert_eq!(page.name, "Unknown");
        assert_eq!(page.growing_info, "N/A");
        assert_eq!(page.image_url, None);
    }

    #[test]
    fn test_image_extension_rules() {
        assert_eq!(image_extension("https://x/y/photo.png"), ".png");
        assert_eq!(image_extension("https://x/y/photo"), ".jpg");
        assert_eq!(image_extension("https://x/y/photo.toolongext"), ".jpg");
    }
}
