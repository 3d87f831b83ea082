//! Wikimedia Commons image fetcher.
//!
//! Some older varieties have no usable catalog photo, so the `fetch-image`
//! subcommand pulls an illustration from the Commons search API instead:
//! a file-namespace search returning the top few results with their file
//! URLs, from which the first one with a plain raster extension is saved.

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument, warn};

const API_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// Extensions accepted for download; SVG, TIFF, and friends are skipped.
const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    pages: HashMap<String, SearchPage>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    // Search rank within the result set
    #[serde(default)]
    index: i64,
    #[serde(default, rename = "imageinfo")]
    image_info: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: String,
}

fn has_accepted_extension(url: &str) -> bool {
    let lowered = url.to_lowercase();
    match lowered.rsplit('.').next() {
        Some(ext) => ACCEPTED_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Search Commons for `search_term` and save the first acceptable image to
/// `output_path`.
#[instrument(level = "info", skip_all, fields(%search_term, %output_path))]
pub async fn fetch_image(
    client: &Client,
    search_term: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    info!("Searching Wikimedia Commons");
    let params = [
        ("action", "query"),
        ("generator", "search"),
        ("gsrsearch", search_term),
        ("gsrnamespace", "6"), // File namespace
        ("prop", "imageinfo"),
        ("iiprop", "url"),
        ("format", "json"),
        ("gsrlimit", "5"),
    ];

    let response = client.get(API_URL).query(&params).send().await?;
    let body = response.text().await?;
    let data: SearchResponse = serde_json::from_str(&body)?;

    let mut pages: Vec<SearchPage> = data
        .query
        .map(|q| q.pages.into_values().collect())
        .unwrap_or_default();
    if pages.is_empty() {
        warn!("No images found");
        return Err(format!("no images found for {search_term:?}").into());
    }
    pages.sort_by_key(|p| p.index);

    let image_url = pages
        .iter()
        .filter_map(|p| p.image_info.first())
        .map(|i| i.url.as_str())
        .find(|url| has_accepted_extension(url));

    let Some(image_url) = image_url else {
        warn!("No jpg/png/gif results");
        return Err(format!("no usable image found for {search_term:?}").into());
    };

    info!(%image_url, "Downloading image");
    let image_response = client.get(image_url).send().await?;
    if !image_response.status().is_success() {
        return Err(format!("image download failed: {}", image_response.status()).into());
    }
    let bytes = image_response.bytes().await?;
    fs::write(output_path, &bytes).await?;
    info!(path = %output_path, bytes = bytes.len(), "Saved image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_extensions() {
        assert!(has_accepted_extension("https://upload.example.org/a/Tomato.JPG"));
        assert!(has_accepted_extension("https://upload.example.org/a/leaf.png"));
        assert!(!has_accepted_extension("https://upload.example.org/a/diagram.svg"));
        assert!(!has_accepted_extension("https://upload.example.org/a/noext"));
    }

    #[test]
    fn test_response_decoding_and_ordering() {
        let raw = r#"{
            "query": {
                "pages": {
                    "10": {"index": 2, "imageinfo": [{"url": "https://x/b.svg"}]},
                    "11": {"index": 1, "imageinfo": [{"url": "https://x/a.jpg"}]},
                    "12": {"index": 3, "imageinfo": [{"url": "https://x/c.png"}]}
                }
            }
        }"#;
        let data: SearchResponse = serde_json::from_str(raw).unwrap();
        let mut pages: Vec<SearchPage> = data.query.unwrap().pages.into_values().collect();
        pages.sort_by_key(|p| p.index);

        let first = pages
            .iter()
            .filter_map(|p| p.image_info.first())
            .map(|i| i.url.as_str())
            .find(|url| has_accepted_extension(url));
        assert_eq!(first, Some("https://x/a.jpg"));
    }

    #[test]
    fn test_empty_query_decodes() {
        let data: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(data.query.is_none());
    }
}
