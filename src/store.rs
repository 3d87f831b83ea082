//! Append-only CSV store for scraped products.
//!
//! Each scraped product is appended as soon as it is parsed, one record per
//! call, so an interrupted run leaves a valid partial CSV. Resumption works
//! by re-scanning the URLs already present: the store is idempotent by URL,
//! not by content. The header row is written only when the file is created.

use crate::models::SeedProduct;
use std::collections::HashSet;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Collect the URLs already present in the CSV.
///
/// Missing or unreadable files yield an empty set with a warning; a fresh
/// scrape should never be blocked by a damaged resume file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub fn existing_urls(path: &str) -> HashSet<String> {
    let mut urls = HashSet::new();
    if !Path::new(path).exists() {
        return urls;
    }
    match csv::Reader::from_path(path) {
        Ok(mut reader) => {
            for record in reader.deserialize::<SeedProduct>() {
                match record {
                    Ok(product) => {
                        urls.insert(product.url);
                    }
                    Err(e) => warn!(error = %e, "Skipping unreadable CSV row"),
                }
            }
            info!(count = urls.len(), "Loaded previously scraped URLs");
        }
        Err(e) => warn!(error = %e, "Could not read existing CSV; starting fresh"),
    }
    urls
}

/// Append one product record, creating the file (and its parent directory)
/// with a header row when it does not exist yet.
pub fn append_product(path: &str, product: &SeedProduct) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let write_header = !Path::new(path).exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    writer.serialize(product)?;
    writer.flush()?;
    Ok(())
}

/// Read every product row from the CSV.
pub fn read_products(path: &str) -> Result<Vec<SeedProduct>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut products = Vec::new();
    for record in reader.deserialize::<SeedProduct>() {
        products.push(record?);
    }
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(url: &str) -> SeedProduct {
        SeedProduct {
            name: "Provider Bush Bean".to_string(),
            latin_name: "Phaseolus vulgaris".to_string(),
            days_to_maturity: "50".to_string(),
            life_cycle: "Annual".to_string(),
            hybrid_status: "Open Pollinated".to_string(),
            disease_resistance: "N/A".to_string(),
            growing_info: "CULTURE: | Sow after frost.".to_string(),
            url: url.to_string(),
            image_path: "N/A".to_string(),
        }
    }

    fn temp_csv(name: &str) -> String {
        let path = std::env::temp_dir().join(format!("garden_seeds_test_{}_{}.csv", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_file_yields_empty_set() {
        let path = temp_csv("missing");
        assert!(existing_urls(&path).is_empty());
    }

    #[test]
    fn test_append_then_resume() {
        let path = temp_csv("resume");
        append_product(&path, &sample("https://example.com/a")).unwrap();
        append_product(&path, &sample("https://example.com/b")).unwrap();

        let urls = existing_urls(&path);
        assert_eq!(urls.len(), 2);
        assert!(urls.contains("https://example.com/a"));
        assert!(urls.contains("https://example.com/b"));

        let products = read_products(&path).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].url, "https://example.com/a");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_header_written_once() {
        let path = temp_csv("header");
        append_product(&path, &sample("https://example.com/a")).unwrap();
        append_product(&path, &sample("https://example.com/b")).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let header_lines = raw
            .lines()
            .filter(|l| l.starts_with("Product Name"))
            .count();
        assert_eq!(header_lines, 1);
        assert_eq!(raw.lines().count(), 3);

        let _ = std::fs::remove_file(&path);
    }
}
