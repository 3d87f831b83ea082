//! # Garden Seeds
//!
//! A toolkit that turns a seed company's order history into a personal
//! planting guide. It scrapes the product page for each purchased variety,
//! normalizes the data into a CSV, and renders a static site: one growing
//! guide per crop type plus a sortable planting schedule computed from the
//! local frost dates.
//!
//! ## Usage
//!
//! ```sh
//! garden_seeds scrape orders data/garden_seeds.csv
//! garden_seeds generate data/garden_seeds.csv
//! garden_seeds fetch-image "Brassica rapa Hakurei" site/images/hakurei-turnip.jpg
//! ```
//!
//! ## Architecture
//!
//! The scrape pipeline is linear and deliberately sequential:
//! 1. **Indexing**: extract product URLs from the saved order history
//! 2. **Fetching**: download each product page, two seconds apart
//! 3. **Storage**: append parsed records to the CSV, resumable by URL
//! 4. **Output**: classify, segment, compute dates, render the site

use clap::Parser;
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod classify;
mod cli;
mod config;
mod growing;
mod models;
mod outputs;
mod schedule;
mod scrapers;
mod store;
mod utils;

use classify::CropType;
use cli::{Cli, Command};
use config::SeasonConfig;
use models::{GuideEntry, ScheduleEntry};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("garden_seeds starting up");

    let args = Cli::parse();
    let season = config::load(args.config.as_deref()).await?;
    info!(
        last_frost = %season.last_frost_date,
        first_frost = %season.first_frost_date,
        "Season configuration ready"
    );

    match args.command {
        Command::Scrape { input_path, output_csv, overwrite, limit, site_dir } => {
            run_scrape(&input_path, &output_csv, overwrite, limit, &site_dir).await?;
            // A fresh scrape always ends with a fresh site
            run_generate(&output_csv, &site_dir, "data/schedule_data.json", &season).await?;
        }
        Command::Generate { input_csv, site_dir, schedule_json } => {
            run_generate(&input_csv, &site_dir, &schedule_json, &season).await?;
        }
        Command::FetchImage { search_term, output_path } => {
            let client = reqwest::Client::builder()
                .user_agent(scrapers::USER_AGENT)
                .build()?;
            scrapers::wikimedia::fetch_image(&client, &search_term, &output_path).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Scrape every product linked from the order history into the CSV.
///
/// One URL at a time with a fixed politeness delay; records are appended as
/// soon as they parse, so an interrupted run resumes where it left off.
#[instrument(level = "info", skip_all, fields(input_path = %input_path, output_csv = %output_csv))]
async fn run_scrape(
    input_path: &str,
    output_csv: &str,
    overwrite: bool,
    limit: Option<usize>,
    site_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let images_dir = format!("{}/images", site_dir.trim_end_matches('/'));
    utils::ensure_writable_dir(&images_dir).await?;

    let urls = scrapers::orders::collect_order_urls(input_path).await?;

    let existing: HashSet<String> = if overwrite {
        HashSet::new()
    } else {
        store::existing_urls(output_csv)
    };
    if !existing.is_empty() {
        info!(count = existing.len(), "Resuming; already-scraped URLs will be skipped");
    }

    let client = reqwest::Client::builder()
        .user_agent(scrapers::USER_AGENT)
        .build()?;

    let total = urls.len();
    let mut scraped = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for (i, url) in urls.iter().enumerate() {
        if let Some(limit) = limit {
            if i >= limit {
                info!(limit, "Reached scrape limit");
                break;
            }
        }
        if existing.contains(url) {
            info!(index = i + 1, total, %url, "Skipping (already scraped)");
            skipped += 1;
            continue;
        }

        info!(index = i + 1, total, %url, "Scraping product");
        match scrapers::product::fetch_product(&client, url, &images_dir).await {
            Ok(Some(product)) => {
                info!(name = %product.name, dtm = %product.days_to_maturity, "Scraped product");
                match store::append_product(output_csv, &product) {
                    Ok(()) => scraped += 1,
                    Err(e) => {
                        error!(error = %e, %url, "Failed to append record");
                        failed += 1;
                    }
                }
            }
            Ok(None) => {
                warn!(%url, "Product page yielded no data");
                failed += 1;
            }
            Err(e) => {
                error!(error = %e, %url, "Scrape failed; skipping");
                failed += 1;
            }
        }

        // Politeness throttle between catalog requests
        sleep(Duration::from_secs(2)).await;
    }

    info!(total, scraped, skipped, failed, "Scrape complete");
    Ok(())
}

/// Render the full static site and schedule export from the CSV.
#[instrument(level = "info", skip_all, fields(input_csv = %input_csv, site_dir = %site_dir))]
async fn run_generate(
    input_csv: &str,
    site_dir: &str,
    schedule_json: &str,
    season: &SeasonConfig,
) -> Result<(), Box<dyn Error>> {
    if !Path::new(input_csv).exists() {
        error!(path = %input_csv, "Input CSV not found");
        return Err(format!("input CSV {input_csv:?} not found").into());
    }

    let products = store::read_products(input_csv)?;
    info!(count = products.len(), "Read product records");

    let mut grouped: BTreeMap<CropType, Vec<GuideEntry>> = BTreeMap::new();
    let mut schedule_entries: Vec<ScheduleEntry> = Vec::new();

    for product in products {
        if product.name.trim().is_empty() {
            warn!(url = %product.url, "Skipping row with empty product name");
            continue;
        }

        let crop = classify::identify_crop_type(&product.name);
        let growing_text = (!product.growing_info.trim().is_empty())
            .then_some(product.growing_info.as_str());
        let info = growing::parse_growing_info(growing_text);
        let dates = schedule::calculate_dates(crop, growing_text, season);
        let anchor = utils::anchor_slug(&product.name);

        // Direct-sown crops carry an empty transplant sort key so they
        // group together in the schedule table
        let sort_transplant_date = if dates.method == "Start Indoors" {
            dates.transplant_date.to_string()
        } else {
            String::new()
        };

        schedule_entries.push(ScheduleEntry {
            crop: crop.label().to_string(),
            variety: product.name.clone(),
            link: format!("plants/{}.html#{}", crop.label().to_lowercase(), anchor),
            method: dates.method.to_string(),
            start_range: dates.start_range.clone(),
            transplant_range: dates.transplant_range.clone(),
            dtm: product.days_to_maturity.clone(),
            sort_date: dates.start_date.to_string(),
            sort_transplant_date,
            sort_dtm: utils::first_number(&product.days_to_maturity).unwrap_or(999),
        });

        grouped
            .entry(crop)
            .or_default()
            .push(GuideEntry { product, crop, info, dates, anchor });
    }

    let plants_dir = format!("{}/plants", site_dir.trim_end_matches('/'));
    let crop_pages = outputs::html::write_crop_pages(&grouped, &plants_dir).await?;

    outputs::json::write_schedule(&schedule_entries, schedule_json).await?;

    let schedule_path = format!("{}/schedule.html", site_dir.trim_end_matches('/'));
    outputs::html::write_schedule_page(&schedule_entries, season, &schedule_path).await?;

    info!(
        crop_pages,
        entries = schedule_entries.len(),
        "Generated crop pages, schedule data, and schedule page"
    );
    Ok(())
}
