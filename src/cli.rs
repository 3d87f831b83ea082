//! Command-line interface definitions.
//!
//! One binary, three subcommands, matching the three stages the toolkit can
//! run on its own: scraping order history, regenerating the site from the
//! CSV, and fetching a one-off fallback image.

use clap::{Parser, Subcommand};

/// Command-line arguments for the garden seeds toolkit.
///
/// # Examples
///
/// ```sh
/// # Scrape the saved order history and rebuild the site
/// garden_seeds scrape orders data/garden_seeds.csv
///
/// # Rebuild the site from an existing CSV
/// garden_seeds generate data/garden_seeds.csv
///
/// # Fetch a fallback illustration
/// garden_seeds fetch-image "Brassica rapa Hakurei" site/images/hakurei-turnip.jpg
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a season config YAML (frost dates, site title)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape product pages linked from saved order-history HTML into the
    /// CSV, then regenerate the site from it
    Scrape {
        /// Order-history HTML file, or a directory of such files
        #[arg(default_value = "orders")]
        input_path: String,

        /// CSV file to append scraped products to
        #[arg(default_value = "data/garden_seeds.csv")]
        output_csv: String,

        /// Re-scrape URLs that are already in the CSV
        #[arg(long)]
        overwrite: bool,

        /// Stop after this many products
        #[arg(long)]
        limit: Option<usize>,

        /// Directory the static site (and images) are written to
        #[arg(long, default_value = "site")]
        site_dir: String,
    },

    /// Render the growing-guide pages, schedule page, and schedule JSON
    /// from an existing CSV
    Generate {
        /// Input CSV of scraped products
        #[arg(default_value = "data/johnnys_data_fixed.csv")]
        input_csv: String,

        /// Directory the static site is written to
        #[arg(long, default_value = "site")]
        site_dir: String,

        /// Path for the standalone schedule JSON export
        #[arg(long, default_value = "data/schedule_data.json")]
        schedule_json: String,
    },

    /// Search Wikimedia Commons and save the first usable image
    FetchImage {
        /// Search term, e.g. a latin name
        search_term: String,

        /// File the image is written to
        output_path: String,
    },
}
