//! Data models shared across the pipeline.
//!
//! Field names are renamed through serde to match the external schemas:
//! [`SeedProduct`] matches the CSV column headers and [`ScheduleEntry`]
//! matches the JSON keys the schedule page's JavaScript reads, so both
//! serialize without any mapping layer.

use crate::classify::CropType;
use crate::growing::GrowingInfo;
use crate::schedule::PlantingDates;
use serde::{Deserialize, Serialize};

/// One scraped product, as stored in the CSV.
///
/// The CSV is append-only and keyed by `URL`: a row is written once per
/// product and later runs skip URLs they have already seen. Free-text fields
/// that could not be scraped hold the literal `"N/A"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProduct {
    #[serde(rename = "Product Name")]
    pub name: String,
    #[serde(rename = "Latin Name")]
    pub latin_name: String,
    #[serde(rename = "Days to Maturity")]
    pub days_to_maturity: String,
    #[serde(rename = "Life Cycle")]
    pub life_cycle: String,
    #[serde(rename = "Hybrid Status")]
    pub hybrid_status: String,
    #[serde(rename = "Disease Resistance")]
    pub disease_resistance: String,
    #[serde(rename = "Growing Info")]
    pub growing_info: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Image Path")]
    pub image_path: String,
}

/// A product joined with everything derived from it, ready for rendering.
#[derive(Debug, Clone)]
pub struct GuideEntry {
    pub product: SeedProduct,
    pub crop: CropType,
    pub info: GrowingInfo,
    pub dates: PlantingDates,
    /// In-page anchor slug derived from the product name.
    pub anchor: String,
}

/// One row of the planting schedule, serialized into
/// `data/schedule_data.json` and embedded in the schedule page.
///
/// `SortDate`, `SortTransplantDate`, and `SortDTM` are machine-sortable
/// shadows of the display columns; `SortTransplantDate` is empty for
/// direct-sown crops so they group together when sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Variety")]
    pub variety: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Method")]
    pub method: String,
    #[serde(rename = "Start Range")]
    pub start_range: String,
    #[serde(rename = "Transplant Range")]
    pub transplant_range: String,
    #[serde(rename = "DTM")]
    pub dtm: String,
    #[serde(rename = "SortDate")]
    pub sort_date: String,
    #[serde(rename = "SortTransplantDate")]
    pub sort_transplant_date: String,
    #[serde(rename = "SortDTM")]
    pub sort_dtm: u32,
}
