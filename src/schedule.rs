//! Planting-date computation.
//!
//! Every crop type carries a default planting method, an offset in days
//! from the last frost date, and an indoor-start week range. The scraped
//! growing-info text can override the method and the week range for most
//! crops; tomatoes, peppers, and eggplant are pinned to their defaults so
//! they get the deliberately early indoor start.
//!
//! The computation is a pure function of (crop type, text, season config):
//! no state is carried between records and absent text simply yields the
//! defaults.

use crate::classify::CropType;
use crate::config::SeasonConfig;
use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// How seed for a crop goes into the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantingType {
    /// Started indoors, moved outside after a frost-relative window.
    Transplant,
    /// Sown directly outdoors; no indoor phase.
    DirectSow,
}

impl PlantingType {
    /// The method string shown in the schedule.
    pub fn method(&self) -> &'static str {
        match self {
            PlantingType::Transplant => "Start Indoors",
            PlantingType::DirectSow => "Direct Sow",
        }
    }
}

/// Rendered transplant range for direct-sown crops.
pub const DIRECT_SOW_TRANSPLANT: &str = "N/A (Direct Sow)";

/// Per-crop defaults: offset from last frost, method, and indoor weeks.
#[derive(Debug, Clone, Copy)]
struct CropDefaults {
    offset_days: i64,
    planting_type: PlantingType,
    weeks_indoor_min: i64,
    weeks_indoor_max: i64,
}

const fn defaults(
    offset_days: i64,
    planting_type: PlantingType,
    weeks_indoor_min: i64,
    weeks_indoor_max: i64,
) -> CropDefaults {
    CropDefaults { offset_days, planting_type, weeks_indoor_min, weeks_indoor_max }
}

/// Look up the defaults row for a crop. Crops without a row of their own
/// (Other) borrow the Herb defaults.
fn defaults_for(crop: CropType) -> CropDefaults {
    use PlantingType::{DirectSow, Transplant};
    match crop {
        CropType::Tomato => defaults(0, Transplant, 6, 8),
        CropType::Pepper => defaults(7, Transplant, 8, 10),
        CropType::Eggplant => defaults(7, Transplant, 8, 10),
        CropType::Cucumber => defaults(10, DirectSow, 3, 4),
        CropType::Squash => defaults(10, DirectSow, 3, 4),
        CropType::Basil => defaults(10, Transplant, 4, 6),
        CropType::Lettuce => defaults(-28, DirectSow, 4, 6),
        CropType::Kale => defaults(-28, DirectSow, 4, 6),
        CropType::Spinach => defaults(-35, DirectSow, 4, 5),
        CropType::Pea => defaults(-42, DirectSow, 0, 0),
        CropType::Bean => defaults(10, DirectSow, 0, 0),
        CropType::Carrot => defaults(-14, DirectSow, 0, 0),
        CropType::Radish => defaults(-28, DirectSow, 0, 0),
        CropType::Turnip => defaults(-21, DirectSow, 0, 0),
        CropType::Onion => defaults(-28, Transplant, 10, 12),
        CropType::Leek => defaults(-28, Transplant, 10, 12),
        CropType::Flower => defaults(7, Transplant, 4, 6),
        CropType::Herb | CropType::Other => defaults(0, Transplant, 6, 8),
    }
}

/// Matches a transplanting-instructions header ("TRANSPLANTING:", "WHEN TO
/// TRANSPLANT:") without matching "TRANSPLANTS:", which is a yield figure.
static TRANSPLANT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bTRANSPLANT(?:ING)?\b.*?:").unwrap());

/// Matches "6-8 weeks before" / "3 weeks prior" style indoor-start advice.
static WEEKS_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)(?:\s*[–-]\s*(\d+))?\s+weeks\s+(?:before|prior)").unwrap());

/// The computed planting window for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantingDates {
    /// "Start Indoors" or "Direct Sow".
    pub method: &'static str,
    /// Rendered start window, "Mon DD - Mon DD".
    pub start_range: String,
    /// Rendered transplant window, or [`DIRECT_SOW_TRANSPLANT`].
    pub transplant_range: String,
    /// Earliest start date; the schedule's primary sort key.
    pub start_date: NaiveDate,
    /// Transplant window start, retained as a sort key for both methods.
    pub transplant_date: NaiveDate,
}

fn date_range(from: NaiveDate, to: NaiveDate) -> String {
    format!("{} - {}", from.format("%b %d"), to.format("%b %d"))
}

/// Compute the planting window for a crop.
///
/// The source text can override the defaults for crops outside the pinned
/// Tomato/Pepper/Eggplant set:
///
/// - "Direct seed (recommended)" forces direct sowing, unless the text also
///   carries transplanting instructions, which win;
/// - "Transplant (recommended)", or the bare presence of transplanting
///   instructions, forces transplanting;
/// - an "N weeks before"/"N-M weeks prior" phrase replaces the indoor week
///   range, applied only once the resolved method is transplanting.
///
/// The transplant window is always a fixed week starting at
/// `last_frost + offset`; direct-sown crops use it as their sowing window.
pub fn calculate_dates(
    crop: CropType,
    growing_info: Option<&str>,
    season: &SeasonConfig,
) -> PlantingDates {
    let default = defaults_for(crop);

    let mut weeks_min = default.weeks_indoor_min;
    let mut weeks_max = default.weeks_indoor_max;
    let mut planting_type = default.planting_type;

    // Solanaceae keep their defaults: the early indoor start is deliberate.
    let pinned = matches!(crop, CropType::Tomato | CropType::Pepper | CropType::Eggplant);

    if !pinned {
        if let Some(text) = growing_info {
            let has_transplant_info = TRANSPLANT_HEADER.is_match(text);

            if text.contains("Direct seed (recommended)") {
                if has_transplant_info {
                    planting_type = PlantingType::Transplant;
                } else {
                    planting_type = PlantingType::DirectSow;
                    weeks_min = 0;
                    weeks_max = 0;
                }
            } else if text.contains("Transplant (recommended)") || has_transplant_info {
                planting_type = PlantingType::Transplant;
            }

            if planting_type == PlantingType::Transplant {
                if let Some(caps) = WEEKS_BEFORE.captures(text) {
                    weeks_min = caps[1].parse().unwrap_or(weeks_min);
                    weeks_max = caps
                        .get(2)
                        .and_then(|m| m.as_str().parse().ok())
                        .unwrap_or(weeks_min);
                }
            }
        }
    }

    // Fixed one-week transplant window, offset from last frost.
    let transplant_start = season.last_frost_date + Duration::days(default.offset_days);
    let transplant_end = transplant_start + Duration::days(7);

    match planting_type {
        PlantingType::Transplant => {
            let start_early = transplant_start - Duration::weeks(weeks_max);
            let start_late = transplant_end - Duration::weeks(weeks_min);
            PlantingDates {
                method: planting_type.method(),
                start_range: date_range(start_early, start_late),
                transplant_range: date_range(transplant_start, transplant_end),
                start_date: start_early,
                transplant_date: transplant_start,
            }
        }
        PlantingType::DirectSow => PlantingDates {
            method: planting_type.method(),
            start_range: date_range(transplant_start, transplant_end),
            transplant_range: DIRECT_SOW_TRANSPLANT.to_string(),
            start_date: transplant_start,
            transplant_date: transplant_start,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season() -> SeasonConfig {
        SeasonConfig::default()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tomato_defaults() {
        let dates = calculate_dates(CropType::Tomato, None, &season());
        assert_eq!(dates.method, "Start Indoors");
        assert_eq!(dates.transplant_range, "May 10 - May 17");
        assert_eq!(dates.start_range, "Mar 15 - Apr 05");
        assert_eq!(dates.start_date, ymd(2026, 3, 15));
        assert_eq!(dates.transplant_date, ymd(2026, 5, 10));
    }

    #[test]
    fn test_pepper_offset_week() {
        let dates = calculate_dates(CropType::Pepper, None, &season());
        assert_eq!(dates.transplant_range, "May 17 - May 24");
    }

    #[test]
    fn test_solanaceae_ignore_overrides() {
        let text = "Direct seed (recommended) 3 weeks before last frost";
        let dates = calculate_dates(CropType::Tomato, Some(text), &season());
        assert_eq!(dates.method, "Start Indoors");
        assert_eq!(dates.start_range, "Mar 15 - Apr 05");
    }

    #[test]
    fn test_direct_sow_uses_transplant_window() {
        let dates = calculate_dates(CropType::Bean, None, &season());
        assert_eq!(dates.method, "Direct Sow");
        assert_eq!(dates.transplant_range, DIRECT_SOW_TRANSPLANT);
        // Sowing window equals the (offset) transplant window
        assert_eq!(dates.start_range, "May 20 - May 27");
        assert_eq!(dates.start_date, dates.transplant_date);
    }

    #[test]
    fn test_direct_seed_recommendation_forces_direct_sow() {
        let text = "Direct seed (recommended) into warm soil.";
        let dates = calculate_dates(CropType::Basil, Some(text), &season());
        assert_eq!(dates.method, "Direct Sow");
        assert_eq!(dates.transplant_range, DIRECT_SOW_TRANSPLANT);
    }

    #[test]
    fn test_transplant_header_beats_direct_seed_recommendation() {
        let text = "Direct seed (recommended) | TRANSPLANTING: | Set out after frost.";
        let dates = calculate_dates(CropType::Basil, Some(text), &season());
        assert_eq!(dates.method, "Start Indoors");
    }

    #[test]
    fn test_transplant_recommendation() {
        let text = "Transplant (recommended) for an early crop.";
        let dates = calculate_dates(CropType::Lettuce, Some(text), &season());
        assert_eq!(dates.method, "Start Indoors");
    }

    #[test]
    fn test_transplant_header_alone_forces_transplant() {
        let text = "CULTURE: | Fertile soil. | TRANSPLANTING: | Harden off.";
        let dates = calculate_dates(CropType::Kale, Some(text), &season());
        assert_eq!(dates.method, "Start Indoors");
    }

    #[test]
    fn test_transplants_yield_figure_is_not_instructions() {
        let text = "TRANSPLANTS: | Avg. 220 plants per 1,000 seeds.";
        let dates = calculate_dates(CropType::Lettuce, Some(text), &season());
        assert_eq!(dates.method, "Direct Sow");
    }

    #[test]
    fn test_weeks_override_single_number() {
        // 3 weeks min and max: Lettuce offset -28 puts transplanting at Apr 12-19
        let text = "TRANSPLANTING: | Sow 3 weeks before transplanting.";
        let dates = calculate_dates(CropType::Lettuce, Some(text), &season());
        assert_eq!(dates.method, "Start Indoors");
        assert_eq!(dates.transplant_range, "Apr 12 - Apr 19");
        assert_eq!(dates.start_range, "Mar 22 - Mar 29");
    }

    #[test]
    fn test_weeks_override_range() {
        let text = "TRANSPLANTING: | Start 4-6 weeks prior to setting out.";
        let dates = calculate_dates(CropType::Flower, Some(text), &season());
        // Same as the Flower defaults, but sourced from the text
        assert_eq!(dates.method, "Start Indoors");
        assert_eq!(dates.transplant_range, "May 17 - May 24");
        assert_eq!(dates.start_range, "Apr 05 - Apr 26");
    }

    #[test]
    fn test_weeks_override_ignored_for_direct_sow() {
        let text = "Direct seed (recommended) 2 weeks before last frost.";
        let dates = calculate_dates(CropType::Carrot, Some(text), &season());
        assert_eq!(dates.method, "Direct Sow");
        // Carrot offset -14: window Apr 26 - May 3
        assert_eq!(dates.start_range, "Apr 26 - May 03");
    }

    #[test]
    fn test_transplant_window_anchored_to_last_frost() {
        for crop in [CropType::Tomato, CropType::Onion, CropType::Pea, CropType::Other] {
            let dates = calculate_dates(crop, None, &season());
            assert!(dates.start_date <= dates.transplant_date);
            assert_eq!(
                dates.transplant_date,
                season().last_frost_date + Duration::days(defaults_for(crop).offset_days)
            );
        }
    }

    #[test]
    fn test_other_borrows_herb_defaults() {
        let herb = calculate_dates(CropType::Herb, None, &season());
        let other = calculate_dates(CropType::Other, None, &season());
        assert_eq!(herb, other);
    }

    #[test]
    fn test_custom_frost_date() {
        let mut season = season();
        season.last_frost_date = ymd(2027, 4, 30);
        let dates = calculate_dates(CropType::Tomato, None, &season);
        assert_eq!(dates.transplant_range, "Apr 30 - May 07");
    }
}
