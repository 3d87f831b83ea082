//! Season configuration.
//!
//! The frost dates anchor every planting-date computation, so they live in a
//! single value that is passed explicitly into the calculator rather than
//! read from globals. Defaults describe the 2026 Somerville season; a YAML
//! file supplied with `--config` overrides any subset of fields.
//!
//! ```yaml
//! last_frost_date: 2026-05-10
//! first_frost_date: 2026-11-05
//! site_title: Somerville Garden Schedule 2026
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio::fs;
use tracing::info;

/// Frost dates and site labeling for one growing season.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Last expected spring frost; the anchor for all planting offsets.
    pub last_frost_date: NaiveDate,
    /// First expected fall frost; closes the growing season.
    pub first_frost_date: NaiveDate,
    /// Heading used on the schedule page.
    pub site_title: String,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        SeasonConfig {
            last_frost_date: NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
            first_frost_date: NaiveDate::from_ymd_opt(2026, 11, 5).unwrap(),
            site_title: "Somerville Garden Schedule 2026".to_string(),
        }
    }
}

impl SeasonConfig {
    /// The "Last Frost Date: May 10 | First Frost Date: Nov 5" line shown
    /// under the schedule heading.
    pub fn frost_line(&self) -> String {
        format!(
            "Last Frost Date: {} | First Frost Date: {}",
            short_date(self.last_frost_date),
            short_date(self.first_frost_date)
        )
    }
}

// "May 10", day not zero-padded.
fn short_date(d: NaiveDate) -> String {
    format!("{} {}", d.format("%b"), d.day())
}

/// Load the season configuration, merging a YAML file over the defaults
/// when a path is given.
pub async fn load(path: Option<&str>) -> Result<SeasonConfig, Box<dyn Error>> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(p).await?;
            let config: SeasonConfig = serde_yaml::from_str(&raw)?;
            info!(path = %p, "Loaded season configuration");
            Ok(config)
        }
        None => Ok(SeasonConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frost_dates() {
        let config = SeasonConfig::default();
        assert_eq!(config.last_frost_date, NaiveDate::from_ymd_opt(2026, 5, 10).unwrap());
        assert_eq!(config.first_frost_date, NaiveDate::from_ymd_opt(2026, 11, 5).unwrap());
    }

    #[test]
    fn test_frost_line_formatting() {
        let config = SeasonConfig::default();
        assert_eq!(
            config.frost_line(),
            "Last Frost Date: May 10 | First Frost Date: Nov 5"
        );
    }

    #[test]
    fn test_partial_yaml_overrides_defaults() {
        let config: SeasonConfig = serde_yaml::from_str("last_frost_date: 2027-04-28\n").unwrap();
        assert_eq!(config.last_frost_date, NaiveDate::from_ymd_opt(2027, 4, 28).unwrap());
        assert_eq!(config.first_frost_date, NaiveDate::from_ymd_opt(2026, 11, 5).unwrap());
        assert_eq!(config.site_title, "Somerville Garden Schedule 2026");
    }
}
