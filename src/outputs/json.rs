//! Schedule JSON export.
//!
//! The same array that gets embedded in the schedule page is also written
//! as a standalone pretty-printed file so other tools (spreadsheets, a
//! future calendar import) can consume it without scraping the HTML.

use crate::models::ScheduleEntry;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write the schedule entries to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_schedule(entries: &[ScheduleEntry], path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(entries)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, json).await?;
    info!(count = entries.len(), "Wrote schedule JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ScheduleEntry {
        ScheduleEntry {
            crop: "Pea".to_string(),
            variety: "Sugar Snap".to_string(),
            link: "plants/pea.html#sugar-snap".to_string(),
            method: "Direct Sow".to_string(),
            start_range: "Mar 29 - Apr 05".to_string(),
            transplant_range: "N/A (Direct Sow)".to_string(),
            dtm: "62".to_string(),
            sort_date: "2026-03-29".to_string(),
            sort_transplant_date: String::new(),
            sort_dtm: 62,
        }
    }

    #[tokio::test]
    async fn test_write_schedule_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "garden_seeds_schedule_test_{}.json",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().into_owned();

        write_schedule(&[entry()], &path_str).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ScheduleEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].variety, "Sugar Snap");
        assert_eq!(parsed[0].sort_transplant_date, "");

        let _ = std::fs::remove_file(&path);
    }
}
