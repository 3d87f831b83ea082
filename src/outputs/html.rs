//! Static HTML rendering.
//!
//! Two kinds of page come out of a generate run: one growing-guide page per
//! crop type under `plants/`, and a single schedule page whose table is
//! rendered client-side from a JSON array substituted into a fixed template.
//! This is string templating only; every computed value arrives ready-made
//! from the classifier, segmenter, and date calculator.

use crate::classify::CropType;
use crate::config::SeasonConfig;
use crate::growing::{GrowingInfo, NO_INFO, NOT_AVAILABLE};
use crate::models::{GuideEntry, ScheduleEntry};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Write as _;
use tokio::fs;
use tracing::{info, instrument};

const CROP_PAGE_STYLE: &str = r#"    <style>
        body { font-family: sans-serif; max-width: 800px; margin: 2rem auto; line-height: 1.6; padding: 0 1rem; }
        h1, h2, h3 { color: #2c3e50; }
        .nav { background: #eee; padding: 10px; border-radius: 5px; margin-bottom: 20px; }
        .variety { border: 1px solid #ddd; padding: 15px; border-radius: 8px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.05); }
        .variety:target { border-left: 5px solid #4CAF50; background: #f9fff9; }
        .meta { font-size: 0.9em; color: #666; }
        .dates { background: #e8f5e9; padding: 10px; border-radius: 4px; margin: 10px 0; }
        .growing-info { background: #f9f9f9; padding: 10px; border-radius: 4px; margin-top: 10px; }
        a { color: #2980b9; }
    </style>
"#;

const SCHEDULE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>__TITLE__</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; margin: 2rem; background: #f5f5f5; }
        h1 { color: #2c3e50; }
        .controls { margin-bottom: 1rem; }
        table { width: 100%; border-collapse: collapse; background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #4CAF50; color: white; cursor: pointer; user-select: none; }
        th:hover { background-color: #45a049; }
        tr:hover { background-color: #f1f1f1; }
        .method-indoor { color: #d35400; font-weight: bold; }
        .method-direct { color: #27ae60; font-weight: bold; }
        .date-cell { font-variant-numeric: tabular-nums; white-space: nowrap; }
        input[type="text"] { padding: 8px; border: 1px solid #ccc; border-radius: 4px; width: 200px; }
        .links { margin-bottom: 20px; }
        a { color: #2980b9; text-decoration: none; }
        a:hover { text-decoration: underline; }
    </style>
</head>
<body>

    <div class="links">
        <a href="garden_guide.html">Back to Garden Guide</a>
    </div>

    <h1>__TITLE__</h1>
    <p>__FROST_LINE__</p>

    <div class="controls">
        <input type="text" id="searchInput" onkeyup="filterTable()" placeholder="Search for crops...">
    </div>

    <table id="scheduleTable">
        <thead>
            <tr>
                <th onclick="sortTable('Crop')">Crop Type &#x2195;</th>
                <th onclick="sortTable('Variety')">Variety &#x2195;</th>
                <th onclick="sortTable('Method')">Method &#x2195;</th>
                <th onclick="sortTable('SortDate')">Start Date (Indoor/Sow) &#x2195;</th>
                <th onclick="sortTable('SortTransplantDate')">Transplant Date &#x2195;</th>
                <th onclick="sortTable('SortDTM')">Days to Maturity &#x2195;</th>
            </tr>
        </thead>
        <tbody id="tableBody">
            <!-- Rows will be populated by JS -->
        </tbody>
    </table>

    <script>
        const gardenData = __DATA_PLACEHOLDER__;
        let currentSort = { key: 'SortDate', asc: true };

        const tableBody = document.getElementById('tableBody');

        function renderTable(data) {
            tableBody.innerHTML = '';

            data.forEach(item => {
                const row = document.createElement('tr');
                const methodClass = item.Method === 'Start Indoors' ? 'method-indoor' : 'method-direct';

                row.innerHTML = `
                    <td>${item.Crop}</td>
                    <td><a href="${item.Link}">${item.Variety}</a></td>
                    <td class="${methodClass}">${item.Method}</td>
                    <td class="date-cell">${item["Start Range"]}</td>
                    <td class="date-cell">${item["Transplant Range"]}</td>
                    <td>${item.DTM}</td>
                `;
                tableBody.appendChild(row);
            });
        }

        function filterTable() {
            const input = document.getElementById('searchInput');
            const filter = input.value.toLowerCase();
            const filteredData = gardenData.filter(item =>
                item.Crop.toLowerCase().includes(filter) ||
                item.Variety.toLowerCase().includes(filter)
            );
            // Re-apply sort
            sortData(filteredData);
            renderTable(filteredData);
        }

        function sortTable(key) {
            if (currentSort.key === key) {
                currentSort.asc = !currentSort.asc;
            } else {
                currentSort.key = key;
                currentSort.asc = true;
            }
            // Sort full data then filter
            sortData(gardenData);
            filterTable();
        }

        function sortData(data) {
            const key = currentSort.key;
            const asc = currentSort.asc ? 1 : -1;

            data.sort((a, b) => {
                let valA = a[key];
                let valB = b[key];

                // Handle N/A
                if (valA === undefined) valA = "";
                if (valB === undefined) valB = "";

                // Case insensitive string sort if string
                if (typeof valA === 'string') valA = valA.toLowerCase();
                if (typeof valB === 'string') valB = valB.toLowerCase();

                if (valA < valB) return -1 * asc;
                if (valA > valB) return 1 * asc;
                return 0;
            });
        }

        // Initial Sort and Render
        sortData(gardenData);
        renderTable(gardenData);

    </script>
</body>
</html>
"#;

// Raw blob made readable when segmentation found nothing: pipes become
// paragraph breaks and the uppercase keys become bold labels.
fn readable_overview(full_text: &str) -> String {
    full_text
        .replace('|', "<br><br><strong>")
        .replace(':', ":</strong>")
}

fn readable_variety(full_text: &str) -> String {
    let readable = full_text.replace(" | ", "<br><br>").replace(':', ":</strong>");
    if readable.starts_with("<strong>") {
        readable
    } else {
        format!("<strong>{readable}")
    }
}

// Per-variety growing block: parsed sections when available, the readable
// raw text otherwise. Empty when there was nothing to show at all.
fn growing_block(info: &GrowingInfo) -> String {
    if info.culture == NOT_AVAILABLE && info.full_text != NO_INFO {
        return format!("<p>{}</p>", readable_variety(&info.full_text));
    }
    let mut block = String::new();
    for (label, text) in [
        ("Culture", &info.culture),
        ("Transplanting", &info.transplanting),
        ("Pests", &info.pests),
        ("Harvest", &info.harvest),
    ] {
        if text != NOT_AVAILABLE {
            let _ = write!(block, "<p><strong>{label}:</strong> {text}</p>");
        }
    }
    block
}

fn render_crop_page(crop: &str, items: &[GuideEntry]) -> String {
    let mut page = String::new();
    page.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(page, "    <title>{crop} Growing Guide</title>");
    page.push_str(CROP_PAGE_STYLE);
    page.push_str(
        "</head>\n<body>\n    <div class=\"nav\">\n        \
         <a href=\"../schedule.html\">Back to Schedule</a> | \
         <a href=\"../garden_guide.html\">Back to Garden Guide</a>\n    </div>\n\n",
    );
    let _ = writeln!(page, "    <h1>{crop} Growing Guide</h1>");

    // Crop-level overview from the first variety; variety cards repeat the
    // specifics below.
    if let Some(first) = items.first() {
        let info = &first.info;
        if info.culture == NOT_AVAILABLE && info.full_text != NO_INFO {
            let _ = write!(
                page,
                "\n    <section>\n        <h2>General Growing Info</h2>\n        \
                 <p>{}</p>\n    </section>\n",
                readable_overview(&info.full_text)
            );
        } else if info.culture != NOT_AVAILABLE {
            let _ = write!(
                page,
                "\n    <section>\n        <h2>General Culture</h2>\n        \
                 <p><strong>Soil/Culture:</strong> {}</p>\n        \
                 <p><strong>Pests &amp; Disease:</strong> {}</p>\n        \
                 <p><strong>Harvest:</strong> {}</p>\n    </section>\n",
                info.culture, info.pests, info.harvest
            );
        }
    }

    page.push_str("<h2>Varieties</h2>");
    for item in items {
        let product = &item.product;
        let image_tag = if product.image_path != NOT_AVAILABLE && !product.image_path.is_empty() {
            format!(
                "<img src=\"../{}\" alt=\"{}\" style=\"max-width: 200px; float: right; \
                 margin: 0 0 10px 10px; border-radius: 5px;\">",
                product.image_path, product.name
            )
        } else {
            String::new()
        };

        let _ = write!(
            page,
            r#"
    <div id="{anchor}" class="variety">
        <h3>{name}</h3>
        {image_tag}
        <p class="meta">
            <strong>Latin Name:</strong> {latin} |
            <strong>DTM:</strong> {dtm}
        </p>
        <p class="meta">
            <strong>Life Cycle:</strong> {lifecycle} |
            <strong>Hybrid Status:</strong> {hybrid}
        </p>
        <div class="dates">
            <p><strong>Method:</strong> {method}</p>
            <p><strong>Start Seeds:</strong> {start_range}</p>
            <p><strong>Transplant/Sow:</strong> {transplant_range}</p>
        </div>
        <p><strong>Disease Resistance:</strong> {resistance}</p>

        <div class="growing-info">
            <h4>Growing Information</h4>
            {growing}
        </div>

        <p><a href="{url}" target="_blank">View product page</a></p>
    </div>
"#,
            anchor = item.anchor,
            name = product.name,
            latin = product.latin_name,
            dtm = product.days_to_maturity,
            lifecycle = product.life_cycle,
            hybrid = product.hybrid_status,
            method = item.dates.method,
            start_range = item.dates.start_range,
            transplant_range = item.dates.transplant_range,
            resistance = product.disease_resistance,
            growing = growing_block(&item.info),
            url = product.url,
        );
    }

    page.push_str("</body></html>");
    page
}

/// Write one growing-guide page per crop type into `plants_dir`.
///
/// Returns the number of pages written.
#[instrument(level = "info", skip_all, fields(plants_dir = %plants_dir))]
pub async fn write_crop_pages(
    grouped: &BTreeMap<CropType, Vec<GuideEntry>>,
    plants_dir: &str,
) -> Result<usize, Box<dyn Error>> {
    fs::create_dir_all(plants_dir).await?;
    for (crop, items) in grouped {
        let path = format!("{}/{}.html", plants_dir, crop.label().to_lowercase());
        let page = render_crop_page(crop.label(), items);
        fs::write(&path, page).await?;
        info!(path = %path, varieties = items.len(), "Wrote crop page");
    }
    Ok(grouped.len())
}

fn render_schedule_page(
    entries: &[ScheduleEntry],
    season: &SeasonConfig,
) -> Result<String, Box<dyn Error>> {
    let data = serde_json::to_string_pretty(entries)?;
    Ok(SCHEDULE_TEMPLATE
        .replace("__TITLE__", &season.site_title)
        .replace("__FROST_LINE__", &season.frost_line())
        .replace("__DATA_PLACEHOLDER__", &data))
}

/// Write the sortable schedule page with the entries embedded as JSON.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_schedule_page(
    entries: &[ScheduleEntry],
    season: &SeasonConfig,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let page = render_schedule_page(entries, season)?;
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, page).await?;
    info!(count = entries.len(), "Wrote schedule page");
    Ok(())
}
