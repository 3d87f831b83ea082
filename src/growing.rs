//! Growing-info segmentation.
//!
//! The catalog's growing-information accordion is scraped as one blob with
//! fragments joined by `" | "`. Embedded uppercase headers ("CULTURE:",
//! "HARVEST:", "DISEASE:") mark where topics change. This module runs a
//! single left-to-right pass over the fragments, maintaining a current
//! section, and buckets the prose into culture / transplanting / pests /
//! harvest. Malformed or missing input degrades to `"N/A"` placeholders;
//! nothing here fails.

/// The segmented growing information for one product.
///
/// Each section is the literal `"N/A"` or a non-empty string; `full_text`
/// always preserves the raw blob so the renderer can fall back to it when
/// segmentation found nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowingInfo {
    pub full_text: String,
    pub culture: String,
    pub transplanting: String,
    pub pests: String,
    pub harvest: String,
}

/// Placeholder for a section with no content.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown in place of the raw blob when the product had no growing info.
pub const NO_INFO: &str = "No growing info available.";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Culture,
    Transplanting,
    Pests,
    Harvest,
}

/// Top-level headers that are implied by the section they open and are not
/// repeated in the rendered text. Anything else ("DISEASE PREVENTION:",
/// "TRELLISING:") stays visible as an inline bold label.
const GENERIC_HEADERS: &[&str] = &[
    "CULTURE:",
    "TRANSPLANTING:",
    "HARVEST:",
    "INSECT PESTS AND DISEASE:",
    "DISEASE:",
    "PESTS:",
    "INSECT PESTS:",
];

/// Headers whose values duplicate structured quick-fact fields; they close
/// the current section and their values are dropped.
const DROPPED_HEADERS: &[&str] = &[
    "SCIENTIFIC NAME:",
    "DAYS TO MATURITY:",
    "TRANSPLANTS:",
    "SEEDS/OZ. (AVG.):",
    "PACKET:",
];

/// Map a header fragment to the section it opens, if any.
fn section_for_header(header: &str) -> Option<Section> {
    let key = header.to_uppercase().replace(':', "");
    let key = key.trim();
    if key.contains("CULTURE") {
        return Some(Section::Culture);
    }
    if key.contains("TRANSPLANTING") {
        return Some(Section::Transplanting);
    }
    if key.contains("PEST") || key.contains("DISEASE") {
        return Some(Section::Pests);
    }
    if key.contains("HARVEST") {
        return Some(Section::Harvest);
    }
    // Storage notes read naturally at the end of harvest
    if key.contains("STORAGE") {
        return Some(Section::Harvest);
    }
    // Trellising, pruning, and growth-habit notes belong with culture
    if key.contains("TRELLIS") || key.contains("PRUNING") {
        return Some(Section::Culture);
    }
    if key.contains("DETERMINATE") || key.contains("INDETERMINATE") {
        return Some(Section::Culture);
    }
    None
}

/// Segment a raw growing-info blob into labeled sections.
///
/// Fragments are split on `|`. A fragment ending in `:` that names a known
/// topic switches the current section; other fragments are appended,
/// space-joined, to whichever section is active (or dropped when none is).
/// `None` input yields the [`NO_INFO`] sentinel and all-`"N/A"` sections.
pub fn parse_growing_info(text: Option<&str>) -> GrowingInfo {
    let mut info = GrowingInfo {
        full_text: NO_INFO.to_string(),
        culture: NOT_AVAILABLE.to_string(),
        transplanting: NOT_AVAILABLE.to_string(),
        pests: NOT_AVAILABLE.to_string(),
        harvest: NOT_AVAILABLE.to_string(),
    };
    let Some(text) = text else {
        return info;
    };
    info.full_text = text.to_string();

    let mut sections: [Vec<String>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    let mut current: Option<Section> = None;

    for part in text.split('|') {
        let clean = part.trim();
        if clean.is_empty() {
            continue;
        }

        let mut is_header = false;
        if clean.ends_with(':') {
            if let Some(section) = section_for_header(clean) {
                current = Some(section);
                // Specific sub-headers stay visible in the rendered text
                if !GENERIC_HEADERS.contains(&clean) {
                    sections[section as usize].push(format!("<strong>{clean}</strong>"));
                }
                is_header = true;
            } else if DROPPED_HEADERS.contains(&clean) {
                current = None;
                is_header = true;
            }
        }

        if !is_header {
            if let Some(section) = current {
                sections[section as usize].push(clean.to_string());
            }
        }
    }

    let [culture, transplanting, pests, harvest] = sections;
    for (slot, parts) in [
        (&mut info.culture, culture),
        (&mut info.transplanting, transplanting),
        (&mut info.pests, pests),
        (&mut info.harvest, harvest),
    ] {
        if !parts.is_empty() {
            *slot = parts.join(" ");
        }
    }

    info
}
