//! Crop-type classification.
//!
//! Product names from the catalog are free text ("Sun Gold Cherry Tomato
//! (F1)"), so crop types are derived by substring keyword matching against
//! an ordered rule list. The first matching rule wins; rule order is part of
//! the contract, since a name can contain more than one keyword. Crop types
//! are recomputed on every run and never stored.

use std::fmt;

/// The fixed set of crop buckets the guide and schedule are organized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CropType {
    Tomato,
    Pepper,
    Eggplant,
    Cucumber,
    Squash,
    Basil,
    Lettuce,
    Kale,
    Spinach,
    Pea,
    Bean,
    Carrot,
    Radish,
    Turnip,
    Onion,
    Leek,
    Herb,
    Flower,
    Other,
}

impl CropType {
    /// Human-readable label, also used for page filenames (lowercased).
    pub fn label(&self) -> &'static str {
        match self {
            CropType::Tomato => "Tomato",
            CropType::Pepper => "Pepper",
            CropType::Eggplant => "Eggplant",
            CropType::Cucumber => "Cucumber",
            CropType::Squash => "Squash",
            CropType::Basil => "Basil",
            CropType::Lettuce => "Lettuce",
            CropType::Kale => "Kale",
            CropType::Spinach => "Spinach",
            CropType::Pea => "Pea",
            CropType::Bean => "Bean",
            CropType::Carrot => "Carrot",
            CropType::Radish => "Radish",
            CropType::Turnip => "Turnip",
            CropType::Onion => "Onion",
            CropType::Leek => "Leek",
            CropType::Herb => "Herb",
            CropType::Flower => "Flower",
            CropType::Other => "Other",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered keyword rules; matched against the lowercased product name.
/// Earlier rules win, so e.g. "Purple Bean Zinnia Mix" classifies as Bean.
const RULES: &[(&[&str], CropType)] = &[
    (&["tomato"], CropType::Tomato),
    (&["pepper", "jalapeno", "habanero"], CropType::Pepper),
    (&["eggplant"], CropType::Eggplant),
    (&["cucumber"], CropType::Cucumber),
    (&["squash", "zucchini"], CropType::Squash),
    (&["basil"], CropType::Basil),
    (&["lettuce"], CropType::Lettuce),
    (&["kale"], CropType::Kale),
    (&["spinach"], CropType::Spinach),
    (&["pea"], CropType::Pea),
    (&["bean"], CropType::Bean),
    (&["carrot"], CropType::Carrot),
    (&["radish"], CropType::Radish),
    (&["turnip"], CropType::Turnip),
    (&["onion", "chive"], CropType::Onion),
    (&["leek"], CropType::Leek),
    (
        &[
            "dill", "parsley", "cilantro", "thyme", "mint", "sage", "oregano", "lavender", "shiso",
        ],
        CropType::Herb,
    ),
    (
        &["zinnia", "marigold", "sunflower", "nasturtium", "dahlia", "echinacea"],
        CropType::Flower,
    ),
];

/// Classify a product name into a crop type.
///
/// Always returns a value; names matching no rule fall through to
/// [`CropType::Other`].
pub fn identify_crop_type(name: &str) -> CropType {
    let name = name.to_lowercase();
    for (keywords, crop) in RULES {
        if keywords.iter().any(|k| name.contains(k)) {
            return *crop;
        }
    }
    CropType::Other
}
