//! Static site and data outputs.
//!
//! # Submodules
//!
//! - [`html`]: per-crop growing-guide pages and the sortable schedule page
//! - [`json`]: the standalone schedule JSON export
//!
//! # Output structure
//!
//! ```text
//! site/
//! ├── plants/
//! │   ├── tomato.html
//! │   └── ...
//! ├── images/
//! │   └── sun-gold-cherry-tomato.jpg
//! └── schedule.html
//! data/
//! └── schedule_data.json
//! ```

pub mod html;
pub mod json;
