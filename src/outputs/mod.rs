//! Output generation for scrape runs.
//!
//! # Submodules
//!
//! - [`text`]: one tab-separated line per website, printed to stdout
//! - [`json`]: a dated [`ScrapeReport`](crate::models::ScrapeReport) file
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 07-00-00.json
//!     └── 19-30-00.json
//! ```

pub mod json;
pub mod text;
