//! Output formatting: render bags and header blocks as tab-delimited text.
//!
//! This module handles the final stage of the pipeline. It provides:
//!
//! - **LineFormatter**: one line per attribute bag, plus the header block
//! - **DescriptionBlock**: the `##` description section in structured form
//! - **RunInfo**: provenance lines printed at the top of the header block
//!
//! The formatter is a pure presentation layer: it only turns data into
//! strings. Reading input and writing output is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use vartablib::data::{AttributeBag, ColumnTable};
//! use vartablib::output::LineFormatter;
//!
//! let columns = ColumnTable::new(["Uploaded_variation", "Location", "Allele"]);
//! let formatter = LineFormatter::new(columns, vec!["IMPACT", "SIFT"]);
//!
//! let bag = AttributeBag::new()
//!     .with("Uploaded_variation", "rs1")
//!     .with("Location", "1:100")
//!     .with("Allele", "A")
//!     .with("SIFT", vec!["tolerated", "0.5"])
//!     .with("IMPACT", "HIGH");
//!
//! assert_eq!(
//!     formatter.render_line(&bag),
//!     "rs1\t1:100\tA\tIMPACT=HIGH;SIFT=tolerated,0.5"
//! );
//! assert_eq!(
//!     formatter.column_header_line(),
//!     "#Uploaded_variation\tLocation\tAllele\tExtra"
//! );
//! ```

pub mod headers;
pub mod line;

pub use headers::{DescriptionBlock, RunInfo, COLUMN_SECTION, EXTRA_SECTION};
pub use line::{LineFormatter, EXTRA_COLUMN, MISSING_VALUE};
