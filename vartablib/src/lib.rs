//! # vartablib
//!
//! Tab-delimited rendering of annotated genomic variant records.
//!
//! ## Overview
//!
//! Each variant-allele/feature overlap arrives as an [`AttributeBag`]: a
//! mapping from field name to a scalar or a list of scalars. This library
//! renders a bag as one line of text with:
//!
//! - **Fixed columns**: a known set of fields in a fixed order, `-` when absent
//! - **Extra**: every other field as `key=value`, joined by `;`
//!
//! and produces the matching header block: run provenance, a description for
//! every column and Extra key, and the `#`-prefixed column name line.
//!
//! ## Pipeline
//!
//! 1. **data**: build bags and the fixed [`ColumnTable`]
//! 2. **fields**: resolve the run's Extra candidates and their order
//! 3. **output**: render lines and headers with [`LineFormatter`]
//!
//! Nothing here performs I/O beyond loading configuration files on request;
//! reading records and writing lines is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use vartablib::{AttributeBag, ColumnTable, LineFormatter, RunConfig};
//!
//! let config = RunConfig::new().flags(["symbol", "sift"]);
//! let formatter = LineFormatter::from_config(ColumnTable::vep(), config);
//!
//! let bag = AttributeBag::from_json_str(
//!     r#"{"Uploaded_variation": "rs1", "Location": "1:100", "Allele": "A",
//!         "SIFT": ["tolerated", 0.5], "SYMBOL": "BRCA2", "IMPACT": "HIGH"}"#,
//! )
//! .unwrap();
//!
//! let line = formatter.render_line(&bag);
//! assert!(line.starts_with("rs1\t1:100\tA\t-"));
//! assert!(line.ends_with("\tIMPACT=HIGH;SYMBOL=BRCA2;SIFT=tolerated,0.5"));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod fields;
pub mod output;

pub use config::RunConfig;
pub use data::{AttributeBag, ColumnTable, FieldValue};
pub use error::VartabError;
pub use fields::{
    CustomKind, CustomTrack, FieldOrderIndex, FieldSource, HeaderDescriptor, HeaderProvider,
    PluginHeaders,
};
pub use output::{DescriptionBlock, LineFormatter, RunInfo};

/// Result type for vartablib operations
pub type Result<T> = std::result::Result<T, VartabError>;
