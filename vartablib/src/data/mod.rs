//! Data model: attribute bags and the fixed column table.
//!
//! This module holds the inputs of the rendering pipeline:
//!
//! - **Values**: [`FieldValue`] (scalar or sequence) and [`AttributeBag`]
//! - **Columns**: [`ColumnTable`], the fixed columns and field descriptions
//!
//! ## Example
//!
//! ```rust
//! use vartablib::data::{AttributeBag, ColumnTable};
//!
//! let bag = AttributeBag::new()
//!     .with("Uploaded_variation", "rs1")
//!     .with("SIFT", vec!["tolerated", "0.5"]);
//! assert_eq!(bag.get("SIFT").unwrap().to_string(), "tolerated,0.5");
//!
//! let table = ColumnTable::vep();
//! assert!(table.is_fixed("Uploaded_variation"));
//! ```

pub mod columns;
pub mod value;

pub use columns::{ColumnTable, FIELD_DESCRIPTIONS, UNKNOWN_DESCRIPTION, VEP_COLUMNS};
pub use value::{AttributeBag, FieldValue};
