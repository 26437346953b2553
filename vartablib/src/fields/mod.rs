//! Extra field resolution: which keys a run uses, and in what order.
//!
//! - **Flags**: the run-flag table and the [`FieldSource`] seam
//! - **Order**: [`FieldOrderIndex`], the rank used to sort Extra keys
//! - **Headers**: [`HeaderDescriptor`] and the plugin/custom-track providers

pub mod flags;
pub mod headers;
pub mod order;

pub use flags::{
    fields_for_flag, is_known_flag, resolve_flag_fields, FieldSource, FlagFields,
    DEFAULT_EXTRA_FIELDS, FLAG_FIELDS,
};
pub use headers::{
    CustomKind, CustomTrack, HeaderDescriptor, HeaderProvider, PluginHeaders, DESCRIPTION_MARKER,
};
pub use order::FieldOrderIndex;
