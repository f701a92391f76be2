//! View-state layer: the pipeline from raw lines to terminal rows.
//!
//! # Module Structure
//!
//! - `raw`: RawContent - immutable source lines
//! - `sgr`: CSI scanning and SGR decoding
//! - `segments`: keyword occurrence segments and merging
//! - `selection`: SelectedContent - lines eligible for display
//! - `layout`: DisplayContent - rows for a given width and wrap mode
//! - `offsets`: Offsets - horizontal and vertical scroll position
//!
//! Every stage is a pure function of its inputs, so a change in filters or
//! modes recomputes selection and layout, while a resize recomputes layout
//! only.

pub mod layout;
pub mod offsets;
pub mod raw;
pub mod segments;
pub mod selection;
pub mod sgr;

pub use layout::{layout, DisplayContent, DisplayLine};
pub use offsets::{Offsets, ScrollPosition};
pub use raw::RawContent;
pub use segments::Segment;
pub use selection::{select, LineOrigin, SelectedContent, SelectedLine};
pub use sgr::{SgrProcessor, SgrStyle, StyleSpan};
