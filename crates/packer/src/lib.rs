//! Label/value row packing and cross-panel column alignment.
//!
//! A [`RowPacker`] owns one panel's rows and derives column widths and row
//! offsets from the natural sizes the host reports. A [`PackerEqualiser`]
//! then brings several packers to shared column widths so that independently
//! built panels line up.
//!
//! ```ignore
//! let mut personal = RowPacker::new(metrics.clone());
//! personal.add_row(&measure, "Surname", surname_field, Resizability::HORIZONTAL)?;
//!
//! let mut address = RowPacker::new(metrics);
//! address.add_row(&measure, "Post code", postcode_field, Resizability::FIXED)?;
//!
//! equalise_packers(&mut [&mut personal, &mut address])?;
//! let personal_layout = personal.pack();
//! let address_layout  = address.pack();
//! ```

pub mod equaliser;
pub mod packer;
pub mod row;

pub use equaliser::{compute_equalised_widths, equalise_packers, PackerEqualiser, PackerWidths};
pub use packer::{PackedLayout, PackerMetrics, RowPacker, RowPlacement, MAX_VALUE_COLUMNS};
pub use row::{ColumnSpan, Resizability, Row, RowSpec, Slot};
