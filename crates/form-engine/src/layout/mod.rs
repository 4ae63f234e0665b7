//! Fixed page geometry for both forms
//!
//! Frames are specified from the bottom-left page corner and handed to the
//! templates as top-left placements, together with every table's column
//! widths.

pub mod fuel_card;
pub mod gate_pass;
pub mod geometry;

pub use fuel_card::{FuelCardColumns, FuelCardLayout};
pub use gate_pass::{GatePassLayout, LogoBox, TitleBox};
pub use geometry::{equal_columns, weighted_columns, Frame, PageSize, PlacedFrame};
