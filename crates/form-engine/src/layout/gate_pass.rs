//! Gate pass geometry (A4 portrait)

use serde::{Deserialize, Serialize};

use super::geometry::{equal_columns, Frame, PageSize, PlacedFrame, INCH, MARGIN};
use crate::compiler::errors::EngineError;

/// Space reserved above the table for the logo and title
const HEADER_HEIGHT: f64 = 135.0;

/// The logo is inset 80 pt from each side of the page
const LOGO_INSET: f64 = 80.0;

/// Distance from the page top to the logo's bottom edge
const LOGO_BOTTOM: f64 = 150.0;

pub const TABLE_COLUMNS: usize = 8;

/// Logo placement; height follows the image's aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogoBox {
    pub x: f64,
    pub width: f64,
    pub bottom: f64,
}

/// Title placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitleBox {
    pub baseline: f64,
    pub size: f64,
}

/// Geometry handed to the gate pass template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePassLayout {
    pub page: PageSize,
    pub logo: LogoBox,
    pub title: TitleBox,
    pub table_frame: PlacedFrame,
    pub columns: Vec<f64>,
    pub signature_width: f64,
    pub tick_width: f64,
}

impl GatePassLayout {
    /// The table frame is never outlined
    pub fn compute() -> Result<Self, EngineError> {
        let page = PageSize::A4;

        let table_frame = Frame::new(
            MARGIN,
            MARGIN,
            page.usable_width(),
            page.usable_height() - HEADER_HEIGHT,
        );

        let logo_width = page.width - 2.0 * LOGO_INSET;

        Ok(Self {
            page,
            logo: LogoBox {
                x: (page.width - logo_width) / 2.0,
                width: logo_width,
                bottom: LOGO_BOTTOM,
            },
            title: TitleBox {
                baseline: MARGIN + HEADER_HEIGHT,
                size: 16.0,
            },
            columns: equal_columns(table_frame.content_width(), TABLE_COLUMNS)?,
            table_frame: table_frame.placed(&page),
            signature_width: 0.5 * INCH,
            tick_width: 0.4 * INCH,
        })
    }
}
