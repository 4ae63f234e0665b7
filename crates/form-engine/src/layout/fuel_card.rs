//! Fuel card management form geometry (A4 landscape)

use serde::{Deserialize, Serialize};

use super::geometry::{equal_columns, weighted_columns, Frame, PageSize, PlacedFrame, INCH, MARGIN};
use crate::compiler::errors::EngineError;

/// Relative widths of SN, DATE, BUSINESS PURPOSE, DISTANCE, RATE, AMOUNT
pub const BUSINESS_COLUMN_WEIGHTS: [f64; 6] = [0.2, 0.9, 3.0, 0.7, 0.6, 0.6];

/// Header frames sit at 83% of the usable height and take 20% of it
const HEADER_Y_RATIO: f64 = 0.83;
const HEADER_HEIGHT_RATIO: f64 = 0.2;
const BODY_HEIGHT_RATIO: f64 = 0.76;

/// Column widths of every table on the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCardColumns {
    pub vehicle: Vec<f64>,
    pub business: Vec<f64>,
    pub approval: Vec<f64>,
    pub accountability: Vec<f64>,
    pub agreement: Vec<f64>,
}

/// Geometry handed to the fuel card template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCardLayout {
    pub page: PageSize,
    pub logo_frame: PlacedFrame,
    pub vehicle_frame: PlacedFrame,
    pub body_frame: PlacedFrame,
    pub logo_width: f64,
    pub signature_width: f64,
    pub columns: FuelCardColumns,
}

impl FuelCardLayout {
    pub fn compute(show_boundaries: bool) -> Result<Self, EngineError> {
        let page = PageSize::A4.landscape();
        let half = page.usable_width() / 2.0;
        let usable_height = page.usable_height();

        let logo_frame = Frame::new(
            MARGIN,
            usable_height * HEADER_Y_RATIO,
            half,
            usable_height * HEADER_HEIGHT_RATIO,
        )
        .with_boundary(show_boundaries);
        let vehicle_frame = Frame::new(
            MARGIN + half,
            usable_height * HEADER_Y_RATIO,
            half,
            usable_height * HEADER_HEIGHT_RATIO,
        )
        .with_boundary(show_boundaries);
        let body_frame = Frame::new(
            MARGIN,
            MARGIN,
            page.usable_width(),
            usable_height * BODY_HEIGHT_RATIO,
        )
        .with_boundary(show_boundaries);

        let body = body_frame.content_width();
        let columns = FuelCardColumns {
            vehicle: equal_columns(vehicle_frame.content_width(), 2)?,
            business: weighted_columns(body, &BUSINESS_COLUMN_WEIGHTS)?,
            approval: equal_columns(body, 3)?,
            accountability: equal_columns(body, 2)?,
            agreement: equal_columns(body, 1)?,
        };

        Ok(Self {
            page,
            logo_frame: logo_frame.placed(&page),
            vehicle_frame: vehicle_frame.placed(&page),
            body_frame: body_frame.placed(&page),
            logo_width: 4.25 * INCH,
            signature_width: 0.5 * INCH,
            columns,
        })
    }
}
