//! Page, frame and column geometry in PostScript points

use serde::{Deserialize, Serialize};

use crate::compiler::errors::EngineError;

/// Points per inch
pub const INCH: f64 = 72.0;

/// Horizontal and vertical page margin shared by both forms
pub const MARGIN: f64 = 32.0;

/// Inner padding of every frame
pub const FRAME_PADDING: f64 = 6.0;

/// Page dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait, 210 × 297 mm
    pub const A4: PageSize = PageSize {
        width: 595.275_590_551_181,
        height: 841.889_763_779_527_6,
    };

    /// The same page turned on its side (width is the longer edge)
    pub fn landscape(self) -> Self {
        PageSize {
            width: self.width.max(self.height),
            height: self.width.min(self.height),
        }
    }

    /// Width available between the side margins
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * MARGIN
    }

    /// Height available between the top and bottom margins
    pub fn usable_height(&self) -> f64 {
        self.height - 2.0 * MARGIN
    }
}

/// A rectangular region of a page, positioned from the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub show_boundary: bool,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            padding: FRAME_PADDING,
            show_boundary: false,
        }
    }

    pub fn with_boundary(mut self, show: bool) -> Self {
        self.show_boundary = show;
        self
    }

    /// Width left for content once padding is taken off both sides
    pub fn content_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    /// Distance from the page's top edge to the frame's top edge
    pub fn top(&self, page: &PageSize) -> f64 {
        page.height - (self.y + self.height)
    }

    /// Convert to top-left placement on `page`
    pub fn placed(&self, page: &PageSize) -> PlacedFrame {
        PlacedFrame {
            x: self.x,
            top: self.top(page),
            width: self.width,
            height: self.height,
            padding: self.padding,
            boundary: self.show_boundary,
        }
    }
}

/// A frame positioned from the page's top-left corner, as templates place it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedFrame {
    pub x: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub boundary: bool,
}

/// Split `width` into `count` equal columns
pub fn equal_columns(width: f64, count: usize) -> Result<Vec<f64>, EngineError> {
    if count == 0 {
        return Err(EngineError::InvalidArgument(
            "A table needs at least one column".to_string(),
        ));
    }
    Ok(vec![width / count as f64; count])
}

/// Split `width` proportionally to `weights`; the result always sums to `width`
pub fn weighted_columns(width: f64, weights: &[f64]) -> Result<Vec<f64>, EngineError> {
    if weights.is_empty() {
        return Err(EngineError::InvalidArgument(
            "A table needs at least one column".to_string(),
        ));
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0) {
        return Err(EngineError::InvalidArgument(format!(
            "Column weights must be positive, got {}",
            bad
        )));
    }

    let total: f64 = weights.iter().sum();
    Ok(weights.iter().map(|w| width * w / total).collect())
}
