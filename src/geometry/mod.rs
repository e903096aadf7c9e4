//! Page geometry and unit conversion.
//!
//! Layout works in user units of millimetres measured from the top-left corner
//! of the page, the way a printed A4 sheet is usually described. Font sizes stay
//! in points; [`pt_to_mm`] and [`mm_to_pt`] bridge the two.

use serde::{Deserialize, Serialize};

/// Points per millimetre (1 inch = 72 points = 25.4 mm).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimetres to points.
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Convert points to millimetres.
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

/// Physical page layout in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
    /// Top margin (where the running header starts)
    pub margin_top: f32,
    /// Bottom margin; no line may cross `height - margin_bottom`
    pub margin_bottom: f32,
    /// Height reserved below the top margin for the running header
    pub header_height: f32,
    /// Distance of the footer line box from the bottom edge
    pub footer_offset: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4 portrait with 1 cm side margins and a 2 cm page-break margin.
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 10.0,
            margin_right: 10.0,
            margin_top: 10.0,
            margin_bottom: 20.0,
            header_height: 10.0,
            footer_offset: 15.0,
        }
    }

    /// Width available to text between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// First y offset available to body content on every page.
    pub fn content_top(&self) -> f32 {
        self.margin_top + self.header_height
    }

    /// The y offset past which no line may extend.
    pub fn break_threshold(&self) -> f32 {
        self.height - self.margin_bottom
    }

    /// Top of the footer line box.
    pub fn footer_top(&self) -> f32 {
        self.height - self.footer_offset
    }

    /// Right edge of the content area.
    pub fn content_right(&self) -> f32 {
        self.width - self.margin_right
    }

    /// Whether the geometry leaves any room for content.
    pub fn is_usable(&self) -> bool {
        self.content_width() > 0.0 && self.content_top() < self.break_threshold()
    }
}
