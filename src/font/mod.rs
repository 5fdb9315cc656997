//! # Font Management
//!
//! Font selection and text measurement for layout.
//!
//! We only use the standard PDF fonts (Helvetica and Courier families), which
//! every viewer ships and which need no embedding. Their widths are known
//! ahead of time, so measuring a string is a table lookup per character.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use serde::{Deserialize, Serialize};

use crate::style::TextStyle;

/// Font families the renderer can lay out with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
}

/// The standard PDF font faces we reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// Pick the face for a family and weight/slant combination.
    pub fn resolve(family: FontFamily, bold: bool, italic: bool) -> Self {
        match (family, bold, italic) {
            (FontFamily::Helvetica, false, false) => Self::Helvetica,
            (FontFamily::Helvetica, true, false) => Self::HelveticaBold,
            (FontFamily::Helvetica, false, true) => Self::HelveticaOblique,
            (FontFamily::Helvetica, true, true) => Self::HelveticaBoldOblique,
            (FontFamily::Courier, false, false) => Self::Courier,
            (FontFamily::Courier, true, false) => Self::CourierBold,
            (FontFamily::Courier, false, true) => Self::CourierOblique,
            (FontFamily::Courier, true, true) => Self::CourierBoldOblique,
        }
    }

    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::Helvetica | Self::HelveticaOblique => metrics::HELVETICA,
            Self::HelveticaBold | Self::HelveticaBoldOblique => metrics::HELVETICA_BOLD,
            Self::Courier | Self::CourierBold | Self::CourierOblique | Self::CourierBoldOblique => {
                metrics::COURIER
            }
        }
    }
}

/// Text measurement shared by the layout passes of one render call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext {
    family: FontFamily,
}

impl FontContext {
    pub fn new(family: FontFamily) -> Self {
        Self { family }
    }

    pub fn family(&self) -> FontFamily {
        self.family
    }

    /// The concrete face a text style renders with.
    pub fn face(&self, style: &TextStyle) -> StandardFont {
        StandardFont::resolve(self.family, style.bold, style.italic)
    }

    /// Measure the width of a string in points.
    pub fn measure(&self, text: &str, style: &TextStyle) -> f64 {
        self.face(style).metrics().measure_string(text, style.size)
    }
}
