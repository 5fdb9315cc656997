//! # Render Configuration
//!
//! Page geometry, typography and pagination thresholds for one render.
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it changes:
//!
//! ```json
//! { "pageSize": "A4", "margin": { "top": 40, "right": 50, "bottom": 40, "left": 50 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::font::FontFamily;
use crate::style::{Color, Edges, PageSize, TextStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub page_size: PageSize,
    #[serde(deserialize_with = "deserialize_margin")]
    pub margin: Edges,
    pub font_family: FontFamily,

    /// The candidate's name at the top of the first page.
    pub name: TextStyle,
    /// Email / phone / address line under the name.
    pub contact: TextStyle,
    pub section_title: TextStyle,
    /// Job title or degree.
    pub entry_title: TextStyle,
    /// Company or institution.
    pub entry_subtitle: TextStyle,
    pub date: TextStyle,
    /// Summary paragraphs and description lines.
    pub body: TextStyle,
    /// "Expert:", "Advanced:", ...
    pub skill_label: TextStyle,
    pub skill_list: TextStyle,

    /// Line height as a multiple of the font size.
    pub line_spacing: f64,
    /// Vertical gap after each section.
    pub section_spacing: f64,
    /// Vertical gap after each experience or education entry.
    pub entry_spacing: f64,
    /// Horizontal offset of bullet markers from the left margin.
    pub bullet_indent: f64,

    /// Space required below the cursor before a section heading is drawn.
    pub section_threshold: f64,
    /// Space required below the cursor before an entry is drawn.
    pub entry_threshold: f64,

    pub education_max_lines: usize,
    pub education_max_chars: usize,

    pub contact_separator: String,
    pub rule_color: Color,
    pub rule_thickness: f64,

    /// Flate-compress page content streams.
    pub compress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margin: Edges::uniform(50.0),
            font_family: FontFamily::Helvetica,
            name: TextStyle::bold(24.0),
            contact: TextStyle::regular(10.0),
            section_title: TextStyle::bold(14.0),
            entry_title: TextStyle::bold(12.0),
            entry_subtitle: TextStyle::italic(11.0),
            date: TextStyle::regular(10.0),
            body: TextStyle::regular(10.5),
            skill_label: TextStyle::bold(11.0),
            skill_list: TextStyle::regular(11.0),
            line_spacing: 1.25,
            section_spacing: 14.0,
            entry_spacing: 10.0,
            bullet_indent: 10.0,
            section_threshold: 150.0,
            entry_threshold: 100.0,
            education_max_lines: 3,
            education_max_chars: 80,
            contact_separator: " | ".to_string(),
            rule_color: Color::BLACK,
            rule_thickness: 1.0,
            compress: true,
        }
    }
}

/// Accepts either a single number (all four edges) or an edge object.
fn deserialize_margin<'de, D>(deserializer: D) -> Result<Edges, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MarginRepr {
        Uniform(f64),
        Edges(Edges),
    }

    Ok(match MarginRepr::deserialize(deserializer)? {
        MarginRepr::Uniform(v) => Edges::uniform(v),
        MarginRepr::Edges(e) => e,
    })
}

impl RenderConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that leave no usable content area or whose
    /// measurements cannot produce a sane layout.
    pub fn validate(&self) -> Result<(), RenderError> {
        let (page_w, page_h) = self.page_size.dimensions();
        if !(page_w > 0.0 && page_h > 0.0) {
            return Err(invalid(format!(
                "page size must be positive, got {}x{}",
                page_w, page_h
            )));
        }

        let m = &self.margin;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !(*v >= 0.0))
        {
            return Err(invalid("margins must not be negative".to_string()));
        }
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(invalid(format!(
                "margins leave no content area on a {}x{} page",
                page_w, page_h
            )));
        }

        for (role, style) in self.text_styles() {
            if !(style.size > 0.0) {
                return Err(invalid(format!(
                    "font size for `{}` must be positive, got {}",
                    role, style.size
                )));
            }
        }

        if !(self.line_spacing > 0.0) {
            return Err(invalid(format!(
                "lineSpacing must be positive, got {}",
                self.line_spacing
            )));
        }

        for (role, style) in self.text_styles() {
            if self.line_height(style) > self.content_height() {
                return Err(invalid(format!(
                    "a line of `{}` text ({}pt) does not fit in a content height of {}",
                    role,
                    self.line_height(style),
                    self.content_height()
                )));
            }
        }

        let non_negative = [
            ("sectionSpacing", self.section_spacing),
            ("entrySpacing", self.entry_spacing),
            ("bulletIndent", self.bullet_indent),
            ("sectionThreshold", self.section_threshold),
            ("entryThreshold", self.entry_threshold),
            ("ruleThickness", self.rule_thickness),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(format!(
                    "{} must not be negative, got {}",
                    field, value
                )));
            }
        }

        if self.bullet_indent >= self.content_width() {
            return Err(invalid(format!(
                "bulletIndent {} leaves no room for text in a content width of {}",
                self.bullet_indent,
                self.content_width()
            )));
        }

        Ok(())
    }

    pub fn content_width(&self) -> f64 {
        self.page_size.dimensions().0 - self.margin.horizontal()
    }

    pub fn content_height(&self) -> f64 {
        self.page_size.dimensions().1 - self.margin.vertical()
    }

    /// Distance between consecutive baselines for text in `style`.
    pub fn line_height(&self, style: &TextStyle) -> f64 {
        style.size * self.line_spacing
    }

    fn text_styles(&self) -> [(&'static str, &TextStyle); 9] {
        [
            ("name", &self.name),
            ("contact", &self.contact),
            ("sectionTitle", &self.section_title),
            ("entryTitle", &self.entry_title),
            ("entrySubtitle", &self.entry_subtitle),
            ("date", &self.date),
            ("body", &self.body),
            ("skillLabel", &self.skill_label),
            ("skillList", &self.skill_list),
        ]
    }
}

fn invalid(message: String) -> RenderError {
    RenderError::InvalidConfig(message)
}
