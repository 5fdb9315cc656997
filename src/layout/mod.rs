//! # Page-Native Layout
//!
//! Turns a [`ResumeSnapshot`] into positioned draw commands on fixed-size
//! pages. Content flows *into* pages: every section checks the space left on
//! the current page before it draws, so a heading is never stranded at the
//! bottom of a page and text is never clipped by the bottom margin.
//!
//! The pipeline is linear:
//!
//! ```text
//! header -> summary? -> experience? -> education? -> skills? -> finish
//! ```
//!
//! Optional sections are skipped entirely when they have nothing to show.

pub mod cursor;
pub mod sections;

pub use cursor::PageCursor;

use log::debug;

use crate::config::RenderConfig;
use crate::font::{FontContext, StandardFont};
use crate::model::ResumeSnapshot;
use crate::style::Color;

/// A fully laid-out page ready for PDF serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

/// Something to paint. Coordinates are in points from the top-left corner
/// of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A single line of text; `y` is its baseline.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: StandardFont,
        size: f64,
        color: Color,
    },
    /// A horizontal stroke from `x1` to `x2`.
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        thickness: f64,
        color: Color,
    },
}

impl LayoutPage {
    /// The text of every text command on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Rule { .. } => None,
        })
    }

    /// Fonts referenced on this page.
    pub fn fonts(&self) -> impl Iterator<Item = StandardFont> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { font, .. } => Some(*font),
            DrawCommand::Rule { .. } => None,
        })
    }
}

pub struct LayoutEngine<'a> {
    config: &'a RenderConfig,
    fonts: FontContext,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            fonts: FontContext::new(config.font_family),
        }
    }

    /// Lay out the whole resume. Always returns at least one page.
    pub fn layout(&self, snapshot: &ResumeSnapshot) -> Vec<LayoutPage> {
        let config = self.config;
        let fonts = &self.fonts;
        let mut cursor = PageCursor::new(config);

        sections::header(&mut cursor, snapshot, config, fonts);

        if snapshot.summary.trim().is_empty() {
            debug!("skipping summary: empty");
        } else {
            sections::summary(&mut cursor, &snapshot.summary, config, fonts);
        }

        if snapshot.experience.is_empty() {
            debug!("skipping experience: no entries");
        } else {
            sections::experience(&mut cursor, &snapshot.experience, config, fonts);
        }

        if snapshot.education.is_empty() {
            debug!("skipping education: no entries");
        } else {
            sections::education(&mut cursor, &snapshot.education, config, fonts);
        }

        if snapshot.skills.is_empty() {
            debug!("skipping skills: no entries");
        } else {
            sections::skills(&mut cursor, snapshot, config, fonts);
        }

        cursor.finish()
    }
}
