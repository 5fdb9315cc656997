//! Where we are on the current page.
//!
//! `y` is measured from the top edge of the page and grows downward. The
//! cursor never lets content cross the bottom margin: callers ask for space
//! with [`PageCursor::ensure_space`] before drawing, and a fresh page is
//! started when there isn't enough.

use log::debug;

use super::{DrawCommand, LayoutPage};
use crate::config::RenderConfig;
use crate::style::Edges;

#[derive(Debug, Clone)]
pub struct PageCursor {
    page_width: f64,
    page_height: f64,
    margin: Edges,
    y: f64,
    commands: Vec<DrawCommand>,
    pages: Vec<LayoutPage>,
}

impl PageCursor {
    pub fn new(config: &RenderConfig) -> Self {
        let (page_width, page_height) = config.page_size.dimensions();
        Self {
            page_width,
            page_height,
            margin: config.margin,
            y: config.margin.top,
            commands: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// X coordinate of the left margin.
    pub fn left(&self) -> f64 {
        self.margin.left
    }

    /// X coordinate of the right margin.
    pub fn right(&self) -> f64 {
        self.page_width - self.margin.right
    }

    pub fn content_width(&self) -> f64 {
        self.right() - self.left()
    }

    /// Space left between the cursor and the bottom margin.
    pub fn remaining_height(&self) -> f64 {
        (self.page_height - self.margin.bottom - self.y).max(0.0)
    }

    /// 1-based number of the page being written.
    pub fn page_number(&self) -> usize {
        self.pages.len() + 1
    }

    /// Move the write position down the page.
    pub fn advance(&mut self, amount: f64) {
        self.y += amount;
    }

    pub fn needs_break(&self, threshold: f64) -> bool {
        self.remaining_height() < threshold
    }

    /// Close the current page and continue at the top margin of a new one.
    pub fn break_page(&mut self) {
        let commands = std::mem::take(&mut self.commands);
        self.pages.push(LayoutPage {
            width: self.page_width,
            height: self.page_height,
            commands,
        });
        self.y = self.margin.top;
        debug!("starting page {}", self.page_number());
    }

    /// Start a new page if fewer than `threshold` points remain.
    ///
    /// A page with nothing drawn on it is never abandoned; whatever follows
    /// gets the whole page. Returns whether a break happened.
    pub fn ensure_space(&mut self, threshold: f64) -> bool {
        if !self.needs_break(threshold) {
            return false;
        }
        if self.commands.is_empty() {
            debug!(
                "page {} is empty, keeping it despite {:.1}pt left for a {:.1}pt request",
                self.page_number(),
                self.remaining_height(),
                threshold
            );
            return false;
        }
        debug!(
            "page break after page {}: {:.1}pt left, {:.1}pt needed",
            self.page_number(),
            self.remaining_height(),
            threshold
        );
        self.break_page();
        true
    }

    /// Record a draw command on the current page.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Close the last page and hand back every page. There is always at
    /// least one, even if nothing was drawn.
    pub fn finish(mut self) -> Vec<LayoutPage> {
        if !self.commands.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}
