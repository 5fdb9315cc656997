//! Section renderers.
//!
//! Each renderer draws one part of the resume through the shared
//! [`PageCursor`] and leaves the cursor below what it drew. Space checks all
//! go through `ensure_space`: the section threshold before a heading, the
//! entry threshold before each entry, and the line height before every line
//! of text.

use super::{DrawCommand, PageCursor};
use crate::config::RenderConfig;
use crate::font::FontContext;
use crate::model::{EducationEntry, ExperienceEntry, ResumeSnapshot};
use crate::style::TextStyle;
use crate::text::{collapse_whitespace, truncate_chars, TextLayout};

pub const SUMMARY_TITLE: &str = "Professional Summary";
pub const EXPERIENCE_TITLE: &str = "Experience";
pub const EDUCATION_TITLE: &str = "Education";
pub const SKILLS_TITLE: &str = "Skills";

/// Prefix for description lines that carry no marker of their own.
const DEFAULT_LEAD: &str = "\u{2022} ";
/// Gap between an entry title and its right-aligned date range.
const DATE_GAP: f64 = 12.0;
/// Space between the contact line and the header rule.
const HEADER_RULE_GAP: f64 = 4.0;
/// Space between a rule and the text below it.
const RULE_PADDING: f64 = 6.0;

/// Drawing helpers bound to one configuration.
struct Pen<'a> {
    config: &'a RenderConfig,
    fonts: &'a FontContext,
    text: TextLayout<'a>,
}

impl<'a> Pen<'a> {
    fn new(config: &'a RenderConfig, fonts: &'a FontContext) -> Self {
        Self {
            config,
            fonts,
            text: TextLayout::new(fonts),
        }
    }

    fn measure(&self, text: &str, style: &TextStyle) -> f64 {
        self.text.measure(text, style)
    }

    fn text_at(&self, cursor: &mut PageCursor, x: f64, baseline: f64, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        cursor.push(DrawCommand::Text {
            x,
            y: baseline,
            text: text.to_string(),
            font: self.fonts.face(style),
            size: style.size,
            color: style.color,
        });
    }

    /// One line of text at `x`, on a new page if this one is full.
    fn line(&self, cursor: &mut PageCursor, x: f64, text: &str, style: &TextStyle) {
        let line_height = self.config.line_height(style);
        cursor.ensure_space(line_height);
        let baseline = cursor.y() + style.size;
        self.text_at(cursor, x, baseline, text, style);
        cursor.advance(line_height);
    }

    fn centered(&self, cursor: &mut PageCursor, text: &str, style: &TextStyle) {
        let width = self.measure(text, style);
        let x = cursor.left() + ((cursor.content_width() - width) / 2.0).max(0.0);
        self.line(cursor, x, text, style);
    }

    /// A horizontal rule across the content width at the cursor. The caller
    /// has already made room for it.
    fn rule(&self, cursor: &mut PageCursor) {
        let thickness = self.config.rule_thickness;
        cursor.push(DrawCommand::Rule {
            x1: cursor.left(),
            x2: cursor.right(),
            y: cursor.y() + thickness / 2.0,
            thickness,
            color: self.config.rule_color,
        });
        cursor.advance(thickness + RULE_PADDING);
    }

    /// Section title and its rule. Room for both is reserved up front so the
    /// rule never lands on the page after its title.
    fn heading(&self, cursor: &mut PageCursor, title: &str) {
        let config = self.config;
        let needed = config.line_height(&config.section_title) + config.rule_thickness;
        cursor.ensure_space(config.section_threshold.max(needed));
        let left = cursor.left();
        self.line(cursor, left, title, &self.config.section_title);
        self.rule(cursor);
    }

    /// Title on the left with the date range right-aligned on the same
    /// baseline, then the subtitle underneath.
    fn entry_heading(&self, cursor: &mut PageCursor, title: &str, subtitle: &str, dates: &str) {
        let config = self.config;
        let (left, right) = (cursor.left(), cursor.right());
        cursor.ensure_space(config.entry_threshold);

        let date_width = self.measure(dates, &config.date);
        let mut title_width = cursor.content_width() - date_width - DATE_GAP;
        if title_width <= 0.0 {
            title_width = cursor.content_width();
        }
        let mut title_lines = self
            .text
            .wrap_words(title, &config.entry_title, title_width)
            .into_iter();

        let line_height = config
            .line_height(&config.entry_title)
            .max(config.line_height(&config.date));
        cursor.ensure_space(line_height);
        let baseline = cursor.y() + config.entry_title.size.max(config.date.size);
        let first = title_lines.next().unwrap_or_default();
        self.text_at(cursor, left, baseline, &first, &config.entry_title);
        self.text_at(cursor, right - date_width, baseline, dates, &config.date);
        cursor.advance(line_height);

        for rest in title_lines {
            self.line(cursor, left, &rest, &config.entry_title);
        }

        for line in self
            .text
            .wrap_words(subtitle, &config.entry_subtitle, cursor.content_width())
        {
            self.line(cursor, left, &line, &config.entry_subtitle);
        }
    }

    /// A bulleted description line, wrapped with continuations aligned to
    /// the text after the marker.
    fn bullet(&self, cursor: &mut PageCursor, raw: &str) {
        let style = &self.config.body;
        let (lead, body) = split_marker(raw);
        let marker_x = cursor.left() + self.config.bullet_indent;
        let text_x = marker_x + self.measure(lead, style);

        let mut lines = self
            .text
            .wrap_words(body, style, cursor.right() - text_x)
            .into_iter();
        match lines.next() {
            Some(first) => self.line(cursor, marker_x, &format!("{}{}", lead, first), style),
            None => self.line(cursor, marker_x, lead.trim_end(), style),
        }
        for rest in lines {
            self.line(cursor, text_x, &rest, style);
        }
    }
}

/// Split a description line into the lead drawn before the text column and
/// the text itself. A line that already starts with `•` or `-` keeps its own
/// marker, with a single space after it only if it had spacing there; any
/// other line gets the default bullet.
fn split_marker(line: &str) -> (&'static str, &str) {
    let line = line.trim();
    let (marker, spaced) = match line.chars().next() {
        Some('\u{2022}') => ("\u{2022}", "\u{2022} "),
        Some('-') => ("-", "- "),
        _ => return (DEFAULT_LEAD, line),
    };
    let rest = &line[marker.len()..];
    let body = rest.trim_start();
    if body.len() < rest.len() {
        (spaced, body)
    } else {
        (marker, rest)
    }
}

/// The non-empty contact values, address lines collapsed into one.
fn contact_parts(snapshot: &ResumeSnapshot) -> Vec<String> {
    let address = snapshot
        .address
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    [snapshot.email.trim(), snapshot.phone.trim(), address.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Upper-cased name and contact line, both centered, closed by a rule.
pub fn header(
    cursor: &mut PageCursor,
    snapshot: &ResumeSnapshot,
    config: &RenderConfig,
    fonts: &FontContext,
) {
    let pen = Pen::new(config, fonts);
    let width = cursor.content_width();

    let name = snapshot.full_name.trim().to_uppercase();
    for line in pen.text.wrap_words(&name, &config.name, width) {
        pen.centered(cursor, &line, &config.name);
    }

    let parts = contact_parts(snapshot);
    for line in pen
        .text
        .wrap_joined(&parts, &config.contact_separator, &config.contact, width)
    {
        pen.centered(cursor, &line, &config.contact);
    }

    cursor.advance(HEADER_RULE_GAP);
    cursor.ensure_space(config.rule_thickness);
    pen.rule(cursor);
    cursor.advance(config.section_spacing);
}

/// Each line of the summary wrapped as its own paragraph. Blank lines are
/// dropped.
pub fn summary(cursor: &mut PageCursor, summary: &str, config: &RenderConfig, fonts: &FontContext) {
    let pen = Pen::new(config, fonts);
    pen.heading(cursor, SUMMARY_TITLE);

    let (left, width) = (cursor.left(), cursor.content_width());
    for paragraph in summary.lines().map(str::trim).filter(|l| !l.is_empty()) {
        for line in pen.text.wrap_words(paragraph, &config.body, width) {
            pen.line(cursor, left, &line, &config.body);
        }
    }
    cursor.advance(config.section_spacing);
}

pub fn experience(
    cursor: &mut PageCursor,
    entries: &[ExperienceEntry],
    config: &RenderConfig,
    fonts: &FontContext,
) {
    let pen = Pen::new(config, fonts);
    pen.heading(cursor, EXPERIENCE_TITLE);

    for entry in entries {
        pen.entry_heading(cursor, &entry.job_title, &entry.company, &entry.date_range());
        for raw in entry.description.lines().filter(|l| !l.trim().is_empty()) {
            pen.bullet(cursor, raw);
        }
        cursor.advance(config.entry_spacing);
    }
    cursor.advance(config.section_spacing);
}

/// Like [`experience`], but descriptions are capped: only the first few
/// non-blank lines, each cut to a fixed number of characters and never
/// wrapped.
pub fn education(
    cursor: &mut PageCursor,
    entries: &[EducationEntry],
    config: &RenderConfig,
    fonts: &FontContext,
) {
    let pen = Pen::new(config, fonts);
    pen.heading(cursor, EDUCATION_TITLE);

    let x = cursor.left() + config.bullet_indent;
    for entry in entries {
        pen.entry_heading(cursor, &entry.degree, &entry.institution, &entry.date_range());
        let lines = entry
            .description
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(config.education_max_lines);
        for line in lines {
            let line = collapse_whitespace(line);
            pen.line(cursor, x, truncate_chars(&line, config.education_max_chars), &config.body);
        }
        cursor.advance(config.entry_spacing);
    }
    cursor.advance(config.section_spacing);
}

/// One row per proficiency level present, strongest first: a bold label and
/// the comma-joined names, wrapped under the list column.
pub fn skills(
    cursor: &mut PageCursor,
    snapshot: &ResumeSnapshot,
    config: &RenderConfig,
    fonts: &FontContext,
) {
    let pen = Pen::new(config, fonts);
    pen.heading(cursor, SKILLS_TITLE);

    let label_style = &config.skill_label;
    let list_style = &config.skill_list;
    let (left, right) = (cursor.left(), cursor.right());
    for (level, names) in snapshot.skills_by_level() {
        let label = format!("{}:", level.label());
        let list_x = left + pen.measure(&label, label_style) + pen.measure(" ", list_style);
        let mut lines = pen
            .text
            .wrap_list(&names, list_style, right - list_x)
            .into_iter();

        let line_height = config
            .line_height(label_style)
            .max(config.line_height(list_style));
        cursor.ensure_space(line_height);
        let baseline = cursor.y() + label_style.size.max(list_style.size);
        pen.text_at(cursor, left, baseline, &label, label_style);
        if let Some(first) = lines.next() {
            pen.text_at(cursor, list_x, baseline, &first, list_style);
        }
        cursor.advance(line_height);

        for rest in lines {
            pen.line(cursor, list_x, &rest, list_style);
        }
    }
    cursor.advance(config.section_spacing);
}
