//! # resume-pdf
//!
//! Lays out a structured resume onto fixed-size pages and writes the result
//! as a PDF.
//!
//! The page is the unit of layout. Every section measures its text with the
//! standard PDF font metrics, wraps it to the content width, and checks the
//! space left on the current page before it draws, so headings and entries
//! start on a fresh page instead of being stranded or clipped at the bottom.
//!
//! ## Architecture
//!
//! ```text
//! Input (ResumeSnapshot / JSON)
//!       ↓
//!   [model]    : Snapshot, validation, date ranges, filename
//!       ↓
//!   [layout]   : Page cursor + section renderers → draw commands
//!       ↓        (uses [font] metrics and [text] wrapping)
//!   [pdf]      : Serialize to PDF bytes
//! ```
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use resume_pdf::model::{ExperienceEntry, Proficiency, ResumeSnapshot};
//!
//! let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
//! let snapshot = ResumeSnapshot::new("Jane Doe")
//!     .with_email("jane@example.com")
//!     .with_experience(ExperienceEntry::new("Engineer", "Acme", start))
//!     .with_skill("Rust", Proficiency::Expert);
//!
//! let resume = resume_pdf::render(&snapshot)?;
//! std::fs::write(&resume.filename, &resume.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod style;
pub mod text;

pub use config::RenderConfig;
pub use error::{RenderError, SnapshotError};
pub use model::ResumeSnapshot;

use layout::{LayoutEngine, LayoutPage};
use log::info;
use pdf::{Metadata, PdfWriter};

/// A finished document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResume {
    pub bytes: Vec<u8>,
    /// `<Name_With_Underscores>_Resume.pdf`
    pub filename: String,
    pub page_count: usize,
}

/// Render a resume with the default configuration.
///
/// This is the primary entry point. The snapshot is validated first; an
/// invalid snapshot produces no document at all.
pub fn render(snapshot: &ResumeSnapshot) -> Result<RenderedResume, RenderError> {
    render_with_config(snapshot, &RenderConfig::default())
}

/// Render a resume with a custom configuration.
pub fn render_with_config(
    snapshot: &ResumeSnapshot,
    config: &RenderConfig,
) -> Result<RenderedResume, RenderError> {
    config.validate()?;
    snapshot.validate()?;

    let pages = LayoutEngine::new(config).layout(snapshot);
    let metadata = Metadata {
        title: Some(snapshot.document_title()),
        author: Some(snapshot.full_name.trim().to_string()),
    };
    let bytes = PdfWriter::new().write(&pages, &metadata, config);

    let filename = snapshot.suggested_filename();
    info!(
        "rendered {}: {} page(s), {} bytes",
        filename,
        pages.len(),
        bytes.len()
    );

    Ok(RenderedResume {
        bytes,
        filename,
        page_count: pages.len(),
    })
}

/// Render a resume snapshot described as JSON.
pub fn render_json(json: &str) -> Result<RenderedResume, RenderError> {
    let snapshot: ResumeSnapshot = serde_json::from_str(json)?;
    render(&snapshot)
}

/// Lay out a snapshot without serializing it. Validation is left to the
/// caller.
pub fn layout(snapshot: &ResumeSnapshot, config: &RenderConfig) -> Vec<LayoutPage> {
    LayoutEngine::new(config).layout(snapshot)
}
