//! Integration tests for the resume rendering pipeline.
//!
//! These tests exercise the full path from a snapshot (or JSON) to PDF
//! output. They verify:
//! - Sections appear, or are skipped, according to the snapshot
//! - Date ranges, skill grouping and description caps
//! - Page breaks never strand headings or push text past the margin
//! - PDF output is structurally valid and deterministic

use chrono::NaiveDate;

use resume_pdf::font::FontContext;
use resume_pdf::layout::sections::{
    EDUCATION_TITLE, EXPERIENCE_TITLE, SKILLS_TITLE, SUMMARY_TITLE,
};
use resume_pdf::layout::{DrawCommand, LayoutPage};
use resume_pdf::model::*;
use resume_pdf::style::PageSize;
use resume_pdf::{RenderConfig, RenderError, SnapshotError};

// ─── Helpers ────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_experience(title: &str, start_year: i32, end_year: Option<i32>) -> ExperienceEntry {
    let entry = ExperienceEntry::new(title, "Acme Corp", date(start_year, 1, 1))
        .with_description(
            "Designed and shipped the billing service used by every product team\n\
             - Reduced infrastructure cost by a third through careful capacity planning\n\
             Mentored new hires",
        );
    match end_year {
        Some(y) => entry.ended(date(y, 12, 31)),
        None => entry,
    }
}

fn make_education(degree: &str, description: &str) -> EducationEntry {
    EducationEntry::new(degree, "State University", date(2010, 9, 1))
        .ended(date(2014, 6, 1))
        .with_description(description)
}

fn sample_resume() -> ResumeSnapshot {
    ResumeSnapshot::new("Jane Q Doe")
        .with_email("jane@example.com")
        .with_phone("555-0100")
        .with_address("1 Main St\nSpringfield")
        .with_summary("Engineer who likes small, well-tested systems.")
        .with_experience(make_experience("Senior Engineer", 2020, None))
        .with_experience(make_experience("Engineer", 2016, Some(2019)))
        .with_education(make_education("BSc Computer Science", "Honors"))
        .with_skill("Rust", Proficiency::Expert)
        .with_skill("SQL", Proficiency::Advanced)
}

fn big_resume(entries: usize) -> ResumeSnapshot {
    let mut snapshot = ResumeSnapshot::new("Jane Doe")
        .with_email("jane@example.com")
        .with_summary("word ".repeat(200));
    for i in 0..entries {
        snapshot = snapshot.with_experience(make_experience(&format!("Role {}", i), 2000, Some(2001)));
        snapshot = snapshot.with_education(make_education(&format!("Degree {}", i), "One\nTwo"));
    }
    for i in 0..60 {
        let level = Proficiency::DISPLAY_ORDER[i % 4];
        snapshot = snapshot.with_skill(format!("Skill{}", i), level);
    }
    snapshot
}

fn texts(pages: &[LayoutPage]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|p| p.texts().map(str::to_string))
        .collect()
}

/// Every text command as (page index, x, baseline, size, text).
fn text_commands(pages: &[LayoutPage]) -> Vec<(usize, f64, f64, f64, String)> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(i, p)| {
            p.commands.iter().filter_map(move |c| match c {
                DrawCommand::Text {
                    x, y, size, text, ..
                } => Some((i, *x, *y, *size, text.clone())),
                DrawCommand::Rule { .. } => None,
            })
        })
        .collect()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 50, "PDF too small to be valid");
    assert!(bytes.starts_with(b"%PDF-1.7"), "Missing PDF header");
    assert!(
        bytes.windows(5).any(|w| w == b"%%EOF"),
        "Missing %%EOF marker"
    );
    assert!(
        bytes.windows(4).any(|w| w == b"xref"),
        "Missing xref table"
    );
    assert!(
        bytes.windows(7).any(|w| w == b"trailer"),
        "Missing trailer"
    );
}

// ─── Scenarios ──────────────────────────────────────────────────

#[test]
fn test_minimal_resume_with_current_job_and_expert_skills() {
    init_logging();
    let snapshot = ResumeSnapshot::new("Jane Doe")
        .with_email("jane@example.com")
        .with_experience(ExperienceEntry::new("Engineer", "Acme", date(2021, 1, 1)))
        .with_skill("Rust", Proficiency::Expert)
        .with_skill("Go", Proficiency::Expert);

    let pages = resume_pdf::layout(&snapshot, &RenderConfig::default());
    let texts = texts(&pages);

    assert_eq!(texts[0], "JANE DOE");
    assert!(texts.iter().any(|t| t == EXPERIENCE_TITLE));
    assert!(texts.iter().any(|t| t == "Jan 2021 - Present"));
    assert!(!texts.iter().any(|t| t == SUMMARY_TITLE));
    assert!(!texts.iter().any(|t| t == EDUCATION_TITLE));

    let skills_at = texts.iter().position(|t| t == SKILLS_TITLE).unwrap();
    assert_eq!(&texts[skills_at + 1..], &["Expert:", "Rust, Go"]);
}

#[test]
fn test_education_description_is_capped() {
    let description = (0..5)
        .map(|i| format!("{}{}", i, "y".repeat(119)))
        .collect::<Vec<_>>()
        .join("\n");
    let snapshot =
        ResumeSnapshot::new("Jane Doe").with_education(make_education("BSc", &description));

    let pages = resume_pdf::layout(&snapshot, &RenderConfig::default());
    let texts = texts(&pages);
    let body: Vec<&String> = texts.iter().filter(|t| t.contains("yyyy")).collect();

    assert_eq!(body.len(), 3, "only the first three lines are kept");
    for (i, line) in body.iter().enumerate() {
        assert_eq!(line.chars().count(), 80);
        assert!(line.starts_with(&i.to_string()));
    }
}

#[test]
fn test_missing_end_dates_read_present() {
    let snapshot = ResumeSnapshot::new("Jane Doe")
        .with_experience(make_experience("Lead", 2019, None))
        .with_education(EducationEntry::new("PhD", "Tech Institute", date(2022, 9, 1)));

    let texts = texts(&resume_pdf::layout(&snapshot, &RenderConfig::default()));
    let ranges: Vec<&String> = texts.iter().filter(|t| t.contains(" - ")).collect();
    assert_eq!(ranges.len(), 2);
    for range in ranges {
        assert!(range.ends_with("Present"), "{}", range);
    }
}

#[test]
fn test_skill_levels_in_fixed_order_and_absent_levels_skipped() {
    let snapshot = ResumeSnapshot::new("Jane Doe")
        .with_skill("Haskell", Proficiency::Beginner)
        .with_skill("Python", Proficiency::Intermediate)
        .with_skill("Rust", Proficiency::Expert)
        .with_skill("Elixir", Proficiency::Beginner);

    let texts = texts(&resume_pdf::layout(&snapshot, &RenderConfig::default()));
    let labels: Vec<&String> = texts.iter().filter(|t| t.ends_with(':')).collect();
    assert_eq!(labels, vec!["Expert:", "Intermediate:", "Beginner:"]);
    assert!(texts.iter().any(|t| t == "Haskell, Elixir"));
}

#[test]
fn test_contact_line_joins_non_empty_values() {
    let snapshot = ResumeSnapshot::new("Jane Doe")
        .with_phone("555-0100")
        .with_address("1 Main St\nSpringfield");
    let texts = texts(&resume_pdf::layout(&snapshot, &RenderConfig::default()));
    assert_eq!(texts[1], "555-0100 | 1 Main St, Springfield");
}

// ─── Wrapping and pagination ────────────────────────────────────

#[test]
fn test_summary_lines_fit_the_content_width() {
    let config = RenderConfig::default();
    let fonts = FontContext::new(config.font_family);
    let summary = "Seasoned engineer focused on distributed storage, observability, \
                   and developer tooling across several large organisations.\n\n\
                   Supercalifragilisticexpialidocious-and-then-some-more-characters-to-overflow-everything-for-sure-yes-indeed-absolutely-positively \
                   ends here";
    let snapshot = ResumeSnapshot::new("Jane Doe").with_summary(summary);
    let pages = resume_pdf::layout(&snapshot, &config);
    let texts = texts(&pages);

    let start = texts.iter().position(|t| t == SUMMARY_TITLE).unwrap() + 1;
    let lines = &texts[start..];
    assert!(lines.len() >= 3);
    for line in lines {
        let width = fonts.measure(line, &config.body);
        assert!(
            width <= config.content_width() || !line.contains(' '),
            "`{}` is {}pt wide",
            line,
            width
        );
    }
}

#[test]
fn test_accented_summary_wraps_within_the_content_width() {
    let config = RenderConfig::default();
    let snapshot = ResumeSnapshot::new("Jane Doe").with_summary("\u{d6}\u{d6}\u{d6}\u{d6}\u{d6} ".repeat(60));
    let pages = resume_pdf::layout(&snapshot, &config);
    let texts = texts(&pages);

    let start = texts.iter().position(|t| t == SUMMARY_TITLE).unwrap() + 1;
    let lines = &texts[start..];
    assert!(lines.len() > 1);
    for line in lines {
        // Helvetica AFM: O dieresis is 778 units, space is 278
        let units: usize = line
            .chars()
            .map(|c| if c == ' ' { 278 } else { 778 })
            .sum();
        let width = units as f64 * config.body.size / 1000.0;
        assert!(width <= config.content_width(), "`{}` is {}pt wide", line, width);
    }
}

#[test]
fn test_accented_name_is_centered_on_its_true_width() {
    let config = RenderConfig::default();
    let fonts = FontContext::new(config.font_family);
    let snapshot = ResumeSnapshot::new("\u{c6}sa \u{d8}rsted-\u{c5}berg");
    let pages = resume_pdf::layout(&snapshot, &config);
    let (_, x, _, _, name) = text_commands(&pages).into_iter().next().unwrap();

    assert_eq!(name, "\u{c6}SA \u{d8}RSTED-\u{c5}BERG");
    // Bold AE is a full em wide
    let width = fonts.measure(&name, &config.name);
    assert!(width > fonts.measure("ASA ORSTED-ABERG", &config.name) + 0.2 * config.name.size);
    assert!((x - (50.0 + (512.0 - width) / 2.0)).abs() < 1e-9);
}

#[test]
fn test_long_resume_paginates_without_overlap() {
    init_logging();
    let config = RenderConfig::default();
    let pages = resume_pdf::layout(&big_resume(12), &config);
    assert!(pages.len() >= 3, "expected several pages, got {}", pages.len());

    let bottom = 792.0 - config.margin.bottom;
    for (index, page) in pages.iter().enumerate() {
        let mut baselines: Vec<(f64, f64)> = Vec::new();
        for command in &page.commands {
            match command {
                DrawCommand::Text { y, size, .. } => {
                    assert!(*y <= bottom, "page {}: text at {} below margin", index, y);
                    assert!(*y - size >= config.margin.top - 1e-9);
                    match baselines.iter_mut().find(|(b, _)| (*b - *y).abs() < 1e-9) {
                        Some(entry) => entry.1 = entry.1.max(*size),
                        None => baselines.push((*y, *size)),
                    }
                }
                DrawCommand::Rule { y, .. } => {
                    assert!(*y <= bottom, "page {}: rule at {} below margin", index, y);
                }
            }
        }

        baselines.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in baselines.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            assert!(
                lower.0 - upper.0 >= lower.1 - 1e-9,
                "page {}: lines at {} and {} overlap",
                index,
                upper.0,
                lower.0
            );
        }
    }
}

#[test]
fn test_headings_and_entries_are_not_stranded() {
    let config = RenderConfig::default();
    let pages = resume_pdf::layout(&big_resume(12), &config);
    let bottom = 792.0 - config.margin.bottom;
    let headings = [SUMMARY_TITLE, EXPERIENCE_TITLE, EDUCATION_TITLE, SKILLS_TITLE];

    for (page, _, baseline, size, text) in text_commands(&pages) {
        let top = baseline - size;
        let at_page_top = (top - config.margin.top).abs() < 1e-9;

        if headings.contains(&text.as_str()) {
            assert!(
                at_page_top || bottom - top >= config.section_threshold,
                "heading {} on page {} starts with only {}pt left",
                text,
                page,
                bottom - top
            );
        }
        if text.starts_with("Role ") || text.starts_with("Degree ") {
            assert!(
                at_page_top || bottom - top >= config.entry_threshold,
                "entry {} on page {} starts with only {}pt left",
                text,
                page,
                bottom - top
            );
        }
    }
}

#[test]
fn test_every_entry_is_rendered_once() {
    let pages = resume_pdf::layout(&big_resume(12), &RenderConfig::default());
    let texts = texts(&pages);
    for i in 0..12 {
        let role = format!("Role {}", i);
        assert_eq!(texts.iter().filter(|t| **t == role).count(), 1, "{}", role);
    }
    assert_eq!(texts.iter().filter(|t| *t == SKILLS_TITLE).count(), 1);
}

// ─── Full pipeline ──────────────────────────────────────────────

#[test]
fn test_render_produces_valid_pdf_and_filename() {
    init_logging();
    let resume = resume_pdf::render(&sample_resume()).unwrap();
    assert_valid_pdf(&resume.bytes);
    assert_eq!(resume.filename, "Jane_Q_Doe_Resume.pdf");
    assert_eq!(resume.page_count, 1);
}

#[test]
fn test_render_is_deterministic() {
    let first = resume_pdf::render(&big_resume(8)).unwrap();
    let second = resume_pdf::render(&big_resume(8)).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_pdf_parses_with_expected_page_count() {
    let resume = resume_pdf::render(&big_resume(12)).unwrap();
    assert!(resume.page_count > 1);

    let doc = lopdf::Document::load_mem(&resume.bytes).expect("lopdf should parse our output");
    assert_eq!(doc.get_pages().len(), resume.page_count);

    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();
    assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Jane Doe - Resume");
}

#[test]
fn test_uncompressed_output_contains_the_text() {
    let config = RenderConfig {
        compress: false,
        ..RenderConfig::default()
    };
    let resume = resume_pdf::render_with_config(&sample_resume(), &config).unwrap();
    assert_valid_pdf(&resume.bytes);
    let needle = b"(JANE Q DOE) Tj";
    assert!(resume.bytes.windows(needle.len()).any(|w| w == needle));
    let bullet = b"(\x95 Designed";
    assert!(resume.bytes.windows(bullet.len()).any(|w| w == bullet));
}

#[test]
fn test_tabs_in_education_and_skills_become_spaces() {
    let config = RenderConfig {
        compress: false,
        ..RenderConfig::default()
    };
    let snapshot = ResumeSnapshot::new("Jane Doe")
        .with_education(make_education("BSc", "GPA:\t3.9"))
        .with_skill("Project\tManagement", Proficiency::Expert);
    let resume = resume_pdf::render_with_config(&snapshot, &config).unwrap();
    assert_valid_pdf(&resume.bytes);

    let contains = |needle: &[u8]| resume.bytes.windows(needle.len()).any(|w| w == needle);
    assert!(contains(b"(GPA: 3.9) Tj"));
    assert!(contains(b"(Project Management) Tj"));
    assert!(!contains(b"?3.9"));
}

#[test]
fn test_custom_page_size_sets_media_box() {
    let config = RenderConfig {
        page_size: PageSize::A4,
        compress: false,
        ..RenderConfig::default()
    };
    let resume = resume_pdf::render_with_config(&sample_resume(), &config).unwrap();
    let needle = b"/MediaBox [0 0 595.28 841.89]";
    assert!(resume.bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn test_render_json() {
    let json = r#"{
        "fullName": "Ada Lovelace",
        "email": "ada@example.com",
        "experience": [
            { "jobTitle": "Analyst", "company": "Engines Ltd",
              "startDate": "1842-01-01", "endDate": "1843-09-01",
              "description": "Wrote the notes" }
        ],
        "skills": [ { "name": "Mathematics", "proficiency": "Expert" } ]
    }"#;
    let resume = resume_pdf::render_json(json).unwrap();
    assert_valid_pdf(&resume.bytes);
    assert_eq!(resume.filename, "Ada_Lovelace_Resume.pdf");
}

// ─── Errors ─────────────────────────────────────────────────────

#[test]
fn test_malformed_json_reports_a_hint() {
    let err = resume_pdf::render_json(r#"{ "fullName": "Ada", }"#).unwrap_err();
    match err {
        RenderError::Parse { hint, .. } => assert!(hint.contains("trailing commas")),
        other => panic!("expected a parse error, got {:?}", other),
    }

    let err = resume_pdf::render_json(r#"{ "fullName": "Ada", "skills": [ { "name": "X", "proficiency": "Guru" } ] }"#)
        .unwrap_err();
    assert!(matches!(err, RenderError::Parse { .. }));
}

#[test]
fn test_blank_name_is_rejected() {
    let err = resume_pdf::render(&ResumeSnapshot::new("  ")).unwrap_err();
    assert!(matches!(
        err,
        RenderError::InvalidSnapshot(SnapshotError::MissingField { field: "fullName" })
    ));
}

#[test]
fn test_reversed_date_range_is_rejected() {
    let snapshot = ResumeSnapshot::new("Jane Doe")
        .with_experience(make_experience("Ok", 2010, Some(2011)))
        .with_experience(
            ExperienceEntry::new("Backwards", "Acme", date(2020, 5, 1)).ended(date(2019, 1, 1)),
        );
    let err = resume_pdf::render(&snapshot).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid resume snapshot: experience entry 1 ends (2019-01-01) before it starts (2020-05-01)"
    );
}

#[test]
fn test_unusable_config_is_rejected() {
    let config = RenderConfig {
        page_size: PageSize::Custom {
            width: 90.0,
            height: 90.0,
        },
        ..RenderConfig::default()
    };
    let err = resume_pdf::render_with_config(&sample_resume(), &config).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(_)));
}
