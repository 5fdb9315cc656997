//! # Resume Model
//!
//! The input to the renderer: a read-only snapshot of one resume, assembled
//! by whatever owns the stored records. The renderer never looks anything up
//! on its own; everything it draws is in here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// One resume, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSnapshot {
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// May span several lines.
    #[serde(default)]
    pub address: String,
    /// Free text; embedded line breaks start new paragraphs.
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub start_date: NaiveDate,
    /// `None` while the position is current.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// One bullet per line; lines may already start with `•` or `-`.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    /// The order skill groups appear in, strongest first.
    pub const DISPLAY_ORDER: [Proficiency; 4] = [
        Proficiency::Expert,
        Proficiency::Advanced,
        Proficiency::Intermediate,
        Proficiency::Beginner,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
        }
    }
}

impl ResumeSnapshot {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_experience(mut self, entry: ExperienceEntry) -> Self {
        self.experience.push(entry);
        self
    }

    pub fn with_education(mut self, entry: EducationEntry) -> Self {
        self.education.push(entry);
        self
    }

    pub fn with_skill(mut self, name: impl Into<String>, proficiency: Proficiency) -> Self {
        self.skills.push(Skill {
            name: name.into(),
            proficiency,
        });
        self
    }

    /// Check the invariants layout relies on.
    ///
    /// Proficiency levels and calendar dates are already guaranteed by their
    /// types; what remains is a non-blank name and ordered date ranges.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.full_name.trim().is_empty() {
            return Err(SnapshotError::MissingField { field: "fullName" });
        }

        let experience = self
            .experience
            .iter()
            .map(|e| (e.start_date, e.end_date));
        check_ranges("experience", experience)?;

        let education = self.education.iter().map(|e| (e.start_date, e.end_date));
        check_ranges("education", education)?;

        Ok(())
    }

    /// `"Jane Q Doe"` becomes `"Jane_Q_Doe_Resume.pdf"`.
    pub fn suggested_filename(&self) -> String {
        format!("{}_Resume.pdf", self.full_name.trim().replace(' ', "_"))
    }

    /// The text shown in the document title bar.
    pub fn document_title(&self) -> String {
        format!("{} - Resume", self.full_name.trim())
    }

    /// Skills bucketed by level in [`Proficiency::DISPLAY_ORDER`], keeping
    /// input order within a level. Empty levels are left out.
    pub fn skills_by_level(&self) -> Vec<(Proficiency, Vec<&str>)> {
        Proficiency::DISPLAY_ORDER
            .iter()
            .filter_map(|level| {
                let names: Vec<&str> = self
                    .skills
                    .iter()
                    .filter(|s| s.proficiency == *level)
                    .map(|s| s.name.as_str())
                    .collect();
                (!names.is_empty()).then_some((*level, names))
            })
            .collect()
    }
}

fn check_ranges(
    section: &'static str,
    ranges: impl Iterator<Item = (NaiveDate, Option<NaiveDate>)>,
) -> Result<(), SnapshotError> {
    for (index, (start, end)) in ranges.enumerate() {
        if let Some(end) = end {
            if end < start {
                return Err(SnapshotError::InvalidDateRange {
                    section,
                    index,
                    start,
                    end,
                });
            }
        }
    }
    Ok(())
}

impl ExperienceEntry {
    pub fn new(
        job_title: impl Into<String>,
        company: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            job_title: job_title.into(),
            company: company.into(),
            start_date,
            end_date: None,
            description: String::new(),
        }
    }

    pub fn ended(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn date_range(&self) -> String {
        format_date_range(self.start_date, self.end_date)
    }
}

impl EducationEntry {
    pub fn new(
        degree: impl Into<String>,
        institution: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            degree: degree.into(),
            institution: institution.into(),
            start_date,
            end_date: None,
            description: String::new(),
        }
    }

    pub fn ended(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn date_range(&self) -> String {
        format_date_range(self.start_date, self.end_date)
    }
}

/// `"Jan 2021 - Mar 2023"`, or `"Jan 2021 - Present"` when there is no end.
pub fn format_date_range(start: NaiveDate, end: Option<NaiveDate>) -> String {
    let end = match end {
        Some(date) => date.format("%b %Y").to_string(),
        None => "Present".to_string(),
    };
    format!("{} - {}", start.format("%b %Y"), end)
}
