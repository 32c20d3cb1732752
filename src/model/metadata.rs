//! Lesson metadata record.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Header record for a lesson plan.
///
/// Only the institution, author, date, subject, class, week and lesson title
/// reach the document. The remaining fields are carried for the upstream
/// generator that produced the Markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonMetadata {
    /// School or issuing body; a non-empty value turns on the cover page
    #[serde(default, alias = "schoolName")]
    pub institution_name: Option<String>,

    /// Teacher who prepared the plan
    #[serde(default, alias = "teacherName")]
    pub author_name: Option<String>,

    /// Teaching date
    #[serde(default)]
    pub date: Option<String>,

    /// Subject
    pub subject: String,

    /// Class or grade
    #[serde(alias = "grade")]
    pub class_label: String,

    /// Week of the school year
    #[serde(alias = "week")]
    pub week_label: String,

    /// Lesson name
    #[serde(alias = "lessonName")]
    pub lesson_title: String,

    /// Lesson length
    #[serde(default, alias = "duration")]
    pub duration_label: String,

    /// Kind of lesson (new material, practice, ...)
    #[serde(default, alias = "lessonType")]
    pub lesson_type_label: String,

    /// Teaching method
    #[serde(default, alias = "teachingMethod")]
    pub method_label: Option<String>,

    /// Free-form note
    #[serde(default, alias = "topicContext")]
    pub context_note: Option<String>,

    /// Source material attachments
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl LessonMetadata {
    /// Create a record with the required fields.
    pub fn new(
        subject: impl Into<String>,
        class_label: impl Into<String>,
        week_label: impl Into<String>,
        lesson_title: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            class_label: class_label.into(),
            week_label: week_label.into(),
            lesson_title: lesson_title.into(),
            ..Default::default()
        }
    }

    /// Set the institution name and return self.
    pub fn with_institution(mut self, name: impl Into<String>) -> Self {
        self.institution_name = Some(name.into());
        self
    }

    /// Set the author name and return self.
    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    /// Set the teaching date and return self.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Decode a record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidMetadata(e.to_string()))
    }

    /// Read and decode a JSON record from a file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Whether the record asks for a cover page.
    pub fn has_cover_page(&self) -> bool {
        non_empty(&self.institution_name).is_some()
    }

    /// Institution name if set and not blank.
    pub fn institution(&self) -> Option<&str> {
        non_empty(&self.institution_name)
    }

    /// Author name if set and not blank.
    pub fn author(&self) -> Option<&str> {
        non_empty(&self.author_name)
    }

    /// Teaching date if set and not blank.
    pub fn teaching_date(&self) -> Option<&str> {
        non_empty(&self.date)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A file handed to the upstream generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Original file name
    pub file_name: String,
    /// MIME type
    pub mime_type: String,
    /// Base64-encoded content
    pub base64: String,
}
