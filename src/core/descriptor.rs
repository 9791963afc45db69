//! Declarative description of a section tree, consumed by `create_sections`.
//!
//! Descriptors can be written in code with the builder helpers or loaded from
//! a YAML / JSON file:
//!
//! ```yaml
//! - title: Top level section
//!   subsections:
//!     - title: Section with speeches
//!       speeches: [4, "2013-03-25", "09:00"]
//!     - title: Bill on Silly Walks
//!       speeches: [2, "2013-03-25", "12:00"]
//! ```

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsections: Option<Vec<SectionDescriptor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speeches: Option<SpeechBatch>,
}

/// `[count, date, start_time]`: `count` speeches on `date`, the first at
/// `start_time` and each following one 10 minutes later. A null time leaves
/// every start time empty. A count of zero or less creates no speeches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(i64, NaiveDate, Option<NaiveTime>)",
    into = "(i64, NaiveDate, Option<NaiveTime>)"
)]
pub struct SpeechBatch {
    pub count: i64,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
}

impl From<(i64, NaiveDate, Option<NaiveTime>)> for SpeechBatch {
    fn from((count, date, start_time): (i64, NaiveDate, Option<NaiveTime>)) -> Self {
        Self {
            count,
            date,
            start_time,
        }
    }
}

impl From<SpeechBatch> for (i64, NaiveDate, Option<NaiveTime>) {
    fn from(b: SpeechBatch) -> Self {
        (b.count, b.date, b.start_time)
    }
}

impl SpeechBatch {
    pub fn new(count: i64, date: NaiveDate, start_time: Option<NaiveTime>) -> Self {
        Self {
            count,
            date,
            start_time,
        }
    }

    /// Number of speeches the batch creates.
    pub fn len(&self) -> usize {
        usize::try_from(self.count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.count <= 0
    }
}

impl SectionDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subsections: None,
            speeches: None,
        }
    }

    pub fn with_subsections(mut self, subsections: Vec<SectionDescriptor>) -> Self {
        self.subsections = Some(subsections);
        self
    }

    pub fn with_speeches(mut self, batch: SpeechBatch) -> Self {
        self.speeches = Some(batch);
        self
    }

    /// Number of sections this descriptor expands to, itself included.
    pub fn section_count(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .flatten()
            .map(SectionDescriptor::section_count)
            .sum::<usize>()
    }

    /// Number of speeches this descriptor expands to, nested ones included.
    pub fn speech_count(&self) -> usize {
        self.subsections
            .iter()
            .flatten()
            .map(SectionDescriptor::speech_count)
            .fold(self.speeches.map(|b| b.len()).unwrap_or(0), usize::saturating_add)
    }
}

/// Parse descriptors from text. JSON is selected by `is_json`, YAML otherwise.
pub fn parse_descriptors(content: &str, is_json: bool) -> AppResult<Vec<SectionDescriptor>> {
    if is_json {
        serde_json::from_str(content).map_err(|e| AppError::Descriptor(e.to_string()))
    } else {
        serde_yaml::from_str(content).map_err(|e| AppError::Descriptor(e.to_string()))
    }
}

/// Load descriptors from a `.json`, `.yaml` or `.yml` file.
pub fn load_descriptors(path: &Path) -> AppResult<Vec<SectionDescriptor>> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    parse_descriptors(&content, is_json)
}
