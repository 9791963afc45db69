use crate::utils::date::format_date;
use crate::utils::time::format_time;
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speech {
    pub id: i64,
    pub instance_id: i64,              // ⇔ speeches.instance_id
    pub section_id: Option<i64>,       // ⇔ speeches.section_id (NULL allowed)
    pub text: String,                  // ⇔ speeches.text
    pub start_date: Option<NaiveDate>, // ⇔ speeches.start_date (TEXT "YYYY-MM-DD")
    pub start_time: Option<NaiveTime>, // ⇔ speeches.start_time (TEXT "HH:MM:SS")
    pub created_at: String,            // ⇔ speeches.created_at (TEXT, RFC 3339)
}

/// Values needed to insert a speech; the id is assigned by SQLite.
#[derive(Debug, Clone)]
pub struct NewSpeech {
    pub instance_id: i64,
    pub section_id: Option<i64>,
    pub text: String,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub created_at: String,
}

impl NewSpeech {
    pub fn new(instance_id: i64, section_id: Option<i64>, text: impl Into<String>) -> Self {
        Self {
            instance_id,
            section_id,
            text: text.into(),
            start_date: None,
            start_time: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn starting(mut self, date: Option<NaiveDate>, time: Option<NaiveTime>) -> Self {
        self.start_date = date;
        self.start_time = time;
        self
    }
}

impl Speech {
    pub fn date_str(&self) -> String {
        self.start_date.as_ref().map(format_date).unwrap_or_default()
    }

    pub fn time_str(&self) -> String {
        self.start_time.as_ref().map(format_time).unwrap_or_default()
    }
}
