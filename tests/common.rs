#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use speeches::db::initialize::open_db;
use speeches::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sp() -> Command {
    cargo_bin_cmd!("speeches")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_speeches.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write `content` to a temp file with the given extension and return its path
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_speeches.{}", name, ext));
    fs::write(&path, content).expect("write temp file");
    path.to_string_lossy().to_string()
}

/// Fresh in-memory database with the schema applied
pub fn memory_db() -> DbPool {
    open_db(":memory:").expect("open in-memory db")
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub const SAMPLE_YAML: &str = r#"
- title: Top level section
  subsections:
    - title: Nested section
      subsections:
        - title: Section with speeches
          speeches: [4, "2013-03-25", "09:00"]
        - title: Bill on Silly Walks
          speeches: [2, "2013-03-25", "12:00"]
    - title: Another nested section (but completely empty)
      subsections: []
"#;
