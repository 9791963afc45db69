use crate::errors::{AppError, AppResult};
use crate::models::speech::{DATE_FORMAT, NewSpeech, TIME_FORMAT};
use crate::models::{Instance, Section, Speech};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

// ---------------------------
// Instances
// ---------------------------

pub fn create_instance(conn: &Connection, label: &str) -> AppResult<Instance> {
    conn.execute("INSERT INTO instances (label) VALUES (?1)", [label])?;
    Ok(Instance {
        id: conn.last_insert_rowid(),
        label: label.to_string(),
    })
}

/// Return the instance with `label`, inserting it first when missing.
/// Repeated calls with the same label always yield the same row.
pub fn get_or_create_instance(conn: &Connection, label: &str) -> AppResult<(Instance, bool)> {
    let inserted = conn.execute(
        "INSERT INTO instances (label) VALUES (?1) ON CONFLICT(label) DO NOTHING",
        [label],
    )?;

    let instance = find_instance_by_label(conn, label)?
        .ok_or_else(|| AppError::NotFound(format!("Instance '{}'", label)))?;

    Ok((instance, inserted == 1))
}

pub fn find_instance_by_label(conn: &Connection, label: &str) -> AppResult<Option<Instance>> {
    let found = conn
        .query_row(
            "SELECT id, label FROM instances WHERE label = ?1",
            [label],
            map_instance,
        )
        .optional()?;
    Ok(found)
}

pub fn load_instance(conn: &Connection, id: i64) -> AppResult<Option<Instance>> {
    let found = conn
        .query_row(
            "SELECT id, label FROM instances WHERE id = ?1",
            [id],
            map_instance,
        )
        .optional()?;
    Ok(found)
}

pub fn load_instances(conn: &Connection) -> AppResult<Vec<Instance>> {
    let mut stmt = conn.prepare("SELECT id, label FROM instances ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_instance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_instance(row: &Row) -> Result<Instance> {
    Ok(Instance {
        id: row.get("id")?,
        label: row.get("label")?,
    })
}

// ---------------------------
// Sections
// ---------------------------

pub fn create_section(
    conn: &Connection,
    instance: &Instance,
    title: &str,
    parent: Option<&Section>,
) -> AppResult<Section> {
    let parent_id = parent.map(|p| p.id);

    let mut stmt = conn.prepare_cached(
        "INSERT INTO sections (instance_id, parent_id, title) VALUES (?1, ?2, ?3)",
    )?;
    stmt.execute(params![instance.id, parent_id, title])?;

    Ok(Section {
        id: conn.last_insert_rowid(),
        instance_id: instance.id,
        parent_id,
        title: title.to_string(),
    })
}

pub fn load_section(conn: &Connection, id: i64) -> AppResult<Option<Section>> {
    let found = conn
        .query_row(
            "SELECT id, instance_id, parent_id, title FROM sections WHERE id = ?1",
            [id],
            map_section,
        )
        .optional()?;
    Ok(found)
}

/// Sections of an instance, ordered by id (which is creation order).
pub fn load_sections_by_instance(conn: &Connection, instance_id: i64) -> AppResult<Vec<Section>> {
    let mut stmt = conn.prepare(
        "SELECT id, instance_id, parent_id, title FROM sections
         WHERE instance_id = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([instance_id], map_section)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_children(conn: &Connection, parent_id: i64) -> AppResult<Vec<Section>> {
    let mut stmt = conn.prepare(
        "SELECT id, instance_id, parent_id, title FROM sections
         WHERE parent_id = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([parent_id], map_section)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_section(row: &Row) -> Result<Section> {
    Ok(Section {
        id: row.get("id")?,
        instance_id: row.get("instance_id")?,
        parent_id: row.get("parent_id")?,
        title: row.get("title")?,
    })
}

// ---------------------------
// Speeches
// ---------------------------

const SPEECH_COLUMNS: &str =
    "id, instance_id, section_id, text, start_date, start_time, created_at";

pub fn insert_speech(conn: &Connection, sp: &NewSpeech) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO speeches (instance_id, section_id, text, start_date, start_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        sp.instance_id,
        sp.section_id,
        sp.text,
        sp.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
        sp.start_time.map(|t| t.format(TIME_FORMAT).to_string()),
        sp.created_at,
    ])?;
    Ok(conn.last_insert_rowid())
}

pub fn update_speech(conn: &Connection, sp: &Speech) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE speeches SET text = ?1, start_date = ?2, start_time = ?3 WHERE id = ?4",
        params![
            sp.text,
            sp.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
            sp.start_time.map(|t| t.format(TIME_FORMAT).to_string()),
            sp.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Speech {}", sp.id)));
    }
    Ok(())
}

pub fn load_speech(conn: &Connection, id: i64) -> AppResult<Option<Speech>> {
    let sql = format!("SELECT {SPEECH_COLUMNS} FROM speeches WHERE id = ?1");
    let found = conn.query_row(&sql, [id], map_speech).optional()?;
    Ok(found)
}

pub fn load_speeches(conn: &Connection) -> AppResult<Vec<Speech>> {
    let sql = format!("SELECT {SPEECH_COLUMNS} FROM speeches ORDER BY id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_speech)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_speeches_by_section(conn: &Connection, section_id: i64) -> AppResult<Vec<Speech>> {
    let sql = format!(
        "SELECT {SPEECH_COLUMNS} FROM speeches WHERE section_id = ?1 ORDER BY id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([section_id], map_speech)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn map_speech(row: &Row) -> Result<Speech> {
    let date_str: Option<String> = row.get("start_date")?;
    let time_str: Option<String> = row.get("start_time")?;

    let start_date = date_str
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(AppError::InvalidDate(s.clone())),
                )
            })
        })
        .transpose()?;

    let start_time = time_str
        .map(|s| {
            NaiveTime::parse_from_str(&s, TIME_FORMAT).map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(AppError::InvalidTime(s.clone())),
                )
            })
        })
        .transpose()?;

    Ok(Speech {
        id: row.get("id")?,
        instance_id: row.get("instance_id")?,
        section_id: row.get("section_id")?,
        text: row.get("text")?,
        start_date,
        start_time,
        created_at: row.get("created_at")?,
    })
}

/// Speech count per section id for one instance; sections without speeches
/// are absent from the map.
pub fn count_speeches_per_section(
    conn: &Connection,
    instance_id: i64,
) -> AppResult<HashMap<i64, usize>> {
    let mut stmt = conn.prepare(
        "SELECT section_id, COUNT(*) FROM speeches
         WHERE instance_id = ?1 AND section_id IS NOT NULL
         GROUP BY section_id",
    )?;
    let rows = stmt.query_map([instance_id], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = HashMap::new();
    for r in rows {
        let (section_id, count) = r?;
        out.insert(section_id, count as usize);
    }
    Ok(out)
}
