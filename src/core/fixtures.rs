//! Recursive builder turning section descriptors into persisted sections and
//! speeches. Very useful for setting up test data.

use crate::core::descriptor::{SectionDescriptor, SpeechBatch};
use crate::db::queries::{
    create_section, get_or_create_instance, insert_speech, load_instance,
};
use crate::errors::{AppError, AppResult};
use crate::models::instance::DEFAULT_INSTANCE_LABEL;
use crate::models::speech::NewSpeech;
use crate::models::{Instance, Section};
use chrono::TimeDelta;
use rusqlite::Connection;

pub const FIXTURE_SPEECH_TEXT: &str = "rhubarb rhubarb";

/// Gap between consecutive speeches of one batch.
pub const SPEECH_INTERVAL_MINUTES: i64 = 10;

/// Decide which instance records created under `parent` / `instance` belong to.
///
/// - both given and different → `ParentInstanceMismatch`
/// - parent given → the parent's instance
/// - neither given → get-or-create the instance labelled `default_label`
pub fn resolve_instance(
    conn: &Connection,
    parent: Option<&Section>,
    instance: Option<&Instance>,
    default_label: &str,
) -> AppResult<Instance> {
    if let (Some(i), Some(p)) = (instance, parent)
        && i.id != p.instance_id
    {
        return Err(AppError::ParentInstanceMismatch {
            instance: i.id,
            parent: p.id,
            parent_instance: p.instance_id,
        });
    }

    if let Some(p) = parent {
        return load_instance(conn, p.instance_id)?
            .ok_or_else(|| AppError::NotFound(format!("Instance {}", p.instance_id)));
    }

    match instance {
        Some(i) => Ok(i.clone()),
        None => Ok(get_or_create_instance(conn, default_label)?.0),
    }
}

/// Create a hierarchy of sections and speeches.
///
/// ```ignore
/// create_sections(&conn, &[
///     SectionDescriptor::new("Top level section").with_subsections(vec![
///         SectionDescriptor::new("Section with speeches")
///             .with_speeches(SpeechBatch::new(4, date, Some(nine_am))),
///     ]),
/// ], None, None)?;
/// ```
///
/// An `instance` that disagrees with `parent`'s instance is rejected before
/// anything is written. Without either, the records land in the
/// `create-sections-instance` instance.
pub fn create_sections(
    conn: &Connection,
    subsections: &[SectionDescriptor],
    parent: Option<&Section>,
    instance: Option<&Instance>,
) -> AppResult<()> {
    let instance = resolve_instance(conn, parent, instance, DEFAULT_INSTANCE_LABEL)?;

    for subsection in subsections {
        let s = create_section(conn, &instance, &subsection.title, parent)?;

        if let Some(children) = &subsection.subsections {
            create_sections(conn, children, Some(&s), None)?;
        }

        if let Some(batch) = &subsection.speeches {
            create_speeches(conn, &instance, &s, batch)?;
        }
    }

    Ok(())
}

/// Insert the speeches of one batch. Non-positive counts insert nothing.
fn create_speeches(
    conn: &Connection,
    instance: &Instance,
    section: &Section,
    batch: &SpeechBatch,
) -> AppResult<()> {
    let step = TimeDelta::minutes(SPEECH_INTERVAL_MINUTES);
    let mut time = batch.start_time;

    for _ in 0..batch.count {
        let speech = NewSpeech::new(instance.id, Some(section.id), FIXTURE_SPEECH_TEXT)
            .starting(Some(batch.date), time);
        insert_speech(conn, &speech)?;

        // NaiveTime addition wraps around midnight
        time = time.map(|t| t + step);
    }

    Ok(())
}
