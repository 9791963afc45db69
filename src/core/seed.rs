use crate::core::descriptor::{SectionDescriptor, load_descriptors};
use crate::core::fixtures::{create_sections, resolve_instance};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_instance_by_label, load_section};
use crate::errors::{AppError, AppResult};
use crate::models::instance::DEFAULT_INSTANCE_LABEL;
use std::path::Path;

/// What a seeding run created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub instance: String,
    pub sections: usize,
    pub speeches: usize,
}

pub struct SeedLogic;

impl SeedLogic {
    /// Load a descriptor file and build its tree in a single transaction.
    pub fn apply(
        pool: &mut DbPool,
        file: &Path,
        instance_label: Option<&str>,
        parent_id: Option<i64>,
    ) -> AppResult<SeedSummary> {
        let descriptors = load_descriptors(file)?;
        Self::apply_descriptors(
            pool,
            &descriptors,
            instance_label,
            parent_id,
            &file.display().to_string(),
        )
    }

    pub fn apply_descriptors(
        pool: &mut DbPool,
        descriptors: &[SectionDescriptor],
        instance_label: Option<&str>,
        parent_id: Option<i64>,
        source: &str,
    ) -> AppResult<SeedSummary> {
        let tx = pool.conn.transaction()?;

        let instance = match instance_label {
            Some(label) => Some(
                find_instance_by_label(&tx, label)?
                    .ok_or_else(|| AppError::NotFound(format!("Instance '{}'", label)))?,
            ),
            None => None,
        };

        let parent = match parent_id {
            Some(id) => Some(
                load_section(&tx, id)?
                    .ok_or_else(|| AppError::NotFound(format!("Section {}", id)))?,
            ),
            None => None,
        };

        create_sections(&tx, descriptors, parent.as_ref(), instance.as_ref())?;

        let effective = resolve_instance(
            &tx,
            parent.as_ref(),
            instance.as_ref(),
            DEFAULT_INSTANCE_LABEL,
        )?;

        let summary = SeedSummary {
            instance: effective.label,
            sections: descriptors.iter().map(SectionDescriptor::section_count).sum(),
            speeches: descriptors
                .iter()
                .map(SectionDescriptor::speech_count)
                .fold(0, usize::saturating_add),
        };

        audit(
            &tx,
            "seed",
            source,
            &format!(
                "Created {} sections and {} speeches in instance '{}'",
                summary.sections, summary.speeches, summary.instance
            ),
        )?;

        tx.commit()?;
        Ok(summary)
    }
}
