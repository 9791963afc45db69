use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::seed::SeedLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::path::Path;

/// Seed a section tree from a descriptor file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Seed {
        file,
        instance,
        parent,
    } = cmd
    {
        let mut pool = open_db(&cfg.database)?;
        let summary = SeedLogic::apply(&mut pool, Path::new(file), instance.as_deref(), *parent)?;

        success(format!(
            "Seeded {} sections and {} speeches into instance '{}'",
            summary.sections, summary.speeches, summary.instance
        ));
    }

    Ok(())
}
