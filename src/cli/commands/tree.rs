use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tree::TreeLogic;
use crate::db::initialize::open_db;
use crate::db::queries::{find_instance_by_label, load_instances};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tree { instance } = cmd {
        let pool = open_db(&cfg.database)?;

        let instances = match instance {
            Some(label) => vec![
                find_instance_by_label(&pool.conn, label)?
                    .ok_or_else(|| AppError::NotFound(format!("Instance '{}'", label)))?,
            ],
            None => load_instances(&pool.conn)?,
        };

        if instances.is_empty() {
            info("No instances yet. Use `speeches seed <FILE>` to create some.");
            return Ok(());
        }

        for inst in instances {
            header(format!("Instance '{}'", inst.label));
            let nodes = TreeLogic::build(&pool.conn, inst.id)?;
            if nodes.is_empty() {
                println!("(no sections)");
            } else {
                print!("{}", TreeLogic::render(&nodes));
            }
        }
    }

    Ok(())
}
