use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied once and recorded in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_instances_sections",
        description: "Created instances and sections tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS instances (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            label  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS sections (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            instance_id  INTEGER NOT NULL REFERENCES instances(id),
            parent_id    INTEGER REFERENCES sections(id),
            title        TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_speeches",
        description: "Created speeches table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS speeches (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            instance_id  INTEGER NOT NULL REFERENCES instances(id),
            section_id   INTEGER REFERENCES sections(id),
            text         TEXT NOT NULL DEFAULT '',
            start_date   TEXT,
            start_time   TEXT,
            created_at   TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250412_0003_tree_indexes",
        description: "Added indexes on section parents and speech sections",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_sections_parent ON sections(parent_id);
        CREATE INDEX IF NOT EXISTS idx_sections_instance ON sections(instance_id);
        CREATE INDEX IF NOT EXISTS idx_speeches_section ON speeches(section_id, start_date, start_time);
        "#,
    },
];

/// Ensure that the `log` table exists; it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions recorded as applied, in application order.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
