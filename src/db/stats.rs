use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::db::queries::count_rows;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROW COUNTS
    //
    for table in ["instances", "sections", "speeches"] {
        let count = count_rows(&pool.conn, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, table, RESET, GREEN, count, RESET);
    }

    //
    // 3) SCHEMA VERSION
    //
    let versions = applied_versions(&pool.conn)?;
    let last = versions.last().map(String::as_str).unwrap_or("--");
    println!(
        "{}• Migrations:{} {} applied (latest: {})",
        CYAN,
        RESET,
        versions.len(),
        last
    );

    println!();
    Ok(())
}
