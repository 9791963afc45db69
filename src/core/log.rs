use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "seed" => Colour::Green,
        "speech_add" => Colour::Cyan,
        "speech_edit" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Truncate to `max` visible characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out = s.chars().take(max.saturating_sub(3)).collect::<String>();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<_> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);

                let target = if e.target.is_empty() {
                    String::new()
                } else {
                    truncate(&format!("({})", e.target), 48)
                };

                (e.id, date, e.operation, target, e.message)
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| r.2.len() + 1 + r.3.chars().count())
            .max()
            .unwrap_or(10)
            .min(60);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in rows {
            let visible_len = operation.len() + 1 + target.chars().count();
            let padding = " ".repeat(op_w.saturating_sub(visible_len));
            let colored = color_for_operation(&operation).paint(operation.as_str());

            println!(
                "{:>id_w$}: {:<date_w$} | {} {}{} => {}",
                id,
                date,
                colored,
                target,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
