use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::routes::http::parse_form_pair;
use crate::routes::{Method, Request, RouteTable};
use crate::utils::colors::{RESET, color_for_status};

/// Dispatch one request through the route table and print the response.
/// 4xx answers are printed, not turned into errors.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Request {
        method,
        path,
        fields,
    } = cmd
    {
        let method: Method = method.parse()?;
        let form = fields
            .iter()
            .map(|f| parse_form_pair(f))
            .collect::<AppResult<Vec<_>>>()?;

        let req = Request {
            method,
            path: path.clone(),
            form: form.into_iter().collect(),
        };

        let pool = open_db(&cfg.database)?;
        let urls = RouteTable::speeches(&cfg.base_path)?;
        let resp = urls.dispatch(&pool.conn, &req, &cfg.default_instance)?;

        println!(
            "{}{} {}{}",
            color_for_status(resp.status),
            resp.status,
            resp.reason(),
            RESET
        );
        if let Some(loc) = &resp.location {
            println!("Location: {}", loc);
        }
        if !resp.body.is_empty() {
            println!("\n{}", resp.body);
        }
    }

    Ok(())
}
