use crate::config::Config;
use crate::errors::AppResult;
use crate::routes::RouteTable;
use crate::ui::messages::header;

/// Print the route table in matching order.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let urls = RouteTable::speeches(&cfg.base_path)?;

    let mount = if urls.prefix().is_empty() { "/" } else { urls.prefix() };
    header(format!("Speech routes (mounted at {})", mount));

    for route in urls.routes() {
        println!(
            "{:<24} {:<14} {}",
            route.pattern.as_str(),
            route.name.as_str(),
            route.view.name()
        );
    }

    Ok(())
}
