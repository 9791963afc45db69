//! speeches main entrypoint.

use speeches::run;
use speeches::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
