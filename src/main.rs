//! teamlog main entrypoint.

use teamlog::run;
use teamlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
