//! bicicletario main entrypoint.

use bicicletario::run;
use bicicletario::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
