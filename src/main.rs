//! plotgfa CLI
//!
//! Plots a GFA file, writing `<file>.png` and `<file>.gml`.

use plotgfa::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
