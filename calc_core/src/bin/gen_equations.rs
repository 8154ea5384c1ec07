//! Write the equation registry to markdown.
//!
//! ```bash
//! cargo run --bin gen-equations [OUTPUT]
//! ```
//!
//! OUTPUT defaults to `EQUATIONS.md` in the current directory.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use calc_core::equations::{generate_equations_markdown, ALL_EQUATIONS};

fn main() -> ExitCode {
    let output_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("EQUATIONS.md"));

    let markdown = generate_equations_markdown();

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!(
                "Wrote {} equations ({} bytes) to {}",
                ALL_EQUATIONS.len(),
                markdown.len(),
                output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            ExitCode::FAILURE
        }
    }
}
