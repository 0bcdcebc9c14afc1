//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Print an error with its cause chain and exit with status 1.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": causes,
        });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }
    }
    std::process::exit(1);
}
