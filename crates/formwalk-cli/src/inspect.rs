//! # Path Subcommand
//!
//! Prints how bracket paths parse, one line per path:
//!
//! ```text
//! user[address][city]    user / address / city
//! items[]                items / []
//! ```

use anyhow::Result;
use clap::Args;

use formwalk_core::FieldPath;

use crate::EXIT_VALID;

/// Arguments for the path subcommand.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Bracket paths to parse.
    #[arg(required = true)]
    pub paths: Vec<String>,
}

/// Execute the path subcommand.
pub fn run_path(args: &PathArgs) -> Result<u8> {
    for raw in &args.paths {
        println!("{}", describe(raw));
    }
    Ok(EXIT_VALID)
}

/// Canonical form of `raw`, then its segments.
pub fn describe(raw: &str) -> String {
    let path = FieldPath::parse(raw);
    let segments: Vec<String> = path.segments().iter().map(ToString::to_string).collect();
    format!("{:<24} {}", path.to_string(), segments.join(" / "))
}
