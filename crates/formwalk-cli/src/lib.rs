//! # formwalk-cli — Command-Line Front End
//!
//! Provides the `formwalk` binary.
//!
//! ## Subcommands
//!
//! - `formwalk check` validates a submission file against a declarative
//!   form file and prints the validation report.
//! - `formwalk path` shows how bracket paths are parsed.
//!
//! ```bash
//! formwalk check --schema signup.yaml --input post.json
//! formwalk check --schema signup.yaml --input body.txt --input-format urlencoded -v
//! formwalk path 'user[address][city]' 'items[]'
//! ```
//!
//! Handlers return `anyhow::Result<u8>`; the `u8` is the process exit
//! code (0 valid, 1 invalid). Fatal errors exit with 2.

pub mod check;
pub mod inspect;

/// Exit code for a submission that passed every check.
pub const EXIT_VALID: u8 = 0;
/// Exit code for a submission with at least one field error.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for unreadable files and broken form definitions.
pub const EXIT_FATAL: u8 = 2;
