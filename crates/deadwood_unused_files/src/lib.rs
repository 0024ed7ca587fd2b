//! Unused file detection for JavaScript/TypeScript projects.
//!
//! Every source file that no routing entry point imports, directly or through
//! other files, is reported as unused and can be moved out of the way.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use deadwood_unused_files::{Config, print_unused_files, run_unused_files_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::parse_from(["unused-files", "--root", "/path/to/project"]);
//! let result = run_unused_files_check(cfg)?;
//!
//! if !result.unused.is_empty() {
//!     let mut stdout = BufWriter::new(std::io::stdout());
//!     print_unused_files(&mut stdout, &result)?;
//!     stdout.flush()?;
//! }
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod relocate;
mod reporter;
mod types;

// Re-export public API
pub use checker::run_unused_files_check;
pub use config::{Config, find_git_root};
pub use relocate::{RelocationReport, ask_confirmation, relocate_files};
pub use reporter::{print_json_report, print_no_unused_message, print_unused_files};
pub use types::CheckResult;
