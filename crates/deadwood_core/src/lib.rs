//! Import-graph reachability for JavaScript/TypeScript projects.
//!
//! This crate finds the files a project actually uses:
//! - Enumerating source files under a root
//! - Reading path aliases from `tsconfig.json`
//! - Scanning files for import declarations
//! - Resolving import specifiers against the file inventory
//! - Computing the files transitively reachable from entry points
//!
//! # Examples
//!
//! ```no_run
//! use deadwood_core::{
//!     AliasTable, CollectorConfig, EngineOptions, ReachabilityEngine, collect_files, entry_points,
//! };
//!
//! # fn main() -> Result<(), deadwood_core::Error> {
//! let root = std::path::Path::new("/path/to/project");
//! let inventory = collect_files(&CollectorConfig::new(root))?;
//! let entries = entry_points(&inventory, &[]);
//! let aliases = AliasTable::load(root, None);
//!
//! let engine = ReachabilityEngine::new(root, inventory, aliases, EngineOptions::default());
//! let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
//! let reachable = engine.reachable_from(&paths, None)?;
//! println!("{} files reachable", reachable.len());
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod constants;
mod entries;
mod error;
mod graph;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use collector::{CollectorConfig, absolute_path, collect_files};
pub use config::{AliasTable, TSCONFIG_FILE};
pub use constants::{DEFAULT_RELOCATION_DIR, DEFAULT_SKIPPED_PREFIXES, SOURCE_EXTENSIONS};
pub use entries::{entry_points, is_entry_point, is_excluded};
pub use error::{Error, Result};
pub use graph::{EngineOptions, ReachabilityEngine, TraversalContext};
pub use parser::scan_imports;
pub use resolver::{ascent_depth, relativize, resolve};
pub use types::{AliasRule, FileRecord, Inventory, ReachableSet};
