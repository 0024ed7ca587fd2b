use anyhow::{Result, anyhow};
use clap::Parser;
use deadwood_core::{AliasTable, DEFAULT_RELOCATION_DIR};
use log::{debug, info, trace};
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone, Parser)]
#[command(name = "unused-files")]
#[command(about = "Find JavaScript/TypeScript files that no entry point imports")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// tsconfig.json holding the path aliases (defaults to <root>/tsconfig.json)
    #[arg(long)]
    pub tsconfig: Option<PathBuf>,

    /// Additional substring marking entry files, e.g. `/scripts/` (repeatable)
    #[arg(long = "entry")]
    pub entries: Vec<String>,

    /// Import prefix that is never resolved, on top of `~/edgedb` (repeatable)
    #[arg(long = "skip-prefix")]
    pub skip_prefixes: Vec<String>,

    /// Count `export … from` re-exports as imports
    #[arg(long)]
    pub follow_reexports: bool,

    /// Abort the analysis after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Do not honour .gitignore files when listing the project
    #[arg(long)]
    pub no_ignore: bool,

    /// Directory (under the root) unused files are moved to
    #[arg(long, default_value = DEFAULT_RELOCATION_DIR)]
    pub move_dir: String,

    #[clap(skip)]
    pub aliases: AliasTable,
}

impl Config {
    /// Initialize the config by resolving the root directory and loading path aliases
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            find_git_root()?
        };
        info!("Using root directory: {}", root.display());

        self.aliases = AliasTable::load(&root, self.tsconfig.as_deref());
        debug!("Found {} path alias rules", self.aliases.rules().len());

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;
    trace!("Starting search from: {:?}", current_dir);

    loop {
        if current_dir.join(".git").exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(anyhow!("Could not find .git directory in any parent folder")),
        }
    }
}
