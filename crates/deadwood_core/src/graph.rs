use dashmap::DashMap;
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crate::{
    collector::absolute_path,
    config::AliasTable,
    constants::{DEFAULT_SKIPPED_PREFIXES, LOCAL_SPECIFIER_MARKERS},
    error::{Error, Result},
    parser::scan_imports,
    resolver::resolve,
    types::{Inventory, ReachableSet},
};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Treat `export … from '…'` like an import
    pub follow_reexports: bool,
    /// Specifiers starting with one of these are never resolved
    pub skipped_prefixes: Vec<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            follow_reexports: false,
            skipped_prefixes: DEFAULT_SKIPPED_PREFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// State of one traversal: the files already expanded and an optional
/// deadline. A file is expanded at most once per context, which is what makes
/// import cycles terminate.
#[derive(Debug)]
pub struct TraversalContext {
    visited: HashSet<String>,
    started: Instant,
    deadline: Option<Instant>,
}

impl Default for TraversalContext {
    fn default() -> Self {
        Self::with_deadline(None)
    }
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Option<Instant>) -> Self {
        Self { visited: HashSet::new(), started: Instant::now(), deadline }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Some(Instant::now() + timeout))
    }

    pub fn is_visited(&self, path: &str) -> bool {
        self.visited.contains(path)
    }

    /// Number of files expanded so far
    pub fn expanded(&self) -> usize {
        self.visited.len()
    }

    fn mark_visited(&mut self, path: &str) -> bool {
        self.visited.insert(path.to_string())
    }

    fn check_deadline(&self) -> Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::DeadlineExceeded {
                elapsed: self.started.elapsed(),
                expanded: self.expanded(),
            }),
            _ => Ok(()),
        }
    }
}

/// Computes which inventory files are transitively imported from entry points.
///
/// The inventory and alias table are fixed for the lifetime of the engine.
/// File contents and resolutions are cached and shared by every traversal, so
/// the engine can be used from several threads at once; traversal state lives
/// in the [`TraversalContext`] each caller owns.
pub struct ReachabilityEngine {
    root: PathBuf,
    inventory: Inventory,
    aliases: AliasTable,
    options: EngineOptions,
    import_cache: DashMap<String, Vec<String>>,
    resolve_cache: DashMap<(String, String), Option<String>>,
}

impl ReachabilityEngine {
    pub fn new(
        root: impl Into<PathBuf>,
        inventory: Inventory,
        aliases: AliasTable,
        options: EngineOptions,
    ) -> Self {
        Self {
            root: root.into(),
            inventory,
            aliases,
            options,
            import_cache: DashMap::new(),
            resolve_cache: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Number of distinct files read so far
    pub fn files_read(&self) -> usize {
        self.import_cache.len()
    }

    /// Local import specifiers of a root-relative file. An unreadable file has
    /// none.
    pub fn imports_for(&self, file: &str) -> Vec<String> {
        if let Some(v) = self.import_cache.get(file) {
            trace!("Cache hit for imports: {}", file);
            return v.clone();
        }

        let specs = match fs::read_to_string(absolute_path(&self.root, file)) {
            Ok(src) => scan_imports(&src, self.options.follow_reexports, |s| self.is_local(s)),
            Err(e) => {
                warn!("Failed to read {}: {}", file, e);
                Vec::new()
            }
        };

        debug!("Found {} import specifiers in {}", specs.len(), file);
        self.import_cache.insert(file.to_string(), specs.clone());
        specs
    }

    /// Inventory path `specifier` refers to when imported from `from_file`
    pub fn resolve(&self, from_file: &str, specifier: &str) -> Option<String> {
        let key = (from_file.to_string(), specifier.to_string());
        if let Some(v) = self.resolve_cache.get(&key) {
            trace!("Cache hit for resolve: '{}' from {}", specifier, from_file);
            return v.clone();
        }

        let resolved = resolve(specifier, from_file, &self.aliases, &self.inventory)
            .map(|record| record.path.clone());
        if resolved.is_none() {
            trace!("Could not resolve import: '{}' from {}", specifier, from_file);
        }
        self.resolve_cache.insert(key, resolved.clone());
        resolved
    }

    /// Files reachable from `entry`, which is not itself part of the result
    /// unless one of those files imports it back.
    ///
    /// An entry already expanded in `ctx` contributes nothing new and yields an
    /// empty set.
    pub fn check_is_used(&self, ctx: &mut TraversalContext, entry: &str) -> Result<ReachableSet> {
        let mut reachable = ReachableSet::new();
        if ctx.is_visited(entry) {
            trace!("Already expanded: {}", entry);
            return Ok(reachable);
        }

        let mut stack: Vec<String> = vec![entry.to_string()];
        while let Some(current) = stack.pop() {
            if !ctx.mark_visited(&current) {
                continue;
            }
            ctx.check_deadline()?;
            trace!("Expanding: {}", current);

            for spec in self.imports_for(&current) {
                if self.is_skipped(&spec) {
                    trace!("Skipping non-project import: '{}'", spec);
                    continue;
                }
                let Some(target) = self.resolve(&current, &spec) else {
                    continue;
                };
                if !ctx.is_visited(&target) {
                    stack.push(target.clone());
                }
                reachable.insert(target);
            }
        }

        debug!("Computed {} reachable files from {}", reachable.len(), entry);
        Ok(reachable)
    }

    /// Union of the files reachable from every entry, using one context.
    pub fn reachable_from<S: AsRef<str>>(
        &self,
        entries: &[S],
        timeout: Option<Duration>,
    ) -> Result<ReachableSet> {
        let mut ctx = TraversalContext::with_deadline(timeout.map(|t| Instant::now() + t));
        let mut reachable = ReachableSet::new();
        for entry in entries {
            reachable.extend(self.check_is_used(&mut ctx, entry.as_ref())?);
        }
        Ok(reachable)
    }

    /// Same result as [`reachable_from`](Self::reachable_from), with one
    /// context per entry processed in parallel. Only the caches are shared.
    pub fn par_reachable_from<S: AsRef<str> + Sync>(
        &self,
        entries: &[S],
        timeout: Option<Duration>,
    ) -> Result<ReachableSet> {
        let deadline = timeout.map(|t| Instant::now() + t);
        entries
            .par_iter()
            .map(|entry| {
                let mut ctx = TraversalContext::with_deadline(deadline);
                self.check_is_used(&mut ctx, entry.as_ref())
            })
            .try_reduce(ReachableSet::new, |mut acc, set| {
                acc.extend(set);
                Ok(acc)
            })
    }

    fn is_local(&self, specifier: &str) -> bool {
        specifier.starts_with(LOCAL_SPECIFIER_MARKERS) || self.aliases.is_alias(specifier)
    }

    fn is_skipped(&self, specifier: &str) -> bool {
        self.options.skipped_prefixes.iter().any(|p| specifier.starts_with(p.as_str()))
    }
}
