use anyhow::{Context, Result, anyhow};
use deadwood_core::{
    CollectorConfig, DEFAULT_SKIPPED_PREFIXES, EngineOptions, ReachabilityEngine, collect_files,
    entry_points, is_entry_point, is_excluded,
};
use log::{debug, info, warn};

use crate::{config::Config, types::CheckResult};

pub fn run_unused_files_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting unused files check");

    // Initialize config (resolve root, load path aliases)
    cfg.initialize()?;
    let root = cfg.root()?.clone();

    let collector_cfg = CollectorConfig {
        root: root.clone(),
        excluded_dirs: vec![cfg.move_dir.clone()],
        respect_ignore_files: !cfg.no_ignore,
    };
    let inventory = collect_files(&collector_cfg)
        .with_context(|| format!("Failed to list files under {}", root.display()))?;
    info!("Found {} source files", inventory.len());

    // Entry points come from the full inventory, resolution only sees files that can be reported
    let entries = entry_points(&inventory, &cfg.entries);
    if entries.is_empty() {
        warn!("No entry files found under {}", root.display());
        return Err(anyhow!("No entry files found under {}", root.display()));
    }
    info!("Found {} entry files", entries.len());

    let candidates = inventory.filtered(|record| !is_excluded(record));
    debug!("{} files remain after exclusions", candidates.len());

    let mut skipped_prefixes: Vec<String> =
        DEFAULT_SKIPPED_PREFIXES.iter().map(|s| s.to_string()).collect();
    skipped_prefixes.extend(cfg.skip_prefixes.iter().cloned());
    let options = EngineOptions { follow_reexports: cfg.follow_reexports, skipped_prefixes };

    let engine = ReachabilityEngine::new(root.clone(), candidates, cfg.aliases.clone(), options);
    let entry_paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    let reachable = engine
        .par_reachable_from(&entry_paths, cfg.timeout())
        .context("Import graph traversal failed")?;

    let unused: Vec<_> = engine
        .inventory()
        .records()
        .iter()
        .filter(|r| !is_entry_point(&r.path, &cfg.entries) && !reachable.contains(&r.path))
        .cloned()
        .collect();

    info!("Unused files check complete. Found {} unused files", unused.len());
    Ok(CheckResult {
        root,
        unused,
        entries: entries.len(),
        inventory_size: inventory.len(),
        reachable: reachable.len(),
        files_analyzed: engine.files_read(),
    })
}
