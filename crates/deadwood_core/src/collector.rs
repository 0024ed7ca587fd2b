use ignore::{DirEntry, WalkBuilder};
use log::{debug, trace, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    constants::{DECLARATION_SUFFIX, DEFAULT_RELOCATION_DIR, DEPENDENCY_DIRS, SOURCE_EXTENSIONS},
    error::{Error, Result},
    types::{FileRecord, Inventory},
};

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Directory names skipped in addition to dependency directories
    pub excluded_dirs: Vec<String>,
    /// Honour `.gitignore` / `.ignore` files
    pub respect_ignore_files: bool,
}

impl CollectorConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: vec![DEFAULT_RELOCATION_DIR.to_string()],
            respect_ignore_files: true,
        }
    }
}

/// Lists every source file under the root as a flat inventory.
///
/// Directories whose name contains a dot (`.git`, `.next`, `foo.bar`) are not
/// descended into, nor are dependency directories. Unreadable entries below the
/// root are logged and skipped; only an unreadable root is an error.
pub fn collect_files(cfg: &CollectorConfig) -> Result<Inventory> {
    let root = &cfg.root;
    debug!("Walking directory tree from root: {}", root.display());
    fs::read_dir(root).map_err(|source| Error::RootUnreadable { path: root.clone(), source })?;

    let excluded_dirs = cfg.excluded_dirs.clone();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(cfg.respect_ignore_files)
        .git_ignore(cfg.respect_ignore_files)
        .parents(cfg.respect_ignore_files)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |dent| dent.depth() == 0 || !is_skipped_dir(dent, &excluded_dirs))
        .build();

    let mut records = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let p = dent.path();
        if !dent.file_type().is_some_and(|t| t.is_file()) || !is_source_file(p) {
            continue;
        }

        match root_relative(root, p) {
            Some(path) => {
                trace!("Found source file: {}", path);
                records.push(FileRecord::new(path));
            }
            None => warn!("File outside of root: {}", p.display()),
        }
    }

    debug!("Collected {} source files", records.len());
    Ok(Inventory::new(records))
}

fn is_skipped_dir(dent: &DirEntry, excluded_dirs: &[String]) -> bool {
    if !dent.file_type().is_some_and(|t| t.is_dir()) {
        return false;
    }
    let name = dent.file_name().to_string_lossy();
    let skipped = name.contains('.')
        || DEPENDENCY_DIRS.contains(&name.as_ref())
        || excluded_dirs.iter().any(|d| d == name.as_ref());
    if skipped {
        trace!("Skipping directory: {}", dent.path().display());
    }
    skipped
}

fn is_source_file(p: &Path) -> bool {
    let Some(name) = p.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with(DECLARATION_SUFFIX) {
        return false;
    }
    p.extension().and_then(|e| e.to_str()).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// `/`-separated path of `p` below `root`, with a leading `/`
pub(crate) fn root_relative(root: &Path, p: &Path) -> Option<String> {
    let rel = p.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in rel.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    Some(out)
}

/// Absolute location of a root-relative inventory path
pub fn absolute_path(root: &Path, path: &str) -> PathBuf {
    path.split('/').filter(|s| !s.is_empty()).fold(root.to_path_buf(), |acc, s| acc.join(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn paths(inventory: &Inventory) -> Vec<&str> {
        inventory.records().iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_collect_files_filters_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "index.ts", "");
        create_test_file(root, "src/App.tsx", "");
        create_test_file(root, "src/legacy.js", "");
        create_test_file(root, "src/Widget.jsx", "");
        create_test_file(root, "src/styles.css", "");
        create_test_file(root, "src/env.d.ts", "");
        create_test_file(root, "README.md", "");

        let inventory = collect_files(&CollectorConfig::new(root)).unwrap();
        assert_eq!(
            paths(&inventory),
            vec!["/index.ts", "/src/App.tsx", "/src/Widget.jsx", "/src/legacy.js"]
        );
    }

    #[test]
    fn test_collect_files_skips_dependency_and_dotted_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.ts", "");
        create_test_file(root, "node_modules/pkg/index.js", "");
        create_test_file(root, "src/node_modules/nested.ts", "");
        create_test_file(root, ".next/server/page.js", "");
        create_test_file(root, "lib.v2/util.ts", "");
        create_test_file(root, "unusedFile/src/old.ts", "");

        let inventory = collect_files(&CollectorConfig::new(root)).unwrap();
        assert_eq!(paths(&inventory), vec!["/src/a.ts"]);
    }

    #[test]
    fn test_collect_files_record_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/pages/index.tsx", "");

        let inventory = collect_files(&CollectorConfig::new(root)).unwrap();
        let record = &inventory.records()[0];
        assert_eq!(record.name, "index.tsx");
        assert_eq!(record.path, "/src/pages/index.tsx");
    }

    #[test]
    fn test_collect_files_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let result = collect_files(&CollectorConfig::new(missing));
        assert!(matches!(result, Err(Error::RootUnreadable { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_skips_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.ts", "");
        create_test_file(root, "src/locked/hidden.ts", "");
        let locked = root.join("src/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // privileged users can still list the directory
        let enforced = fs::read_dir(&locked).is_err();

        let result = collect_files(&CollectorConfig::new(root));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let inventory = result.unwrap();
        assert!(inventory.get("/src/a.ts").is_some());
        if enforced {
            assert_eq!(paths(&inventory), vec!["/src/a.ts"]);
        }
    }

    #[test]
    fn test_absolute_path_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let file = create_test_file(root, "src/a/b.ts", "");
        let rel = root_relative(root, &file).unwrap();
        assert_eq!(rel, "/src/a/b.ts");
        assert_eq!(absolute_path(root, &rel), file);
    }
}
