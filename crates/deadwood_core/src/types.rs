use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Root-relative paths of the files reached from one or more entry points.
pub type ReachableSet = HashSet<String>;

/// A source file of the project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileRecord {
    /// File name with extension
    pub name: String,
    /// Root-relative path, `/`-separated, always starting with `/`
    pub path: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { name, path }
    }

    /// The path without its extension, e.g. `/src/util` for `/src/util.ts`
    pub fn stem(&self) -> &str {
        strip_extension(&self.path)
    }
}

/// Strips the last `.ext` of the final path segment, if any.
pub(crate) fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..file_start + dot],
        _ => path,
    }
}

/// The set of files taking part in an analysis, unique by path and sorted by path.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: Vec<FileRecord>,
    by_stem: HashMap<String, Vec<usize>>,
}

impl Inventory {
    pub fn new(records: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut records: Vec<FileRecord> = records.into_iter().collect();
        records.sort_by(|a, b| a.path.cmp(&b.path));
        records.dedup_by(|a, b| a.path == b.path);

        let mut by_stem: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_stem.entry(record.stem().to_string()).or_default().push(idx);
        }
        Self { records, by_stem }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.records.binary_search_by(|r| r.path.as_str().cmp(path)).ok().map(|i| &self.records[i])
    }

    /// First record (in path order) whose extension-stripped path is exactly `stem`
    pub fn by_stem(&self, stem: &str) -> Option<&FileRecord> {
        self.by_stem.get(stem).and_then(|idx| idx.first()).map(|&i| &self.records[i])
    }

    /// Keeps only the records matching `keep`
    pub fn filtered(&self, keep: impl Fn(&FileRecord) -> bool) -> Inventory {
        Inventory::new(self.records.iter().filter(|r| keep(r)).cloned())
    }
}

/// A prefix substitution derived from one `compilerOptions.paths` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    /// Alias token without its wildcard, e.g. `~/components/`
    pub prefix: String,
    /// Root-relative substitution, e.g. `/src/components/`
    pub target: String,
    /// `false` for aliases without a trailing `*`, which only match exactly
    pub wildcard: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_record_name() {
        let record = FileRecord::new("/src/components/Button.tsx");
        assert_eq!(record.name, "Button.tsx");
        assert_eq!(record.stem(), "/src/components/Button");
    }

    #[test]
    fn test_strip_extension_keeps_dotted_dirs() {
        assert_eq!(strip_extension("/a.b/c"), "/a.b/c");
        assert_eq!(strip_extension("/a/b.test.ts"), "/a/b.test");
        assert_eq!(strip_extension("/a/.env"), "/a/.env");
    }

    #[test]
    fn test_inventory_sorted_and_unique() {
        let inventory = Inventory::new(vec![
            FileRecord::new("/b.ts"),
            FileRecord::new("/a.ts"),
            FileRecord::new("/b.ts"),
        ]);
        let paths: Vec<&str> = inventory.records().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/a.ts", "/b.ts"]);
        assert!(inventory.get("/b.ts").is_some());
        assert!(inventory.get("/c.ts").is_none());
    }

    #[test]
    fn test_inventory_by_stem() {
        let inventory =
            Inventory::new(vec![FileRecord::new("/util.tsx"), FileRecord::new("/util.ts")]);
        assert_eq!(inventory.by_stem("/util").unwrap().path, "/util.ts");
        assert!(inventory.by_stem("/utils").is_none());
    }
}
