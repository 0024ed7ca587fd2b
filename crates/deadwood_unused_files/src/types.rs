use deadwood_core::FileRecord;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Project root the paths below are relative to
    pub root: PathBuf,
    /// Files no entry point reaches, sorted by path
    pub unused: Vec<FileRecord>,
    /// Number of entry points the traversal started from
    pub entries: usize,
    /// Number of source files found under the root
    pub inventory_size: usize,
    /// Number of distinct files reached from the entry points
    pub reachable: usize,
    /// Number of files whose imports were read
    pub files_analyzed: usize,
}
