//! Constants for file discovery, entry classification and import scanning.
//!
//! Everything that decides *which* files take part in the analysis lives here so
//! the collector, the scanner and the entry classifier agree with each other.

/// Source extensions that make up the file inventory
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];

/// Suffix of TypeScript declaration files, never part of the inventory
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Dependency directories that are never descended into
pub const DEPENDENCY_DIRS: &[&str] = &["node_modules"];

/// Directory unused files are moved to, excluded from later scans
pub const DEFAULT_RELOCATION_DIR: &str = "unusedFile";

/// Leading characters of a specifier that points into the project
pub const LOCAL_SPECIFIER_MARKERS: &[char] = &['~', '.', '/'];

/// Alias prefixes that point at generated code outside the inventory
pub const DEFAULT_SKIPPED_PREFIXES: &[&str] = &["~/edgedb"];

/// Path suffixes of routing entry points
pub const ENTRY_SUFFIXES: &[&str] =
    &["root.tsx", "index.tsx", "layout.tsx", "index.ts", "layout.ts"];

/// Route variants (`index@lang.tsx`, `layout-named.tsx`, `plugin-auth.tsx`)
pub const ENTRY_VARIANT_MARKERS: &[&str] = &["index@", "layout-", "plugin-"];

/// Framework and tooling files that are loaded by convention, not imported
pub const EXCLUDED_FILE_NAMES: &[&str] = &[
    "entry.express.tsx",
    "entry.ssr.tsx",
    "entry.dev.tsx",
    "entry.preview.tsx",
    "service-worker.ts",
    "router-head.tsx",
    "tailwind.config.ts",
    "tailwind.config.js",
    "vite.config.ts",
    "vite.config.js",
    "postcss.config.js",
];

/// Build output directories (root-relative) whose files are never reported
pub const EXCLUDED_PATH_PREFIXES: &[&str] = &["/dist", "/server"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_extensions() {
        assert_eq!(SOURCE_EXTENSIONS.len(), 4);
        for ext in ["js", "ts", "jsx", "tsx"] {
            assert!(SOURCE_EXTENSIONS.contains(&ext));
        }
        assert!(!SOURCE_EXTENSIONS.contains(&"mjs"));
    }

    #[test]
    fn test_entry_suffixes_are_source_files() {
        for suffix in ENTRY_SUFFIXES {
            let ext = suffix.rsplit('.').next().unwrap();
            assert!(SOURCE_EXTENSIONS.contains(&ext), "'{}' is not a source file", suffix);
        }
    }
}
