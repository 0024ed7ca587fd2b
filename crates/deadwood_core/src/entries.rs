use crate::{
    constants::{ENTRY_SUFFIXES, ENTRY_VARIANT_MARKERS, EXCLUDED_FILE_NAMES, EXCLUDED_PATH_PREFIXES},
    types::{FileRecord, Inventory},
};

/// True if the routing conventions load this file directly: root, index and
/// layout files, plus `.tsx` route variants such as `index@fr.tsx`,
/// `layout-admin.tsx` or `plugin-auth.tsx`.
///
/// `extra_markers` are user-supplied substrings that also make a path an entry.
pub fn is_entry_point(path: &str, extra_markers: &[String]) -> bool {
    ENTRY_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
        || (path.ends_with(".tsx") && ENTRY_VARIANT_MARKERS.iter().any(|m| path.contains(m)))
        || extra_markers.iter().any(|m| !m.is_empty() && path.contains(m.as_str()))
}

/// Files never reported as unused: tooling configuration loaded by
/// convention, extension-less names, and build output.
pub fn is_excluded(record: &FileRecord) -> bool {
    EXCLUDED_FILE_NAMES.contains(&record.name.as_str())
        || !record.name.contains('.')
        || EXCLUDED_PATH_PREFIXES
            .iter()
            .any(|p| record.path.strip_prefix(p).is_some_and(|rest| rest.starts_with('/')))
}

pub fn entry_points(inventory: &Inventory, extra_markers: &[String]) -> Vec<FileRecord> {
    inventory.records().iter().filter(|r| is_entry_point(&r.path, extra_markers)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_entry_points() {
        for path in [
            "/src/root.tsx",
            "/src/routes/index.tsx",
            "/src/routes/layout.tsx",
            "/src/lib/index.ts",
            "/src/routes/layout.ts",
            "/src/routes/index@fr.tsx",
            "/src/routes/layout-admin.tsx",
            "/src/routes/plugin-auth.tsx",
        ] {
            assert!(is_entry_point(path, &[]), "{} should be an entry point", path);
        }
    }

    #[test]
    fn test_non_entry_points() {
        for path in [
            "/src/components/Button.tsx",
            "/src/orphan.tsx",
            "/src/routes/plugin-auth.ts",
            "/src/routes/index.js",
            "/src/routes/layout-admin.jsx",
        ] {
            assert!(!is_entry_point(path, &[]), "{} should not be an entry point", path);
        }
    }

    #[test]
    fn test_extra_entry_markers() {
        let markers = vec!["/scripts/".to_string(), String::new()];
        assert!(is_entry_point("/scripts/seed.ts", &markers));
        assert!(!is_entry_point("/src/seed.ts", &markers));
    }

    #[test]
    fn test_excluded_files() {
        assert!(is_excluded(&FileRecord::new("/vite.config.ts")));
        assert!(is_excluded(&FileRecord::new("/src/entry.ssr.tsx")));
        assert!(is_excluded(&FileRecord::new("/dist/build/app.js")));
        assert!(is_excluded(&FileRecord::new("/server/entry.js")));
        assert!(!is_excluded(&FileRecord::new("/src/server-utils.ts")));
        assert!(!is_excluded(&FileRecord::new("/server-actions.ts")));
        assert!(!is_excluded(&FileRecord::new("/src/orphan.tsx")));
    }

    #[test]
    fn test_entry_points_from_inventory() {
        let inventory = Inventory::new(vec![
            FileRecord::new("/src/routes/layout.tsx"),
            FileRecord::new("/src/orphan.tsx"),
        ]);
        let entries = entry_points(&inventory, &[]);
        assert_eq!(entries, vec![FileRecord::new("/src/routes/layout.tsx")]);
    }
}
