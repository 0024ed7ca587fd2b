use log::{debug, info, trace, warn};
use path_clean::clean;
use serde::Deserialize;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    collector::root_relative,
    error::{Error, Result},
    types::AliasRule,
};

pub const TSCONFIG_FILE: &str = "tsconfig.json";

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TsconfigJson {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: BTreeMap<String, Vec<String>>,
}

/// Path aliases of a project, in `compilerOptions.paths` key order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    pub fn new(rules: Vec<AliasRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Loads the aliases of the project at `root`.
    ///
    /// A missing or malformed tsconfig yields an empty table: alias imports then
    /// simply fail to resolve.
    pub fn load(root: &Path, tsconfig: Option<&Path>) -> Self {
        let path = tsconfig.map(Path::to_path_buf).unwrap_or_else(|| root.join(TSCONFIG_FILE));
        if !path.exists() {
            info!("No {} found at {}", TSCONFIG_FILE, path.display());
            return Self::default();
        }
        match Self::read(root, &path) {
            Ok(table) => table,
            Err(e) => {
                warn!("Ignoring path aliases: {}", e);
                Self::default()
            }
        }
    }

    /// Reads and parses one tsconfig file. Targets are resolved against the
    /// file's own directory, which must lie under `root`.
    pub fn read(root: &Path, tsconfig: &Path) -> Result<Self> {
        debug!("Reading path aliases from {}", tsconfig.display());
        let content = fs::read_to_string(tsconfig)
            .map_err(|e| Error::Config { path: tsconfig.to_path_buf(), message: e.to_string() })?;
        let config_dir = config_dir(root, tsconfig);
        Self::parse(&content, &config_dir).ok_or_else(|| Error::Config {
            path: tsconfig.to_path_buf(),
            message: "not a tsconfig document".to_string(),
        })
    }

    /// Parses tsconfig text located in the root-relative directory `config_dir`
    /// (`""` for the project root).
    pub fn parse(content: &str, config_dir: &str) -> Option<Self> {
        let value = parse_tsconfig_value(content)?;
        let tsconfig: TsconfigJson = match serde_json::from_value(value) {
            Ok(t) => t,
            Err(e) => {
                debug!("Unexpected tsconfig shape: {}", e);
                return None;
            }
        };

        let base_url = tsconfig.compiler_options.base_url.as_deref().unwrap_or(".");
        let mut rules = Vec::new();
        for (alias, targets) in &tsconfig.compiler_options.paths {
            let prefix = alias.trim_end_matches('*');
            for target in targets {
                let target = alias_target(config_dir, base_url, target, prefix.ends_with('/'));
                trace!("Found path alias: '{}' -> '{}'", prefix, target);
                rules.push(AliasRule {
                    prefix: prefix.to_string(),
                    target,
                    wildcard: alias.ends_with('*'),
                });
            }
        }

        debug!("Loaded {} path alias rules", rules.len());
        Some(Self { rules })
    }

    /// The rule with the longest prefix matching `specifier`. Equal-length
    /// prefixes resolve to the earliest rule.
    pub fn find_match(&self, specifier: &str) -> Option<&AliasRule> {
        self.candidates(specifier).into_iter().next()
    }

    /// Every rule sharing the longest prefix that matches `specifier`, in table
    /// order. An alias with several targets contributes one rule per target.
    pub fn candidates(&self, specifier: &str) -> Vec<&AliasRule> {
        let matching: Vec<&AliasRule> =
            self.rules.iter().filter(|r| r.matches(specifier)).collect();
        let Some(longest) = matching.iter().map(|r| r.prefix.len()).max() else {
            return Vec::new();
        };
        matching.into_iter().filter(|r| r.prefix.len() == longest).collect()
    }

    /// True if some rule's prefix starts `specifier`
    pub fn is_alias(&self, specifier: &str) -> bool {
        self.rules.iter().any(|r| r.matches(specifier))
    }
}

impl AliasRule {
    pub fn matches(&self, specifier: &str) -> bool {
        if self.wildcard { specifier.starts_with(&self.prefix) } else { specifier == self.prefix }
    }

    /// Replaces the alias prefix of `specifier` by the target root
    pub fn substitute(&self, specifier: &str) -> String {
        let rest = specifier.strip_prefix(&self.prefix).unwrap_or(specifier);
        let mut out = self.target.clone();
        if !rest.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(rest.trim_start_matches('/'));
        out
    }
}

/// Root-relative directory of `tsconfig`. Both paths are canonicalized first so
/// relative and symlinked locations compare equal to the root.
fn config_dir(root: &Path, tsconfig: &Path) -> String {
    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let tsconfig = fs::canonicalize(tsconfig).unwrap_or_else(|_| tsconfig.to_path_buf());
    match tsconfig.parent().and_then(|dir| root_relative(&root, dir)) {
        Some(dir) => dir,
        None => {
            warn!(
                "{} lies outside {}, resolving its aliases against the root",
                tsconfig.display(),
                root.display()
            );
            String::new()
        }
    }
}

fn alias_target(config_dir: &str, base_url: &str, target: &str, keep_slash: bool) -> String {
    let stripped = target.trim_end_matches('*');
    let joined = clean(PathBuf::from(format!("/{}/{}/{}", config_dir, base_url, stripped)));
    let mut out = joined.to_string_lossy().replace('\\', "/");
    if !out.starts_with('/') {
        out.insert(0, '/');
    }
    if keep_slash && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// tsconfig files are JSONC: plain JSON first, JSON5 (comments, trailing
/// commas) as a fallback.
fn parse_tsconfig_value(content: &str) -> Option<Value> {
    if let Ok(v) = serde_json::from_str(content) {
        return Some(v);
    }
    json_five::from_str::<Value>(content).ok()
}
