use log::trace;

use crate::{
    config::AliasTable,
    constants::SOURCE_EXTENSIONS,
    types::{FileRecord, Inventory, strip_extension},
};

/// Resolves one import specifier of `from_file` (root-relative) to an inventory
/// file.
///
/// Relative specifiers resolve against the importing file and root-anchored
/// ones against the project root; aliases only apply to the remaining bare
/// specifiers, which are rewritten relative to `from_file` first. Anything else
/// is an external package and yields `None`, as does a specifier no inventory
/// file matches.
pub fn resolve<'a>(
    specifier: &str,
    from_file: &str,
    aliases: &AliasTable,
    inventory: &'a Inventory,
) -> Option<&'a FileRecord> {
    if is_relative(specifier) {
        return resolve_relative(specifier, from_file, inventory);
    }

    if specifier.starts_with('/') {
        let (_, tail) = split_specifier(specifier);
        let tail = join_segments(&tail);
        return match_tail(&tail, Some(&tail), false, inventory);
    }

    for rule in aliases.candidates(specifier) {
        let relative = relativize(from_file, &rule.substitute(specifier));
        trace!("Alias '{}' rewrote '{}' to '{}'", rule.prefix, specifier, relative);
        if let Some(found) = resolve_relative(&relative, from_file, inventory) {
            return Some(found);
        }
    }

    trace!("Not resolved as a project specifier: '{}'", specifier);
    None
}

pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Number of directory levels to climb from the importing *file*: one for the
/// file itself plus one per leading `../`.
pub fn ascent_depth(specifier: &str) -> usize {
    split_specifier(specifier).0 + 1
}

/// Expresses the root-relative `target` relative to the directory of
/// `from_file`, e.g. `/src/pages/index.tsx` + `/src/components/Button` gives
/// `../components/Button`.
pub fn relativize(from_file: &str, target: &str) -> String {
    let from: Vec<&str> = segments(from_file).collect();
    let from_dir = &from[..from.len().saturating_sub(1)];
    let target: Vec<&str> = segments(target).collect();

    let common = from_dir.iter().zip(&target).take_while(|(a, b)| a == b).count();
    let ups = from_dir.len() - common;
    let rest = target[common..].join("/");

    if ups == 0 { format!("./{}", rest) } else { format!("{}{}", "../".repeat(ups), rest) }
}

fn resolve_relative<'a>(
    specifier: &str,
    from_file: &str,
    inventory: &'a Inventory,
) -> Option<&'a FileRecord> {
    let ascent = ascent_depth(specifier);
    let (_, tail_segments) = split_specifier(specifier);
    let from: Vec<&str> = segments(from_file).collect();

    // Above the project root the exact location is unknown; the suffix match
    // still applies.
    let expected = (ascent <= from.len()).then(|| {
        let mut location: Vec<&str> = from[..from.len() - ascent].to_vec();
        location.extend(tail_segments.iter().copied());
        join_segments(&location)
    });

    let tail = join_segments(&tail_segments);
    match_tail(&tail, expected.as_deref(), true, inventory)
}

/// Finds the inventory file for an extension-less `tail` (`/components/Button`).
///
/// The file located exactly at `expected` wins; failing that, and only when
/// `suffix_fallback` is set, the first file in path order whose
/// extension-stripped path ends with `tail`. An explicit source extension
/// (`./util.js` for `util.ts`) and directory imports (`<tail>/index`) are tried
/// after the plain tail.
fn match_tail<'a>(
    tail: &str,
    expected: Option<&str>,
    suffix_fallback: bool,
    inventory: &'a Inventory,
) -> Option<&'a FileRecord> {
    let mut variants: Vec<(String, Option<String>)> = Vec::new();
    if !tail.is_empty() {
        variants.push((tail.to_string(), expected.map(str::to_string)));
        if has_source_extension(tail) {
            variants.push((
                strip_extension(tail).to_string(),
                expected.map(|e| strip_extension(e).to_string()),
            ));
        }
    }
    variants.push((format!("{}/index", tail), expected.map(|e| format!("{}/index", e))));

    for (tail, expected) in &variants {
        if let Some(found) = expected.as_deref().and_then(|e| inventory.by_stem(e)) {
            trace!("Exact match for '{}': {}", tail, found.path);
            return Some(found);
        }
        if !suffix_fallback {
            continue;
        }
        if let Some(found) = inventory.records().iter().find(|r| r.stem().ends_with(tail.as_str()))
        {
            trace!("Suffix match for '{}': {}", tail, found.path);
            return Some(found);
        }
    }

    trace!("No inventory file matches '{}'", tail);
    None
}

fn has_source_extension(tail: &str) -> bool {
    let stripped = strip_extension(tail);
    stripped.len() < tail.len() && SOURCE_EXTENSIONS.contains(&&tail[stripped.len() + 1..])
}

/// Splits a specifier into its count of leading `..` segments and its
/// normalized tail segments. Interior `..` segments cancel the preceding tail
/// segment, or add to the ascent when there is none.
fn split_specifier(specifier: &str) -> (usize, Vec<&str>) {
    let mut parents = 0;
    let mut tail: Vec<&str> = Vec::new();
    for segment in segments(specifier) {
        match segment {
            "." => {}
            ".." => {
                if tail.pop().is_none() {
                    parents += 1;
                }
            }
            s => tail.push(s),
        }
    }
    (parents, tail)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn join_segments(segments: &[&str]) -> String {
    segments.iter().fold(String::new(), |mut out, s| {
        out.push('/');
        out.push_str(s);
        out
    })
}
