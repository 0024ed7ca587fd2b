use std::{
    env,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use deadwood_core::FileRecord;
use log::{debug, trace};
use serde::Serialize;

use crate::types::CheckResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    unused: &'a [FileRecord],
    entries: usize,
    files_analyzed: usize,
}

/// Relativize a root-relative path (`/src/a.ts`) to the current working directory
fn relativize_to_cwd(root: &Path, relative_to_root: &str) -> String {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(_) => {
            debug!("Failed to get current directory");
            return relative_to_root.to_string();
        }
    };

    let abs_path = root.join(relative_to_root.trim_start_matches('/'));
    match make_relative(&abs_path, &cwd) {
        Some(rel_path) => {
            let result = rel_path.to_string_lossy().to_string();
            trace!("Relativized '{}' to '{}'", relative_to_root, result);
            result
        }
        None => relative_to_root.to_string(),
    }
}

/// Relative path from `base` to `target`, or `None` when they share no root
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    if target_parts.first() != base_parts.first() {
        return None;
    }

    let common = target_parts.iter().zip(&base_parts).take_while(|(t, b)| t == b).count();

    let mut result = PathBuf::new();
    for _ in &base_parts[common..] {
        result.push("..");
    }
    for component in &target_parts[common..] {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

pub fn print_no_unused_message<W: Write>(writer: &mut W) -> io::Result<()> {
    debug!("No unused files");
    writeln!(writer, "{} No unused files found", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

/// One `name | path` line per unused file followed by a summary
pub fn print_unused_files<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing {} unused files", result.unused.len());

    writeln!(
        writer,
        "{} {} unused files\n",
        "⚠".yellow().bold(),
        result.unused.len().to_string().yellow()
    )?;

    let width = result.unused.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for record in &result.unused {
        let display_path = relativize_to_cwd(&result.root, &record.path);
        writeln!(
            writer,
            "{:<width$} {} {}",
            record.name.bright_white().bold(),
            "|".dimmed(),
            display_path.blue(),
            width = width
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Source files: {}", result.inventory_size.to_string().cyan())?;
    writeln!(writer, "  Entry points: {}", result.entries.to_string().cyan())?;
    writeln!(writer, "  Reachable: {}", result.reachable.to_string().cyan())?;
    writeln!(writer, "  Unused: {}", result.unused.len().to_string().yellow().bold())?;

    writer.flush()?;
    Ok(())
}

pub fn print_json_report<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    let report = JsonReport {
        unused: &result.unused,
        entries: result.entries,
        files_analyzed: result.files_analyzed,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
