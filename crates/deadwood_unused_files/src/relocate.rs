use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use deadwood_core::{FileRecord, absolute_path};
use log::{debug, info, warn};

const ACCEPT_ANSWERS: &[&str] = &["y", "yes", "Y", "Yes", "o", "oui"];
const REFUSE_ANSWERS: &[&str] = &["n", "no", "N", "No", "non", "Non"];

#[derive(Debug)]
pub struct RelocationReport {
    /// Directory the files were moved into
    pub destination: PathBuf,
    /// Root-relative paths that were moved
    pub moved: Vec<String>,
    /// Root-relative paths that could not be moved, with the reason
    pub failed: Vec<(String, String)>,
}

/// Moves each file into `<root>/<dir_name>`, keeping its root-relative
/// directory structure. A file whose destination already exists is left in
/// place and reported as failed.
pub fn relocate_files(
    root: &Path,
    files: &[FileRecord],
    dir_name: &str,
) -> Result<RelocationReport> {
    let destination = root.join(dir_name);
    fs::create_dir_all(&destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;
    info!("Moving {} files to {}", files.len(), destination.display());

    let mut report = RelocationReport { destination, moved: Vec::new(), failed: Vec::new() };
    for record in files {
        match move_file(root, &report.destination, record) {
            Ok(()) => {
                debug!("Moved {}", record.path);
                report.moved.push(record.path.clone());
            }
            Err(e) => {
                warn!("Failed to move {}: {}", record.path, e);
                report.failed.push((record.path.clone(), e.to_string()));
            }
        }
    }

    Ok(report)
}

fn move_file(root: &Path, destination: &Path, record: &FileRecord) -> io::Result<()> {
    let from = absolute_path(root, &record.path);
    let to = absolute_path(destination, &record.path);
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(&from, &to)
}

/// Asks whether the unused files should be moved until the answer is
/// recognized. An empty answer or end of input is a refusal.
pub fn ask_confirmation<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    loop {
        write!(output, "Do you want to continue(y/N) ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        let answer = line.trim();
        if answer.is_empty() || REFUSE_ANSWERS.contains(&answer) {
            return Ok(false);
        }
        if ACCEPT_ANSWERS.contains(&answer) {
            return Ok(true);
        }
        writeln!(output, "Please answer y or n")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn answer(text: &str) -> (bool, String) {
        let mut output = Vec::new();
        let accepted = ask_confirmation(&mut Cursor::new(text), &mut output).unwrap();
        (accepted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_relocation_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a/util.ts", "a");
        create_test_file(root, "src/b/util.ts", "b");

        let files = vec![FileRecord::new("/src/a/util.ts"), FileRecord::new("/src/b/util.ts")];
        let report = relocate_files(root, &files, "unusedFile").unwrap();

        assert_eq!(report.moved.len(), 2);
        assert!(report.failed.is_empty());
        assert!(!root.join("src/a/util.ts").exists());
        assert_eq!(fs::read_to_string(root.join("unusedFile/src/a/util.ts")).unwrap(), "a");
        assert_eq!(fs::read_to_string(root.join("unusedFile/src/b/util.ts")).unwrap(), "b");
    }

    #[test]
    fn test_relocation_collects_failures() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "keep.ts", "new");
        create_test_file(root, "unusedFile/keep.ts", "old");

        let files = vec![FileRecord::new("/keep.ts"), FileRecord::new("/gone.ts")];
        let report = relocate_files(root, &files, "unusedFile").unwrap();

        assert!(report.moved.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert_eq!(fs::read_to_string(root.join("unusedFile/keep.ts")).unwrap(), "old");
        assert!(root.join("keep.ts").exists());
    }

    #[test]
    fn test_confirmation_accepts() {
        for text in ["y\n", "yes\n", "Y\n", "Yes\n", "o\n", "oui\n", "  y  \n"] {
            assert!(answer(text).0, "{:?} should be accepted", text);
        }
    }

    #[test]
    fn test_confirmation_refuses() {
        for text in ["n\n", "no\n", "N\n", "No\n", "non\n", "Non\n", "\n", ""] {
            assert!(!answer(text).0, "{:?} should be refused", text);
        }
    }

    #[test]
    fn test_confirmation_asks_again() {
        let (accepted, output) = answer("maybe\nYES\noui\n");
        assert!(accepted);
        assert_eq!(output.matches("Do you want to continue(y/N)").count(), 3);
        assert_eq!(output.matches("Please answer y or n").count(), 2);
    }
}
