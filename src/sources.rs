use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of deleting consumed input files
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub removed: usize,
    pub failed: usize,
}

pub fn require_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("Input directory does not exist: {}", dir.display());
    }
    Ok(())
}

pub fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("Input file does not exist: {}", path.display());
    }
    Ok(())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Lists `.csv` files (any case) directly inside `dir`, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    require_dir(dir)?;

    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to list: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to list: {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && is_csv(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(dir = %dir.display(), count = files.len(), "Listed CSV inputs");
    Ok(files)
}

/// Deletes consumed inputs, skipping any path that is also in `keep`.
///
/// Failures are logged and counted; already written outputs are left in place.
pub fn remove_sources(paths: &[PathBuf], keep: &[PathBuf]) -> Removal {
    let mut removal = Removal::default();
    for path in paths {
        if keep.iter().any(|k| k == path) {
            debug!(path = %path.display(), "Not removing input overwritten by output");
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => removal.removed += 1,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove input file");
                removal.failed += 1;
            }
        }
    }
    removal
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_csv_files_sorted_case_insensitive() -> Result<()> {
        let dir = TempDir::new()?;
        for name in ["b.csv", "A.CSV", "c.Csv", "notes.txt", "csv"] {
            fs::write(dir.path().join(name), "h\n")?;
        }
        fs::create_dir(dir.path().join("nested.csv"))?;

        let names: Vec<String> = list_csv_files(dir.path())?
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.CSV", "b.csv", "c.Csv"]);
        Ok(())
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(list_csv_files(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn remove_sources_keeps_outputs_and_counts_failures() -> Result<()> {
        let dir = TempDir::new()?;
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let gone = dir.path().join("gone.csv");
        fs::write(&a, "x")?;
        fs::write(&b, "x")?;

        let removal = remove_sources(&[a.clone(), b.clone(), gone], &[b.clone()]);
        assert_eq!(removal, Removal { removed: 1, failed: 1 });
        assert!(!a.exists());
        assert!(b.exists());
        Ok(())
    }
}
