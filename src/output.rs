use crate::config::WRITE_BUFFER;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends `suffix` unless `name` already ends with it.
pub fn with_suffix(name: &str, suffix: &str) -> String {
    if name.ends_with(suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// Paths for `count` chunk files derived from `file_name`.
///
/// A single chunk keeps the name as is; otherwise `_1`, `_2`, ... is inserted
/// before the extension, even when the name has no stem.
pub fn chunk_paths(dir: &Path, file_name: &str, count: usize) -> Vec<PathBuf> {
    if count == 1 {
        return vec![dir.join(file_name)];
    }
    let (stem, ext) = match file_name.rfind('.') {
        Some(pos) => file_name.split_at(pos),
        None => (file_name, ""),
    };
    (1..=count)
        .map(|n| dir.join(format!("{}_{}{}", stem, n, ext)))
        .collect()
}

/// Writes `lines` joined by `\n`, without a trailing newline.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER, file);

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(line.as_ref().as_bytes())?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(())
}
