use crate::column::extract_column_from_file;
use crate::config::TEXT_SUFFIX;
use crate::output::{chunk_paths, write_lines};
use crate::progress::file_progress;
use crate::prompt::{output_file_name, Prompt};
use crate::sources::{list_csv_files, remove_sources, Removal};
use anyhow::{bail, Result};
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use tracing::{debug, info};

/// Distinct values in first-seen order.
#[derive(Default)]
pub struct AddressSet {
    seen: FxHashSet<String>,
    ordered: Vec<String>,
    duplicates: u64,
}

impl AddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value`, returning `true` if it had not been seen before.
    pub fn insert(&mut self, value: String) -> bool {
        if self.seen.contains(&value) {
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(value.clone());
        self.ordered.push(value);
        true
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Every value offered so far, duplicates included
    pub fn total(&self) -> u64 {
        self.ordered.len() as u64 + self.duplicates
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

pub struct WalletsConfig {
    pub input_dir: PathBuf,
    pub column: String,
    pub default_output: String,
    pub output_name: Option<String>,
    pub chunk_size: usize,
    pub keep_inputs: bool,
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct DedupReport {
    pub files: usize,
    pub total: u64,
    pub unique: usize,
    pub duplicates: u64,
    pub skipped_lines: usize,
    pub unbalanced_lines: usize,
    pub outputs: Vec<PathBuf>,
    pub removal: Removal,
}

/// Collects one column across every CSV file in the wallets directory,
/// drops repeats and writes the result in chunks of at most `chunk_size`.
///
/// Any file that fails to extract aborts the run before anything is written.
/// Inputs are deleted only after every chunk has been written.
pub fn run_wallets(config: &WalletsConfig, prompt: &mut dyn Prompt) -> Result<DedupReport> {
    if config.chunk_size == 0 {
        bail!("Chunk size must be at least 1");
    }

    let files = list_csv_files(&config.input_dir)?;
    info!(files = files.len(), column = %config.column, "Collecting wallet addresses");

    let mut set = AddressSet::new();
    let mut report = DedupReport {
        files: files.len(),
        ..Default::default()
    };

    let pb = file_progress(files.len(), "Wallets");
    for path in &files {
        pb.set_message(path.display().to_string());
        let extraction = extract_column_from_file(path, &config.column)?;
        debug!(
            path = %path.display(),
            values = extraction.values.len(),
            "Collected file"
        );
        report.skipped_lines += extraction.skipped_lines;
        report.unbalanced_lines += extraction.unbalanced_lines;
        set.extend(extraction.values);
        pb.inc(1);
    }
    pb.finish_and_clear();

    report.total = set.total();
    report.unique = set.len();
    report.duplicates = set.duplicates();
    info!(
        unique = report.unique,
        duplicates = report.duplicates,
        "Deduplication complete"
    );

    if set.is_empty() {
        println!("No wallet addresses found in {}", config.input_dir.display());
        return Ok(report);
    }
    if config.dry_run {
        info!("Dry run, nothing written or removed");
        return Ok(report);
    }

    let file_name = output_file_name(
        prompt,
        config.output_name.as_deref(),
        &config.default_output,
        TEXT_SUFFIX,
    )?;

    let values = set.into_vec();
    let chunk_count = values.len().div_ceil(config.chunk_size);
    let paths = chunk_paths(&config.input_dir, &file_name, chunk_count);
    for (chunk, path) in values.chunks(config.chunk_size).zip(&paths) {
        write_lines(path, chunk)?;
        info!(output = %path.display(), values = chunk.len(), "Chunk written");
    }
    report.outputs = paths;

    if !config.keep_inputs {
        report.removal = remove_sources(&files, &report.outputs);
    }
    Ok(report)
}
