use crate::config::CSV_SUFFIX;
use crate::output::write_lines;
use crate::progress::file_progress;
use crate::prompt::{output_file_name, Prompt};
use crate::sources::{list_csv_files, remove_sources, Removal};
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct MergeConfig {
    pub input_dir: PathBuf,
    pub default_output: String,
    pub output_name: Option<String>,
    pub keep_inputs: bool,
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct MergeReport {
    pub files: usize,
    pub unreadable: usize,
    pub data_lines: usize,
    pub output: Option<PathBuf>,
    pub removal: Removal,
}

/// One header line followed by the data lines of every input, in order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergedDocument {
    pub header: Option<String>,
    pub rows: Vec<String>,
}

impl MergedDocument {
    /// Appends one file's content.
    ///
    /// The first file with at least one line supplies the header verbatim; the
    /// first line of every later file is dropped. Data lines are trimmed and
    /// blank ones skipped. Columns are not compared across files.
    pub fn push_file(&mut self, content: &str) {
        let mut lines = content.lines();
        let Some(first) = lines.next() else {
            return;
        };
        if self.header.is_none() {
            self.header = Some(first.to_string());
        }
        self.rows.extend(
            lines
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    pub fn lines(&self) -> Vec<&str> {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Concatenates every CSV file in the merge directory under the first file's
/// header. Unreadable files are logged and left out; they are not deleted.
pub fn run_merge(config: &MergeConfig, prompt: &mut dyn Prompt) -> Result<MergeReport> {
    let files = list_csv_files(&config.input_dir)?;
    info!(files = files.len(), "Merging CSV files");

    let mut report = MergeReport {
        files: files.len(),
        ..Default::default()
    };
    let mut document = MergedDocument::default();
    let mut consumed = Vec::with_capacity(files.len());

    let pb = file_progress(files.len(), "Merge");
    for path in &files {
        pb.set_message(path.display().to_string());
        match fs::read_to_string(path) {
            Ok(content) => {
                let before = document.rows.len();
                document.push_file(&content);
                debug!(
                    path = %path.display(),
                    rows = document.rows.len() - before,
                    "Merged file"
                );
                consumed.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read file, skipping");
                report.unreadable += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    report.data_lines = document.rows.len();
    if document.rows.is_empty() {
        println!("No data rows found in {}", config.input_dir.display());
        return Ok(report);
    }
    if config.dry_run {
        info!(rows = report.data_lines, "Dry run, nothing written or removed");
        return Ok(report);
    }

    let file_name = output_file_name(
        prompt,
        config.output_name.as_deref(),
        &config.default_output,
        CSV_SUFFIX,
    )?;
    let output = config.input_dir.join(file_name);
    write_lines(&output, &document.lines())?;
    info!(output = %output.display(), rows = report.data_lines, "Merged file written");

    if !config.keep_inputs {
        report.removal = remove_sources(&consumed, std::slice::from_ref(&output));
    }
    report.output = Some(output);
    Ok(report)
}
