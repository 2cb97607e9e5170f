use crate::column::extract_column_from_file;
use crate::config::TEXT_SUFFIX;
use crate::output::write_lines;
use crate::prompt::{output_file_name, Prompt};
use crate::sources::{require_dir, require_file};
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

pub struct TokensConfig {
    pub input_dir: PathBuf,
    pub file_name: String,
    pub column: String,
    pub default_output: String,
    pub output_name: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct ExtractReport {
    pub values: usize,
    pub skipped_lines: usize,
    pub unbalanced_lines: usize,
    /// `None` when nothing was extracted or on a dry run
    pub output: Option<PathBuf>,
}

/// Extracts one column of the designated token export into a text file, one
/// value per line, in file order. The input file is left in place.
pub fn run_tokens(config: &TokensConfig, prompt: &mut dyn Prompt) -> Result<ExtractReport> {
    require_dir(&config.input_dir)?;
    let input = config.input_dir.join(&config.file_name);
    require_file(&input)?;

    info!(input = %input.display(), column = %config.column, "Extracting token addresses");
    let extraction = extract_column_from_file(&input, &config.column)?;

    let mut report = ExtractReport {
        values: extraction.values.len(),
        skipped_lines: extraction.skipped_lines,
        unbalanced_lines: extraction.unbalanced_lines,
        output: None,
    };

    if extraction.values.is_empty() {
        println!("No values found in column '{}'", config.column);
        return Ok(report);
    }
    if config.dry_run {
        info!(values = report.values, "Dry run, nothing written");
        return Ok(report);
    }

    let file_name = output_file_name(
        prompt,
        config.output_name.as_deref(),
        &config.default_output,
        TEXT_SUFFIX,
    )?;
    let output = config.input_dir.join(file_name);
    write_lines(&output, &extraction.values)?;
    info!(output = %output.display(), values = report.values, "Token addresses written");

    report.output = Some(output);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> TokensConfig {
        TokensConfig {
            input_dir: dir.path().to_path_buf(),
            file_name: "tokens.csv".to_string(),
            column: "token_address".to_string(),
            default_output: "token_addresses".to_string(),
            output_name: None,
            dry_run: false,
        }
    }

    #[test]
    fn writes_values_in_order_and_keeps_input() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(
            dir.path().join("tokens.csv"),
            "id,token_address\n1,\"0xABC\"\n2,0xDEF\n3,0xABC\n",
        )?;

        let mut prompt = |_: &str| -> Result<String> { Ok(String::new()) };
        let report = run_tokens(&config(&dir), &mut prompt)?;

        let output = report.output.expect("output written");
        assert_eq!(output, dir.path().join("token_addresses.txt"));
        assert_eq!(fs::read_to_string(output)?, "0xABC\n0xDEF\n0xABC");
        assert!(dir.path().join("tokens.csv").exists());
        Ok(())
    }

    #[test]
    fn empty_column_writes_nothing_and_does_not_prompt() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("tokens.csv"), "id,token_address\n1,\n")?;

        let mut prompt = |_: &str| -> Result<String> { anyhow::bail!("unexpected prompt") };
        let report = run_tokens(&config(&dir), &mut prompt)?;
        assert_eq!(report.values, 0);
        assert!(report.output.is_none());
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut prompt = |_: &str| -> Result<String> { Ok(String::new()) };
        assert!(run_tokens(&config(&dir), &mut prompt).is_err());
    }

    #[test]
    fn missing_column_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("tokens.csv"), "id,address\n1,0x1\n")?;
        let mut prompt = |_: &str| -> Result<String> { Ok(String::new()) };
        assert!(run_tokens(&config(&dir), &mut prompt).is_err());
        Ok(())
    }
}
