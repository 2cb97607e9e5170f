use crate::output::with_suffix;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Source of free-text answers, such as the output file name.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Reads answers from standard input. Blocks until a line arrives.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(line)
    }
}

impl<F> Prompt for F
where
    F: FnMut(&str) -> Result<String>,
{
    fn ask(&mut self, question: &str) -> Result<String> {
        self(question)
    }
}

/// Resolves the output file name: an explicit name wins, otherwise the prompt
/// is asked. A blank answer falls back to `default`; `suffix` is appended when
/// missing.
pub fn output_file_name(
    prompt: &mut dyn Prompt,
    explicit: Option<&str>,
    default: &str,
    suffix: &str,
) -> Result<String> {
    let answer = match explicit {
        Some(name) => name.to_string(),
        None => prompt.ask(&format!("Output file name [{}{}]: ", default, suffix))?,
    };
    let answer = answer.trim();
    let name = if answer.is_empty() { default } else { answer };
    Ok(with_suffix(name, suffix))
}
