use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over a batch of input files. Drawn on stderr only when it is a terminal.
pub fn file_progress(total: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "    {{spinner:.cyan}} {label:<10} [{{bar:30.cyan/blue}}] {{pos}}/{{len}} files {{msg}}"
            ))
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}
