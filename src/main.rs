use addrsift::config;
use addrsift::dedup::{run_wallets, DedupReport, WalletsConfig};
use addrsift::extract::{run_tokens, ExtractReport, TokensConfig};
use addrsift::merge::{run_merge, MergeConfig, MergeReport};
use addrsift::prompt::StdinPrompt;
use addrsift::sources::Removal;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "addrsift")]
#[command(about = "Extract, deduplicate and merge address columns from CSV exports")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory containing the tokens/, wallets/ and merge/ input folders
    #[arg(long, default_value = ".", global = true)]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the address column of the designated token export
    Tokens(TokensArgs),
    /// Extract and deduplicate addresses across every wallet export
    Wallets(WalletsArgs),
    /// Merge every CSV file under a single header
    Merge(MergeArgs),
}

#[derive(Args)]
struct TokensArgs {
    /// Input directory (defaults to <base-dir>/tokens)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Export file inside the input directory
    #[arg(short, long, default_value = config::TOKENS_FILE)]
    file: String,

    /// Column holding the addresses
    #[arg(short, long, default_value = config::TOKEN_COLUMN)]
    column: String,

    /// Output file name; prompts when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Extract and report only, write nothing
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct WalletsArgs {
    /// Input directory (defaults to <base-dir>/wallets)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Column holding the addresses
    #[arg(short, long, default_value = config::WALLET_COLUMN)]
    column: String,

    /// Output file name; prompts when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum addresses per output file
    #[arg(long, default_value_t = config::CHUNK_SIZE)]
    chunk_size: usize,

    /// Do not delete input files after writing
    #[arg(long)]
    keep_inputs: bool,

    /// Extract and report only, write and delete nothing
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct MergeArgs {
    /// Input directory (defaults to <base-dir>/merge)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Output file name; prompts when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Do not delete input files after writing
    #[arg(long)]
    keep_inputs: bool,

    /// Merge and report only, write and delete nothing
    #[arg(long)]
    dry_run: bool,
}

fn resolve_dir(base_dir: &Path, dir: Option<PathBuf>, default: &str) -> PathBuf {
    dir.unwrap_or_else(|| base_dir.join(default))
}

fn print_removal(removal: Removal) {
    if removal.removed > 0 || removal.failed > 0 {
        println!("Inputs removed:     {}", removal.removed);
    }
    if removal.failed > 0 {
        println!("Removal failures:   {}", removal.failed);
    }
}

fn print_tokens_summary(report: &ExtractReport) {
    println!();
    println!("=== Summary ===");
    println!("Addresses:          {}", report.values);
    if report.skipped_lines > 0 {
        println!("Skipped lines:      {}", report.skipped_lines);
    }
    if report.unbalanced_lines > 0 {
        println!("Unbalanced quotes:  {}", report.unbalanced_lines);
    }
    if let Some(ref output) = report.output {
        println!("Written to:         {}", output.display());
    }
}

fn print_wallets_summary(report: &DedupReport) {
    println!();
    println!("=== Summary ===");
    println!("Files read:         {}", report.files);
    println!("Addresses seen:     {}", report.total);
    println!("Unique addresses:   {}", report.unique);
    println!("Duplicates dropped: {}", report.duplicates);
    if report.skipped_lines > 0 {
        println!("Skipped lines:      {}", report.skipped_lines);
    }
    if report.unbalanced_lines > 0 {
        println!("Unbalanced quotes:  {}", report.unbalanced_lines);
    }
    for output in &report.outputs {
        println!("Written to:         {}", output.display());
    }
    print_removal(report.removal);
}

fn print_merge_summary(report: &MergeReport) {
    println!();
    println!("=== Summary ===");
    println!("Files read:         {}", report.files - report.unreadable);
    if report.unreadable > 0 {
        println!("Unreadable files:   {}", report.unreadable);
    }
    println!("Data rows:          {}", report.data_lines);
    if let Some(ref output) = report.output {
        println!("Written to:         {}", output.display());
    }
    print_removal(report.removal);
}

fn run_tokens_cmd(base_dir: &Path, args: TokensArgs) -> Result<()> {
    let config = TokensConfig {
        input_dir: resolve_dir(base_dir, args.dir, config::TOKENS_DIR),
        file_name: args.file,
        column: args.column,
        default_output: config::DEFAULT_TOKENS_OUTPUT.to_string(),
        output_name: args.output,
        dry_run: args.dry_run,
    };
    let report = run_tokens(&config, &mut StdinPrompt)?;
    print_tokens_summary(&report);
    Ok(())
}

fn run_wallets_cmd(base_dir: &Path, args: WalletsArgs) -> Result<()> {
    let config = WalletsConfig {
        input_dir: resolve_dir(base_dir, args.dir, config::WALLETS_DIR),
        column: args.column,
        default_output: config::DEFAULT_WALLETS_OUTPUT.to_string(),
        output_name: args.output,
        chunk_size: args.chunk_size,
        keep_inputs: args.keep_inputs,
        dry_run: args.dry_run,
    };
    let report = run_wallets(&config, &mut StdinPrompt)?;
    print_wallets_summary(&report);
    Ok(())
}

fn run_merge_cmd(base_dir: &Path, args: MergeArgs) -> Result<()> {
    let config = MergeConfig {
        input_dir: resolve_dir(base_dir, args.dir, config::MERGE_DIR),
        default_output: config::DEFAULT_MERGE_OUTPUT.to_string(),
        output_name: args.output,
        keep_inputs: args.keep_inputs,
        dry_run: args.dry_run,
    };
    let report = run_merge(&config, &mut StdinPrompt)?;
    print_merge_summary(&report);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let start = Instant::now();
    let result = match cli.command {
        Commands::Tokens(args) => run_tokens_cmd(&cli.base_dir, args),
        Commands::Wallets(args) => run_wallets_cmd(&cli.base_dir, args),
        Commands::Merge(args) => run_merge_cmd(&cli.base_dir, args),
    };

    match result {
        Ok(()) => {
            info!(
                duration_secs = start.elapsed().as_secs_f64(),
                "Completed successfully"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
