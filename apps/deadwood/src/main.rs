use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use deadwood_unused_files::{CheckResult, Config};
use log::{debug, info};
use std::io::{self, BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "deadwood")]
#[command(about = "Find and move aside unused JavaScript/TypeScript files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report files no entry point imports and optionally move them aside
    UnusedFiles(UnusedFilesArgs),
}

#[derive(Debug, Args)]
struct UnusedFilesArgs {
    #[command(flatten)]
    cfg: Config,

    /// Print a JSON report instead of the list (never moves files)
    #[arg(long)]
    json: bool,

    /// Move unused files without asking
    #[arg(long, conflicts_with = "no_move")]
    yes: bool,

    /// Only report, never move files
    #[arg(long)]
    no_move: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::UnusedFiles(args) => {
            let num_threads = rayon::current_num_threads();
            info!("Running unused files check (using {} threads)", num_threads);

            let move_dir = args.cfg.move_dir.clone();
            let result = deadwood_unused_files::run_unused_files_check(args.cfg)?;
            debug!("Found {} unused files", result.unused.len());

            if args.json {
                deadwood_unused_files::print_json_report(&mut stdout, &result)?;
                stdout.flush()?;
                if !result.unused.is_empty() {
                    std::process::exit(1);
                }
                return Ok(());
            }

            if result.unused.is_empty() {
                deadwood_unused_files::print_no_unused_message(&mut stdout)?;
                print_timing(&mut stdout, &result, start, num_threads)?;
                return Ok(());
            }

            deadwood_unused_files::print_unused_files(&mut stdout, &result)?;
            print_timing(&mut stdout, &result, start, num_threads)?;

            let relocate = if args.no_move {
                false
            } else if args.yes {
                true
            } else {
                let stdin = io::stdin();
                deadwood_unused_files::ask_confirmation(&mut stdin.lock(), &mut stdout)?
            };

            if !relocate {
                info!("Leaving unused files in place");
                stdout.flush()?;
                // Non-zero exit to fail CI
                std::process::exit(1);
            }

            let exit_code = move_unused(&mut stdout, &move_dir, &result)?;
            stdout.flush()?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }

            Ok(())
        }
    }
}

fn move_unused<W: Write>(writer: &mut W, move_dir: &str, result: &CheckResult) -> Result<i32> {
    let report = deadwood_unused_files::relocate_files(&result.root, &result.unused, move_dir)?;

    writeln!(
        writer,
        "{} Moved {} files to {}",
        "✓".green().bold(),
        report.moved.len().to_string().cyan(),
        report.destination.display().to_string().blue()
    )?;
    for (path, reason) in &report.failed {
        writeln!(writer, "{} {} ({})", "✗".red().bold(), path, reason.dimmed())?;
    }

    Ok(if report.failed.is_empty() { 0 } else { 1 })
}

fn print_timing<W: Write>(
    writer: &mut W,
    result: &CheckResult,
    start: Instant,
    num_threads: usize,
) -> io::Result<()> {
    writeln!(
        writer,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        start.elapsed().as_millis().to_string().cyan(),
        result.files_analyzed.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    writer.flush()
}
