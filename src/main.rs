//! CLI entry point for `mboxreport`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mboxreport::analyzer::Analyzer;
use mboxreport::model::report::Report;
use mboxreport::report::{csv, json, markdown, summary};

#[derive(Parser)]
#[command(
    name = "mboxreport",
    version,
    about = "Analyze MBOX email archives and generate statistical reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// MBOX file to analyze (report JSON goes to stdout)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an MBOX file and write a JSON report
    Analyze {
        path: PathBuf,
        /// Path for the JSON report (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write a Markdown summary next to the JSON report
        #[arg(long)]
        markdown: bool,
        /// Also write a CSV report next to the JSON report
        #[arg(long)]
        csv: bool,
        /// Print a text summary after the analysis
        #[arg(short, long)]
        summary: bool,
    },
    /// Print a text summary of an MBOX file
    Summary {
        path: PathBuf,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mboxreport::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Some(Commands::Analyze {
            path,
            output,
            markdown,
            csv,
            summary,
        }) => cmd_analyze(
            &path,
            output.as_deref(),
            markdown,
            csv,
            summary,
            &config,
        ),
        Some(Commands::Summary { path }) => cmd_summary(&path, &config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
        None => {
            if let Some(path) = cli.file {
                cmd_analyze(&path, None, false, false, false, &config)
            } else {
                eprintln!("No MBOX file given. Try 'mboxreport --help'.");
                Ok(())
            }
        }
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &mboxreport::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = mboxreport::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mboxreport.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mboxreport", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Run the archive pass with a progress bar.
fn run_analysis(path: &Path, config: &mboxreport::config::Config) -> anyhow::Result<Report> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let analyzer =
        Analyzer::open(path)?.with_max_message_size(config.performance.max_message_size);

    let pb = ProgressBar::new(analyzer.file_size());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} Analyzing [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
            )
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let report = analyzer.analyze(Some(&|current, total| {
        pb.set_length(total);
        pb.set_position(current);
    }))?;

    pb.finish_and_clear();
    Ok(report)
}

/// Analyze an MBOX file and write/print reports.
fn cmd_analyze(
    path: &Path,
    output: Option<&Path>,
    write_markdown: bool,
    write_csv: bool,
    print_summary: bool,
    config: &mboxreport::config::Config,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let report = run_analysis(path, config)?;
    let elapsed = start.elapsed();

    match output {
        Some(json_path) => {
            let json_path = resolve_output(json_path, config);
            json::write_json(&report, &json_path)?;

            if write_markdown {
                let md_path = json_path.with_extension("md");
                markdown::write_markdown(&report, &md_path)?;
            }
            if write_csv {
                let csv_path = json_path.with_extension("csv");
                csv::write_csv(&report, &csv_path)?;
            }

            print_stats_table(path, &report, elapsed);
        }
        None => {
            // No output file: the JSON report goes to stdout
            println!("{}", json::render_json(&report)?);

            if write_markdown || write_csv {
                anyhow::bail!("--markdown/--csv require --output");
            }
        }
    }

    if print_summary {
        println!();
        println!("{}", summary::render_summary(&report));
    }

    Ok(())
}

/// Print a text summary of an MBOX file.
fn cmd_summary(path: &Path, config: &mboxreport::config::Config) -> anyhow::Result<()> {
    let report = run_analysis(path, config)?;
    println!("{}", summary::render_summary(&report));
    Ok(())
}

/// Place relative output paths into the configured output directory.
fn resolve_output(path: &Path, config: &mboxreport::config::Config) -> PathBuf {
    match &config.report.default_output_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Print key statistics in a human-readable table.
fn print_stats_table(path: &Path, report: &Report, elapsed: std::time::Duration) {
    use humansize::{format_size, BINARY};

    let stats = &report.statistics;

    println!();
    println!("  {:<20} {}", "File", path.display());
    if let Some(size) = report.file_metadata.file_size {
        println!("  {:<20} {}", "File size", format_size(size, BINARY));
    }
    if let Some(count) = report.file_metadata.email_count {
        println!("  {:<20} {count}", "Messages");
    }
    if let Some(dates) = &stats.date_distribution {
        println!(
            "  {:<20} {} — {}",
            "Date range", dates.first_month, dates.last_month
        );
    }
    if let Some(attachments) = &stats.attachments {
        println!(
            "  {:<20} {} ({} types)",
            "Attachments", attachments.total_count, attachments.unique_types
        );
    }
    println!("  {:<20} {elapsed:.2?}", "Analysis time");

    if let Some(senders) = &stats.senders {
        println!();
        println!("  Top senders:");
        for entry in &senders.top_senders {
            println!("    {:>6}  {}", entry.count, entry.address);
        }
    }
    println!();
}
