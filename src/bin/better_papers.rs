//! Better Papers CLI - LaTeX cleanup for research-paper titles and abstracts

#[cfg(feature = "cli")]
use better_papers::{
    format_error_bounds, segment_with,
    utils::{residue_diagnostics, residue_metrics, DiagnosticSeverity},
    Normalizer, NormalizerConfig,
};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "cli")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "cli")]
use tracing_subscriber::{EnvFilter, Layer};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "better-papers")]
#[command(version)]
#[command(about = "Better Papers - readable research-paper titles and abstracts", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// TOML file with extra known-exception entries
    /// (defaults to $BETTER_PAPERS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Flatten LaTeX markup to readable text
    Normalize {
        /// Input file (reads from stdin if not provided)
        input: Option<String>,

        /// Treat every line as its own text
        #[arg(short, long)]
        lines: bool,
    },

    /// Split text into plain and math segments (JSON)
    Segment {
        /// Input file (reads from stdin if not provided)
        input: Option<String>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Format error-bound residues such as `0.5(-0.1)^+0.2`
    Bounds {
        /// Input file (reads from stdin if not provided)
        input: Option<String>,
    },

    /// Normalize and report markup left in the result
    Check {
        /// Input file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Fetch papers from the listing backend and print them cleaned up
    #[cfg(feature = "client")]
    Fetch {
        /// Category to fetch (all categories when omitted)
        #[arg(short, long)]
        category: Option<String>,

        /// Backend base URL (defaults to $BETTER_PAPERS_API_URL)
        #[arg(long)]
        api: Option<String>,

        /// Only keep papers published within this many days
        #[arg(long)]
        days: Option<i64>,

        /// Print prepared papers as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = NormalizerConfig::resolve(cli.config.as_deref())?;
    let normalizer = Normalizer::with_config(&config)?;
    tracing::debug!(exceptions = normalizer.exceptions().len(), "normalizer ready");

    let (result, clean) = handle_subcommand(cli.command, &normalizer)?;
    write_output(cli.output.as_deref(), &result)?;

    // residue left by `check`
    if !clean {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    tracing_subscriber::registry().with(stderr_layer).init();
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, result: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", result);
        }
    }
    Ok(())
}

/// Run a subcommand. Returns its output and whether the input was clean
/// (only `check` can report otherwise).
#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands, normalizer: &Normalizer) -> io::Result<(String, bool)> {
    let output = match cmd {
        Commands::Normalize { input, lines } => {
            let input = read_input(input.as_deref())?;
            if lines {
                input
                    .lines()
                    .map(|line| normalizer.normalize(line))
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                normalizer.normalize(&input)
            }
        }

        Commands::Segment { input, pretty } => {
            let input = read_input(input.as_deref())?;
            let segments = segment_with(normalizer, &input);
            let json = if pretty {
                serde_json::to_string_pretty(&segments)
            } else {
                serde_json::to_string(&segments)
            };
            json.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
        }

        Commands::Bounds { input } => {
            let input = read_input(input.as_deref())?;
            format_error_bounds(&input)
        }

        Commands::Check { input, no_color } => {
            let input = read_input(input.as_deref())?;
            let cleaned = normalizer.normalize(&input);
            let diagnostics = residue_diagnostics(&cleaned);

            if diagnostics.is_empty() {
                eprintln!("✓ No markup left after normalization");
                return Ok((cleaned, true));
            }

            for diag in &diagnostics {
                if no_color {
                    eprintln!("{}", diag);
                } else {
                    eprintln!("{}{}\x1b[0m", diag.color_code(), diag);
                }
            }

            let has_errors = diagnostics
                .iter()
                .any(|d| d.severity == DiagnosticSeverity::Error);
            if has_errors {
                let metrics = residue_metrics(&cleaned);
                eprintln!(
                    "✗ {} command(s), {} brace(s), {} dollar sign(s) left",
                    metrics.commands, metrics.braces, metrics.dollars
                );
            }
            return Ok((cleaned, !has_errors));
        }

        #[cfg(feature = "client")]
        Commands::Fetch {
            category,
            api,
            days,
            json,
        } => fetch::run(normalizer, category, api, days, json)?,
    };
    Ok((output, true))
}

#[cfg(all(feature = "cli", feature = "client"))]
mod fetch {
    use better_papers::{
        client::ApiClient, prepare_grouped, recent_since, window_start, Normalizer, PaperView,
        PapersByCategory,
    };
    use chrono::Utc;
    use std::io;

    pub fn run(
        normalizer: &Normalizer,
        category: Option<String>,
        api: Option<String>,
        days: Option<i64>,
        json: bool,
    ) -> io::Result<String> {
        let cutoff = match days {
            Some(d) => Some(window_start(Utc::now(), d).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("--days {} is out of range", d),
                )
            })?),
            None => None,
        };

        let client = match api {
            Some(url) => ApiClient::new(url)?,
            None => ApiClient::from_env()?,
        };

        let categories = match category {
            Some(category) => vec![category],
            None => client.categories()?,
        };

        let mut grouped = PapersByCategory::new();
        for category in categories {
            let papers = client.papers(&category)?;
            let papers = match cutoff {
                Some(cutoff) => recent_since(&papers, cutoff),
                None => papers,
            };
            tracing::info!(category = %category, papers = papers.len(), "fetched");
            grouped.insert(category, papers);
        }

        let prepared = prepare_grouped(normalizer, &grouped);
        if json {
            return serde_json::to_string_pretty(&prepared)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        }

        let mut out = String::new();
        for (category, views) in &prepared {
            out.push_str(&format!("== {} ({}) ==\n", category, views.len()));
            for view in views {
                out.push_str(&format_view(view));
            }
        }
        Ok(out.trim_end().to_string())
    }

    fn format_view(view: &PaperView) -> String {
        let mut out = format!("\n{}\n", view.title_text);
        if !view.authors.is_empty() {
            out.push_str(&format!("  {}\n", view.authors.join(", ")));
        }
        if let Some(date) = view.published.get(..10) {
            out.push_str(&format!("  {}\n", date));
        }
        if !view.link.is_empty() {
            out.push_str(&format!("  {}\n", view.link));
        }
        out.push_str(&format!("\n  {}\n", view.summary));
        out
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install better-papers --features cli");
    eprintln!("  better-papers [OPTIONS] <COMMAND> [INPUT]");
}
