//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use standings_core::pipeline::{
    DivisionOutcome, DivisionReport, GenerateConfig, GenerateReport, PdfPages, ProgressReporter,
    generate_all,
};
use standings_extract::{extract_pdf_rows, parse_matchday};
use standings_shared::{AppConfig, Division, StandingRow, init_config, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Standings: render the latest league tables as static HTML pages.
#[derive(Parser)]
#[command(
    name = "standings",
    version,
    about = "Render the standings tables of the latest matchday reports as static HTML pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./standings.toml, then ~/.standings/standings.toml).
    #[arg(long, global = true, env = "STANDINGS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to `generate`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Row output format for `extract`.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum RowFormat {
    Table,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the standings page of each division from its latest report.
    Generate(GenerateArgs),

    /// Print the standings rows found in a single report PDF.
    Extract {
        /// Report PDF to read.
        pdf: PathBuf,

        /// Output format.
        #[arg(long, default_value = "table")]
        format: RowFormat,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `generate`.
#[derive(Args, Default)]
pub(crate) struct GenerateArgs {
    /// Division to generate (honor or primera); repeatable. Defaults to all.
    #[arg(short, long = "division")]
    pub divisions: Vec<Division>,

    /// Root directory holding one report directory per division.
    #[arg(long)]
    pub docs_dir: Option<String>,

    /// Badge image directory.
    #[arg(long)]
    pub img_dir: Option<String>,

    /// Output directory for the HTML pages.
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize the user config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "standings=info",
        1 => "standings=debug",
        _ => "standings=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        None => cmd_generate(config_path, GenerateArgs::default()),
        Some(Command::Generate(args)) => cmd_generate(config_path, args),
        Some(Command::Extract { pdf, format }) => cmd_extract(&pdf, &format),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_generate(config_path: Option<&Path>, args: GenerateArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);

    let generate = GenerateConfig::from(&config).only(&args.divisions);

    info!(
        docs_dir = %generate.docs_dir.display(),
        output_dir = %generate.output_dir.display(),
        divisions = generate.divisions.len(),
        "generating standings"
    );

    let reporter = CliProgress::new();
    let report = generate_all(&generate, &PdfPages, &reporter);

    println!();
    for division in &report.divisions {
        println!("  {}", summary_line(division));
    }
    println!("  Time: {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

/// CLI flags override config file values.
fn apply_overrides(config: &mut AppConfig, args: &GenerateArgs) {
    if let Some(dir) = &args.docs_dir {
        config.paths.docs_dir = dir.clone();
    }
    if let Some(dir) = &args.img_dir {
        config.paths.img_dir = dir.clone();
    }
    if let Some(dir) = &args.out {
        config.paths.output_dir = dir.clone();
    }
}

fn summary_line(report: &DivisionReport) -> String {
    let division = report.division.slug();
    match &report.outcome {
        DivisionOutcome::Written {
            path,
            matchday,
            teams,
        } => format!(
            "{division:<8} written    Jornada {matchday}, {teams} teams -> {}",
            path.display()
        ),
        DivisionOutcome::Unchanged {
            path,
            matchday,
            teams,
        } => format!(
            "{division:<8} unchanged  Jornada {matchday}, {teams} teams -> {}",
            path.display()
        ),
        DivisionOutcome::Skipped { reason } => format!("{division:<8} skipped    {reason}"),
        DivisionOutcome::Failed { error } => format!("{division:<8} failed     {error}"),
    }
}

fn cmd_extract(pdf: &Path, format: &RowFormat) -> Result<()> {
    if !pdf.is_file() {
        return Err(eyre!("'{}' is not a file", pdf.display()));
    }

    let matchday = pdf
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(parse_matchday);
    info!(pdf = %pdf.display(), ?matchday, "extracting standings rows");

    let rows = extract_pdf_rows(pdf)?;

    match format {
        RowFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        RowFormat::Table => print_rows(&rows, matchday),
    }

    Ok(())
}

fn print_rows(rows: &[StandingRow], matchday: Option<u32>) {
    if let Some(n) = matchday {
        println!("Jornada {n}");
    }
    let width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Equipo".len());

    println!(
        "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>4} {:>4} {:>5} {:>5} {:>5} {:>4}",
        "#", "Equipo", "PJ", "PG", "PP", "JF", "JC", "TF", "TC", "Dif", "Pts"
    );
    for r in rows {
        // Names can carry layout line breaks.
        let name = r.name.split_whitespace().collect::<Vec<_>>().join(" ");
        println!(
            "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>4} {:>4} {:>5} {:>5} {:>5} {:>4}",
            r.position,
            name,
            r.played,
            r.won,
            r.lost,
            r.games_for,
            r.games_against,
            r.points_for,
            r.points_against,
            r.diff,
            r.total
        );
    }
    println!("{} teams", rows.len());
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config: AppConfig = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn division_done(&self, report: &DivisionReport) {
        self.spinner
            .set_message(format!("{} done", report.division.display_name()));
    }

    fn done(&self, _report: &GenerateReport) {
        self.spinner.finish_and_clear();
    }
}
