//! CLI argument definitions for Valuora.
//!
//! The CLI walks through the new-project flow: find the company, fill in
//! the wizard, submit the project, and download the valuation.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Ranked ticker search |
//! | `login` / `logout` / `whoami` | Demo session handling |
//! | `wizard` | Create and edit a wizard state file |
//! | `project` | Submit a wizard and generate its valuation |
//! | `historicals` | Historical metrics for a ticker |
//! | `treasury` | Current 10-year treasury rate |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Answer from bundled sample data |
//! | `--api-url` | `VALUORA_API_URL` | Backend base URL |
//! | `--timeout-ms` | `VALUORA_TIMEOUT_MS` | Request timeout in ms |
//! | `--data-dir` | `VALUORA_HOME` | Session and snapshot directory |
//!
//! # Examples
//!
//! ```bash
//! valuora search "micro soft" --format table
//! valuora wizard init shop.json --company SHOP
//! valuora wizard apply shop.json --action '{"type":"add_competitor","symbol":"AMZN"}'
//! valuora project submit shop.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Valuora - company valuation project wizard
#[derive(Debug, Parser)]
#[command(
    name = "valuora",
    author,
    version,
    about = "Company valuation project wizard",
    long_about = "Valuora sets up discounted-cash-flow valuation projects. Search for a \
company, pick four competitors, enter projection assumptions per scenario, then submit \
the project and download the valuation spreadsheet.\n\
\n\
Use 'valuora <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve every request from bundled sample data.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Backend base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Directory holding the session and the last submitted project.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(long, global = true, default_value_t = false, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only.
    #[arg(long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable layout for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the ticker dataset by symbol or company name.
    ///
    /// # Examples
    ///
    ///   valuora search aapl
    ///   valuora search "micro soft" --limit 5
    Search(SearchArgs),

    /// Start a demo session.
    Login(LoginArgs),

    /// End the current session.
    Logout,

    /// Show the current session.
    Whoami,

    /// Create and edit a wizard state file.
    Wizard(WizardArgs),

    /// Submit projects and generate valuations.
    Project(ProjectArgs),

    /// Fetch historical metrics for a ticker.
    Historicals(HistoricalsArgs),

    /// Fetch the current 10-year treasury rate.
    Treasury,
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form search query (symbol or company name).
    pub query: String,

    /// Maximum number of results to return (1-50).
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}

/// Arguments for the `login` command.
#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct WizardArgs {
    #[command(subcommand)]
    pub command: WizardCommand,
}

#[derive(Debug, Subcommand)]
pub enum WizardCommand {
    /// Write a fresh wizard state file.
    Init(WizardInitArgs),

    /// Apply one action to a wizard state file.
    ///
    /// # Examples
    ///
    ///   valuora wizard apply shop.json --action '{"type":"add_competitor","symbol":"EBAY"}'
    ///   valuora wizard apply shop.json --action '{"type":"set_stable","scenario":"base","metric":"revenue_growth","value":8.0}'
    Apply(WizardApplyArgs),

    /// Print a wizard state file.
    Show(WizardFileArgs),

    /// Check whether a wizard state file is ready to submit.
    Check(WizardFileArgs),

    /// Pre-fill the risk-free rate and historicals from remote sources.
    Prefill(WizardFileArgs),
}

#[derive(Debug, Args)]
pub struct WizardFileArgs {
    /// Wizard state file.
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct WizardInitArgs {
    /// Wizard state file to create.
    pub file: PathBuf,

    /// Select this ticker as the company right away.
    #[arg(long)]
    pub company: Option<String>,

    /// Overwrite an existing file.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct WizardApplyArgs {
    /// Wizard state file.
    pub file: PathBuf,

    /// Action as JSON, tagged by `type`.
    #[arg(long)]
    pub action: String,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Validate a wizard file and create the project.
    Submit(WizardFileArgs),

    /// Show the last locally saved project snapshot.
    Last,

    /// Generate and download the valuation of a created project.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project identifier returned by `project submit`.
    pub project_id: String,

    /// Directory the spreadsheet is written to.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

/// Arguments for the `historicals` command.
#[derive(Debug, Args)]
pub struct HistoricalsArgs {
    /// Ticker symbol.
    pub ticker: String,

    /// Number of periods (1-20).
    #[arg(long, default_value_t = 5)]
    pub limit: usize,
}
