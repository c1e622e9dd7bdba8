use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "deepcheck", version, about = "LLM-backed static analysis for Java source")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Analyze a Java source file and print the report
    Analyze(AnalyzeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port (overrides config and PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides config and HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Java source file to analyze
    pub file: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use the offline demo generator instead of the API
    #[arg(long)]
    pub demo: bool,

    /// Print the raw JSON result
    #[arg(long)]
    pub json: bool,

    /// Skip security checks
    #[arg(long)]
    pub no_security: bool,

    /// Skip performance checks
    #[arg(long)]
    pub no_performance: bool,

    /// Skip bug checks
    #[arg(long)]
    pub no_bugs: bool,

    /// Skip style checks
    #[arg(long)]
    pub no_style: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
