use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xrates::cli::conversion::ConversionInput;
use xrates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Base currency for this run, e.g. "eur"
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for xrates::AppCommand {
    fn from(cmd: Commands) -> xrates::AppCommand {
        match cmd {
            Commands::Home => xrates::AppCommand::Home,
            Commands::Convert { amount, to } => xrates::AppCommand::Convert(ConversionInput {
                amount,
                target: to,
            }),
            Commands::Open { location } => xrates::AppCommand::Open(location),
            Commands::Currency { code } => xrates::AppCommand::Currency(code),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show rates for the base currency
    Home,
    /// Convert an amount from the base currency
    Convert {
        /// Amount in the base currency
        #[arg(default_value_t = 1.0)]
        amount: f64,
        /// Target currency; all targets when omitted
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Open the page at a location, e.g. "/conversion"
    Open { location: String },
    /// Show or change the selected base currency
    Currency { code: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xrates::cli::setup::setup(),
        Some(cmd) => {
            xrates::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.currency.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
