use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_category_command, handle_forecast_command, handle_goal_command,
    handle_report_command, handle_transaction_command, CategoryCommands, ForecastCommands,
    GoalCommands, ReportCommands, TransactionCommands,
};
use fintrack::config::{FinTrackPaths, Settings};
use fintrack::logging::init_tracing;
use fintrack::services::FinanceTracker;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker with monthly goals and forecasts",
    long_about = "fintrack records income and expenses, tracks monthly goals, \
                  and reconciles planned (forecast) transactions against the \
                  ones that actually happened."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Monthly goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Forecast, reconciliation and projection commands
    #[command(subcommand)]
    Forecast(ForecastCommands),

    /// Summaries and charts data
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let paths = FinTrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("fintrack - personal finance tracker");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config = command {
        println!("fintrack Configuration");
        println!("======================");
        println!("Base directory: {}", paths.base_dir().display());
        println!("Data directory: {}", paths.data_dir().display());
        println!("Settings file:  {}", paths.settings_file().display());
        println!();
        println!("Settings:");
        println!("  Match tolerance:      {}%", settings.matching.tolerance_percent);
        println!("  History months:       {}", settings.projection.history_months);
        println!("  Projection horizon:   {}", settings.projection.horizon);
        println!("  Recent transitions:   {}", settings.projection.recent_transitions);
        println!(
            "  Weights:              recent {}, older {} ({:?})",
            settings.projection.recent_weight,
            settings.projection.older_weight,
            settings.projection.normalization
        );
        println!("  Forecast name prefix: {:?}", settings.forecast_name_prefix);
        return Ok(());
    }

    let mut tracker = FinanceTracker::open(&paths, settings)?;

    match command {
        Commands::Txn(cmd) => handle_transaction_command(&mut tracker, cmd)?,
        Commands::Category(cmd) => handle_category_command(&mut tracker, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&mut tracker, cmd)?,
        Commands::Forecast(cmd) => handle_forecast_command(&mut tracker, cmd)?,
        Commands::Report(cmd) => handle_report_command(&tracker, cmd)?,
        Commands::Config => {}
    }

    Ok(())
}
