use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use mensaplan_store::SettingKey;

mod cli;

/// mensaplan - canteen meal plan with persistent filters
#[derive(Parser)]
#[command(name = "mensaplan")]
#[command(about = "Shows the canteen meal plan narrowed by your filters", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the meals of a day that pass the active filters
    Show {
        /// Day to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Number of days to move from the chosen date, may be negative
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        offset: i32,
    },
    /// List every filter grouped by filter group
    Filters,
    /// Flip a filter on or off
    Toggle { code: String },
    /// Switch a filter on
    Activate { code: String },
    /// Switch a filter off
    Deactivate { code: String },
    /// Change a setting
    Setting {
        key: SettingKey,
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
    /// Select the scope (city); cycles to the next one when omitted
    Scope { code: Option<String> },
    /// Remove all persisted state
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mensaplan::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mensaplan::observability::init_observability(
        "mensaplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Show { date, offset } => cli::show::show(config, date, offset).await,
        Commands::Filters => cli::show::filters(config).await,
        Commands::Toggle { code } => cli::filter::change(config, cli::filter::Change::Toggle, code).await,
        Commands::Activate { code } => {
            cli::filter::change(config, cli::filter::Change::Activate, code).await
        }
        Commands::Deactivate { code } => {
            cli::filter::change(config, cli::filter::Change::Deactivate, code).await
        }
        Commands::Setting { key, value } => cli::settings::set(config, key, value).await,
        Commands::Scope { code } => cli::settings::scope(config, code).await,
        Commands::Reset => cli::settings::reset(config),
    }
}
