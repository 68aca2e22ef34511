use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use buckwheat_cli::cli::{
    handle_backup_command, handle_settings_command, handle_spend_command, handle_today_command,
    handle_wallet_command, BackupCommands, SettingsCommands, SpendCommands, TodayArgs,
    WalletCommands,
};
use buckwheat_cli::config::{paths::BuckwheatPaths, settings::Settings};
use buckwheat_cli::services::Clock;
use buckwheat_cli::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "buckwheat",
    version,
    about = "Daily allowance budget for the terminal",
    long_about = "Buckwheat splits a budget over the days until a finish date and \
                  tells you how much you can spend today. Leftovers and overspends \
                  are carried into today or spread over the remaining days."
)]
struct Cli {
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, env = "BUCKWHEAT_TODAY")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// How much can be spent today (the default command)
    Today(TodayArgs),

    /// Budget period commands
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Record, delete and list spends
    #[command(subcommand)]
    Spend(SpendCommands),

    /// Currency, redistribution method and display settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Backup management
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Create the data directory and default files
    Init,

    /// Show paths and recent audit entries
    Config {
        /// Number of audit log entries to show
        #[arg(short, long, default_value_t = 0)]
        audit: usize,
    },
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = BuckwheatPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let clock = Clock::from_override(cli.today);

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        None => handle_today_command(&storage, &settings, &clock, TodayArgs::default())?,
        Some(Commands::Today(args)) => handle_today_command(&storage, &settings, &clock, args)?,
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&storage, &settings, &clock, cmd)?,
        Some(Commands::Spend(cmd)) => handle_spend_command(&storage, &settings, &clock, cmd)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&storage, &settings, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&paths, &settings, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing Buckwheat at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Start a budget with: buckwheat wallet set --budget 3000 --days 30");
        }
        Some(Commands::Config { audit }) => {
            println!("Buckwheat Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Today:            {}", clock.today());

            if audit > 0 {
                println!();
                let entries = storage.audit().read_recent(audit)?;
                if entries.is_empty() {
                    println!("The audit log is empty.");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
    }

    Ok(())
}
