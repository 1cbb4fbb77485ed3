use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cnf_backup::cli::{handle_backup_command, BackupCommands};
use cnf_backup::config::{paths::BackupPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "cnf-backup",
    author = "Kaylee Beyene",
    version,
    about = "Timestamped rolling backups for a single configuration file",
    long_about = "cnf-backup moves a configuration file aside into a backup named \
                  <file>.<YYYYMMDDHHMMSS> and deletes the oldest backups beyond a \
                  retention count."
)]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--verbose`
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let paths = BackupPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("cnf-backup Configuration");
            println!("========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Release count: {}", settings.release_count);
            println!("  Audit enabled: {}", settings.audit_enabled);
        }
        None => {
            println!("cnf-backup - rolling backups for a configuration file");
            println!();
            println!("Run 'cnf-backup --help' for usage information.");
            println!("Run 'cnf-backup run <FILE>' to back up a file.");
        }
    }

    Ok(())
}
