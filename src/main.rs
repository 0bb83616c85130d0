use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{DriverConcurrency, load_config};

/// The main entry point for the nsgate command-line tool.
fn main() -> anyhow::Result<()> {
    // The password is usually provided through .env; a missing file is fine.
    dotenvy::dotenv().ok();
    configuration::init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => handle_check(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Inspect the connection settings a database session would be established with.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file, then print the resolved settings.
    Check(CheckArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the TOML configuration file (NSGATE__* variables override it).
    #[arg(long, default_value = "nsgate.toml")]
    config: String,
}

// ==============================================================================
// Check Command Logic
// ==============================================================================

fn handle_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("failed to load configuration from '{}'", args.config))?;
    let connection = &config.connection;

    let timeout = match config.query.default_timeout() {
        Some(timeout) => format!("{} ms", timeout.as_millis()),
        None => "none (wait for the driver)".to_string(),
    };
    let concurrency = match config.query.concurrency {
        DriverConcurrency::Serialized => "serialized (one driver call at a time)",
        DriverConcurrency::Concurrent => "concurrent",
    };

    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["endpoint", connection.endpoint()]);
    table.add_row(vec!["namespace", connection.namespace()]);
    table.add_row(vec!["database", connection.database()]);
    table.add_row(vec!["username", connection.username()]);
    table.add_row(vec!["password", "********"]);
    table.add_row(vec!["scope", connection.scope().unwrap_or("-")]);
    table.add_row(vec!["default timeout", timeout.as_str()]);
    table.add_row(vec!["concurrency", concurrency]);
    println!("{table}");

    if let Some(scope) = connection.scope() {
        println!(
            "note: scope '{}' requires a driver that supports scoped sign-in; \
             establishing a session with any other driver fails with ScopeUnsupported.",
            scope
        );
    }

    tracing::info!(config = %args.config, "Configuration is valid.");
    Ok(())
}
