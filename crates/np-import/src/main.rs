//! np-import - Main entry point

use clap::Parser;
use np_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use np_import::Cli;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(command) = cli.command.as_ref() else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    let (level, directives) = if cli.verbose {
        (LogLevel::Debug, "np_import=debug,np_server=debug,sqlx=info")
    } else {
        (LogLevel::Info, "sqlx=warn")
    };
    // stdout carries --dry-run records
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Stderr)
        .log_file_prefix("np-import")
        .filter_directives(directives)
        .build();

    // Environment settings win; the importer still runs if logging can't start
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = np_import::commands::run(&cli, command).await {
        error!(error = %e, "Import failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
