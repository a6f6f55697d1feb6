use anyhow::Result;
use clap::Parser;
use log::error;

use ctxcli::cli::OutputFormatter;
use ctxcli::{Cli, CommandHandler};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging - only show errors unless verbose
    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Error
        })
        .init();

    // Config and contexts must be in place before any command runs
    let mut handler = match CommandHandler::new() {
        Ok(h) => h,
        Err(e) => {
            error!("Failed to initialize config: {e}");
            println!("{}", OutputFormatter::for_stdout().format_error(&e.to_string()));
            std::process::exit(1);
        }
    };

    for notice in handler.notices() {
        println!("{notice}");
    }

    match cli.command {
        Some(command) => match handler.handle_command(command).await {
            Ok(output) => println!("{output}"),
            Err(e) => {
                error!("Command failed: {e}");
                println!("{}", handler.format_error(&e.to_string()));
                std::process::exit(1);
            }
        },
        None => println!("{}", handler.usage()),
    }

    Ok(())
}
