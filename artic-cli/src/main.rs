mod cli;
mod commands;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::io::Write;

use anyhow::Context;
use artic_lib::SelectionController;
use artic_lib::TransportError;
use clap::Parser;
use simplelog::Config;
use simplelog::WriteLogger;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::cli::Cli;
use crate::commands::Command;
use crate::commands::Flow;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let client = cli.client().context("Failed to build HTTP client")?;
    let controller = SelectionController::new(client, cli.browser_config());
    log::info!(
        "browsing {} with {} artworks per page",
        cli.base_url,
        controller.page_size()
    );

    println!("Art Institute of Chicago - Artworks");
    run(&controller, Command::Page(1)).await;
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match commands::parse(&line) {
            Ok(Some(command)) => {
                if let Flow::Quit = run(&controller, command).await {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => println!("{}", message),
        }
    }

    log::info!("session ended with {} selected", controller.selected_count().await);
    Ok(())
}

/// Runs one command; fetch errors are reported and the session goes on.
async fn run(controller: &SelectionController, command: Command) -> Flow {
    match commands::execute(controller, command).await {
        Ok(flow) => flow,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", error_message(&e));
            Flow::Continue
        }
    }
}

fn error_message(e: &TransportError) -> String {
    if e.is_retryable() {
        format!("error: {} (temporary, try again)", e)
    } else {
        format!("error: {}", e)
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.clone().or_else(paths::log_file) else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let log_file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;
    Ok(())
}
