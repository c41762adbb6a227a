//! A terminal front end for the retrieval-augmented backend.

#[macro_use]
extern crate tracing;

mod cli;

use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use rag_console::core::proto::{QueryRequest, ServiceStatus};
use rag_console::core::{ChatController, PromptController, SubmitError};
use rag_console::{Console, ConsoleBuilder, TerminalSurface};
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut builder = ConsoleBuilder::with_base_url(&cli.base_url)
        .with_surface(TerminalSurface::new());
    if let Some(timeout) = cli.timeout() {
        builder = builder.with_timeout(timeout);
    }
    let console = builder.build();
    info!("using backend at {}", console.base_url());

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(console.chat()).await,
        Command::Prompt { text: Some(text) } => {
            exit_code(console.prompt().submit(&text).await)
        }
        Command::Prompt { text: None } => run_prompts(console.prompt()).await,
        Command::Query(args) => {
            let request = QueryRequest::from(args);
            exit_code(console.query().submit(&request).await)
        }
        Command::Health => run_health(&console).await,
    }
}

async fn run_chat(controller: ChatController) -> ExitCode {
    let mut lines = stdin_lines();
    println!(
        "{}",
        "Type a message. /history shows the conversation, /quit exits."
            .bright_black()
    );

    loop {
        let Some(line) = prompt_line(&mut lines).await else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/history" => controller.render(),
            input => {
                if let Err(err) = controller.submit(input).await {
                    debug!("submission failed: {err}");
                }
            }
        }
    }
    ExitCode::SUCCESS
}

async fn run_prompts(controller: PromptController) -> ExitCode {
    let mut lines = stdin_lines();
    while let Some(line) = prompt_line(&mut lines).await {
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }
        if let Err(err) = controller.submit(&line).await {
            debug!("submission failed: {err}");
        }
    }
    ExitCode::SUCCESS
}

async fn run_health(console: &Console) -> ExitCode {
    match console.health().await {
        Ok(status) => {
            print_status(&status);
            if status.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("{} {err}", "unhealthy:".bright_red());
            ExitCode::FAILURE
        }
    }
}

fn print_status(status: &ServiceStatus) {
    let service = status.service.as_deref().unwrap_or("backend");
    let state = status.status.as_deref().unwrap_or("unknown");
    if status.is_ok() {
        println!("{} {}", service.bold(), state.bright_green());
    } else {
        println!("{} {}", service.bold(), state.bright_yellow());
    }
    for (name, target) in &status.dependencies {
        println!("  {name}: {}", target.bright_black());
    }
}

/// Exit code for input that was rejected before anything was sent.
const EXIT_USAGE: u8 = 2;

fn exit_code<T>(result: Result<T, SubmitError>) -> ExitCode {
    // Errors have already been shown on the surface.
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) if err.is_rejected_locally() => {
            debug!("submission rejected: {err}");
            ExitCode::from(EXIT_USAGE)
        }
        Err(err) => {
            debug!("submission failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(io::stdin()).lines()
}

async fn prompt_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    print!("> ");
    std::io::stdout().flush().ok();

    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use rag_console::core::proto::ErrorKind;

    use super::*;

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(Ok(())), ExitCode::SUCCESS);
        assert_eq!(
            exit_code::<()>(Err(SubmitError::EmptyInput)),
            ExitCode::from(EXIT_USAGE)
        );
        assert_eq!(
            exit_code::<()>(Err(SubmitError::Busy)),
            ExitCode::from(EXIT_USAGE)
        );
        assert_eq!(
            exit_code::<()>(Err(SubmitError::Transport {
                kind: ErrorKind::Connect,
                message: "refused".to_owned(),
            })),
            ExitCode::FAILURE
        );
    }
}
