//! Vigil interactive CLI.
//!
//! Usage:
//!   vigil
//!   vigil --config vigil.toml
//!   vigil --data-dir ./mock_data
//!
//! Reads one issue description per line, routes it to a specialist agent,
//! and prints the streamed orchestrator commentary followed by the
//! specialist's report. The literal input `quit` exits with code 0; ctrl-c
//! or ctrl-d ends the session as well. The conversation thread is released
//! on every exit path.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vigil_orchestrator::{Orchestrator, OrchestratorConfig, Session};

const PROMPT: &str = "Enter issue or event to analyze (or 'quit' to exit): ";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,vigil_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut data_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vigil datacenter monitoring orchestrator");
                println!();
                println!("Usage: vigil [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>    Path to config TOML file");
                println!("  -d, --data-dir <DIR>   Directory with the sensor CSV files");
                println!("  -h, --help             Show this help message");
                println!();
                println!("Environment variables:");
                println!("  FOUNDRY_API_KEY        API key for the foundry provider");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = if let Some(path) = config_path {
        tracing::info!(path = %path, "Loading configuration");
        OrchestratorConfig::from_file(&path)?
    } else {
        OrchestratorConfig::default()
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    let orchestrator = Orchestrator::new(&config)?;
    let mut session = orchestrator.open_session();

    println!(
        "{}",
        "Vigil datacenter orchestrator. Describe an issue to route it to a specialist."
            .bright_cyan()
    );

    let result = run_loop(&orchestrator, &mut session).await;

    // Thread release happens on every exit path, including errors.
    session.close().await;
    result
}

async fn run_loop(orchestrator: &Orchestrator, session: &mut Session) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        println!();

        // Readline blocks, so it runs off the async workers.
        let (returned, line) =
            tokio::task::spawn_blocking(move || {
                let result = editor.readline(PROMPT);
                (editor, result)
            })
            .await?;
        editor = returned;

        let issue = match line {
            Ok(text) => text,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\n{}", "[Orchestrator] Shutting down...".bright_cyan());
                return Ok(());
            }
            Err(e) => {
                return Err(anyhow::anyhow!("input error: {e}"));
            }
        };

        let issue = issue.trim();
        if issue.is_empty() {
            continue;
        }
        if issue.eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        let _ = editor.add_history_entry(issue);
        println!("\n{} Analyzing: {issue}", "[Orchestrator]".bright_cyan());

        // A ctrl-c mid-turn abandons the in-flight streamed response and
        // ends the session.
        let outcome = tokio::select! {
            outcome = orchestrator.respond(session, issue, |chunk| {
                print!("{chunk}");
                let _ = std::io::stdout().flush();
            }) => outcome,
            _ = tokio::signal::ctrl_c() => {
                println!("\n{}", "[Orchestrator] Interrupted, shutting down...".bright_cyan());
                return Ok(());
            }
        };
        println!();

        if outcome.key.is_routable() {
            println!(
                "{} Routing to {} agent...",
                "[Orchestrator]".bright_cyan(),
                outcome.key
            );
            let label = outcome
                .report
                .agent
                .clone()
                .unwrap_or_else(|| outcome.key.to_string());
            println!(
                "{} Agent response:\n{} {}",
                "[Orchestrator]".bright_cyan(),
                format!("[{label}]").bright_green(),
                outcome.report.content
            );
        } else {
            println!(
                "{} Could not determine appropriate agent for this issue.",
                "[Orchestrator]".bright_cyan()
            );
        }
    }
}
