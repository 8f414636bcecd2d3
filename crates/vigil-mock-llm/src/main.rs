//! Mock completion service binary.
//!
//! Usage:
//!   vigil-mock-llm
//!   vigil-mock-llm --port 8000
//!   vigil-mock-llm --port 8000 --bind 0.0.0.0

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vigil_mock_llm::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vigil_mock_llm=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut port: u16 = 8000;
    let mut bind_addr: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1]
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Invalid port number: {}", args[i + 1]))?;
                    i += 1;
                }
            }
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_addr = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vigil mock completion service");
                println!();
                println!("Usage: vigil-mock-llm [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --port <PORT>   Port to listen on (default: 8000)");
                println!("  -b, --bind <ADDR>   Bind address (default: 127.0.0.1)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let host = bind_addr.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    vigil_mock_llm::serve(Arc::new(AppState::new()), addr).await
}
