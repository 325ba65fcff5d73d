//! Process entry point for the task store HTTP server.
//!
//! # Responsibility
//! - Bootstrap logging and the embedded database, then serve requests.
//! - Keep all runtime configuration as compile-time constants; the
//!   service takes no flags and reads no environment variables.

use std::error::Error;
use std::net::SocketAddr;
use std::process::ExitCode;

use taskstore_core::db::open_db;
use taskstore_core::{default_log_level, init_logging};
use taskstore_server::{start_server, state::AppState};

const DB_FILE_NAME: &str = "todo.db";
const LOG_DIR_NAME: &str = "logs";
const BIND_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskstore: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::current_dir()?.join(LOG_DIR_NAME);
    init_logging(
        default_log_level(),
        log_dir.to_str().ok_or("log directory path is not UTF-8")?,
    )?;

    let conn = open_db(DB_FILE_NAME)?;
    let addr: SocketAddr = BIND_ADDR.parse()?;

    start_server(AppState::new(conn), addr).await?;
    Ok(())
}
