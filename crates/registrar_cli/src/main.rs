//! Interactive registrar console.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Start logging, open the database and hand stdin/stdout to the core loop.

use clap::Parser;
use log::error;
use registrar_core::db::{open_db, reset_schema};
use registrar_core::{default_log_level, init_logging, run, TextConsole};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "registrar",
    version,
    about = "Maintain departments and students from a text menu"
)]
struct Cli {
    #[arg(
        long,
        env = "REGISTRAR_DB",
        default_value = "registrar.db",
        value_name = "PATH",
        help = "SQLite database file"
    )]
    db: PathBuf,

    #[arg(
        long,
        env = "REGISTRAR_LOG_DIR",
        default_value = "logs",
        value_name = "DIR",
        help = "Directory for rolling log files"
    )]
    log_dir: PathBuf,

    #[arg(
        long,
        env = "REGISTRAR_LOG_LEVEL",
        value_name = "LEVEL",
        help = "trace|debug|info|warn|error (default depends on build mode)"
    )]
    log_level: Option<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Drop and recreate all tables before starting"
    )]
    reset: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = match std::path::absolute(&cli.log_dir) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("cannot resolve log directory `{}`: {err}", cli.log_dir.display());
            return ExitCode::FAILURE;
        }
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {err}");
    }

    let mut conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open database `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };
    if cli.reset {
        if let Err(err) = reset_schema(&mut conn) {
            eprintln!("cannot reset database `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    }

    println!("Starting off");
    let mut console = TextConsole::stdio();
    match run(&mut conn, &mut console) {
        Ok(()) => {
            println!("Ending normally");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("registrar stopped, pending changes discarded: {err}");
            ExitCode::FAILURE
        }
    }
}
