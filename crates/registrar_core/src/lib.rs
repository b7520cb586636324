//! Core logic for the registrar console.
//!
//! Menus, record workflows and the store session live here; the binary only
//! wires configuration, logging and stdin/stdout to `app::run`.

pub mod app;
pub mod console;
pub mod db;
pub mod logging;
pub mod menu;
pub mod model;
pub mod repo;
pub mod workflow;

pub use app::{dispatch_table, main_menu, run, run_menu_loop, run_session, MainAction, SqlEcho};
pub use console::{Console, ConsoleError, ConsoleResult, TextConsole};
pub use logging::{default_log_level, init_logging, logging_status};
pub use menu::{InvalidSelection, Menu, MenuOption};
pub use model::department::Department;
pub use model::student::{Student, StudentId};
pub use model::{Entity, FieldValue, Filter, UniqueConstraint, ValidationError};
pub use repo::record_store::{RecordStore, RepoError, RepoResult, SqliteSession};
pub use workflow::{AppError, AppResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
