//! Top-level interactive loop.
//!
//! # Responsibility
//! - Present the main menu and dispatch each action to its workflow.
//! - Own the store session: begin before the loop, commit on exit.
//! - Run the SQL echo chooser once at start-up.
//!
//! # Invariants
//! - `dispatch_table` is the only place actions are bound to workflows.
//! - The loop ends exactly when the menu's last action is selected.
//! - A loop that ends in error drops its session, rolling back pending work.

use crate::console::{Console, ConsoleResult};
use crate::db::set_sql_echo;
use crate::menu::{Menu, MenuOption};
use crate::repo::record_store::{RecordStore, SqliteSession};
use crate::workflow::department::{
    add_department, delete_department, list_departments, select_department_from_list,
};
use crate::workflow::student::{
    add_student, delete_student, list_students, select_student_from_list,
};
use crate::workflow::AppResult;
use log::{info, warn};
use rusqlite::Connection;

/// Closed set of main menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainAction {
    AddDepartment,
    AddStudent,
    DeleteDepartment,
    DeleteStudent,
    ListDepartments,
    ListStudents,
    SelectDepartmentFromList,
    SelectStudentFromList,
    Exit,
}

impl MainAction {
    /// Every action in main menu order; `Exit` is last.
    pub const ALL: [MainAction; 9] = [
        Self::AddDepartment,
        Self::AddStudent,
        Self::DeleteDepartment,
        Self::DeleteStudent,
        Self::ListDepartments,
        Self::ListStudents,
        Self::SelectDepartmentFromList,
        Self::SelectStudentFromList,
        Self::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AddDepartment => "Add department",
            Self::AddStudent => "Add student",
            Self::DeleteDepartment => "Delete department",
            Self::DeleteStudent => "Delete student",
            Self::ListDepartments => "List all departments",
            Self::ListStudents => "List all students",
            Self::SelectDepartmentFromList => "Select department from list",
            Self::SelectStudentFromList => "Select student from list",
            Self::Exit => "Exit this application",
        }
    }

    /// Stable identifier for log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddDepartment => "add_department",
            Self::AddStudent => "add_student",
            Self::DeleteDepartment => "delete_department",
            Self::DeleteStudent => "delete_student",
            Self::ListDepartments => "list_departments",
            Self::ListStudents => "list_students",
            Self::SelectDepartmentFromList => "select_department_from_list",
            Self::SelectStudentFromList => "select_student_from_list",
            Self::Exit => "exit",
        }
    }
}

/// Workflow entry point bound to a main menu action.
pub type Workflow<S, C> = fn(&S, &mut C) -> AppResult<()>;

/// Static binding of every non-exit action to its workflow.
pub fn dispatch_table<S: RecordStore, C: Console>() -> [(MainAction, Workflow<S, C>); 8] {
    [
        (MainAction::AddDepartment, add_department::<S, C> as Workflow<S, C>),
        (MainAction::AddStudent, add_student::<S, C> as Workflow<S, C>),
        (MainAction::DeleteDepartment, delete_department::<S, C> as Workflow<S, C>),
        (MainAction::DeleteStudent, delete_student::<S, C> as Workflow<S, C>),
        (MainAction::ListDepartments, list_departments::<S, C> as Workflow<S, C>),
        (MainAction::ListStudents, list_students::<S, C> as Workflow<S, C>),
        (
            MainAction::SelectDepartmentFromList,
            select_department_from_list::<S, C> as Workflow<S, C>,
        ),
        (
            MainAction::SelectStudentFromList,
            select_student_from_list::<S, C> as Workflow<S, C>,
        ),
    ]
}

/// Looks up the workflow bound to `action`.
pub fn resolve<S: RecordStore, C: Console>(action: MainAction) -> Option<Workflow<S, C>> {
    dispatch_table::<S, C>()
        .into_iter()
        .find(|(bound, _)| *bound == action)
        .map(|(_, workflow)| workflow)
}

pub fn main_menu() -> Menu<MainAction> {
    Menu::new(
        "Main menu",
        "Please select one of the following options:",
        MainAction::ALL
            .into_iter()
            .map(|action| MenuOption::new(action.label(), action))
            .collect(),
    )
}

/// Presents `menu` until its last action is chosen, running the bound
/// workflow for every other choice.
pub fn run_menu_loop<S: RecordStore, C: Console>(
    store: &S,
    console: &mut C,
    menu: &Menu<MainAction>,
) -> AppResult<()> {
    let Some(&exit) = menu.last_action() else {
        return Ok(());
    };

    loop {
        let action = menu.prompt(console)?;
        if action == exit {
            return Ok(());
        }

        info!(
            "event=menu_dispatch module=app status=start action={}",
            action.as_str()
        );
        match resolve::<S, C>(action) {
            Some(workflow) => workflow(store, console)?,
            None => {
                warn!(
                    "event=menu_dispatch module=app status=unbound action={}",
                    action.as_str()
                );
                console.write_line("That option is not available.")?;
            }
        }
    }
}

/// Runs the main menu against `store` and commits once the user exits.
pub fn run_session<S: RecordStore, C: Console>(store: S, console: &mut C) -> AppResult<()> {
    run_menu_loop(&store, console, &main_menu())?;
    store.commit()?;
    Ok(())
}

/// Diagnostic level picked once at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlEcho {
    Quiet,
    Statements,
}

pub fn sql_echo_menu() -> Menu<SqlEcho> {
    Menu::new(
        "Diagnostics",
        "Do you want to log every SQL statement?",
        vec![
            MenuOption::new("Suppress SQL statements", SqlEcho::Quiet),
            MenuOption::new("Log all SQL statements", SqlEcho::Statements),
        ],
    )
}

pub fn choose_sql_echo<C: Console>(console: &mut C) -> ConsoleResult<SqlEcho> {
    sql_echo_menu().prompt(console)
}

/// Full interactive program over an open, migrated connection.
pub fn run<C: Console>(conn: &mut Connection, console: &mut C) -> AppResult<()> {
    let echo = choose_sql_echo(console)?;
    set_sql_echo(conn, echo == SqlEcho::Statements);

    let session = SqliteSession::begin(conn)?;
    run_session(session, console)?;
    info!("event=app_exit module=app status=ok");
    Ok(())
}
