mod common;

use common::{computer_science, scripted, scripted_bytes, transcript, CountingStore};
use registrar_core::db::{open_db, open_db_in_memory};
use registrar_core::{
    run, run_menu_loop, run_session, AppError, ConsoleError, Department, Filter, MainAction, Menu,
    MenuOption, RecordStore, SqliteSession,
};

const ADD_DEPARTMENT: &str = "1";
const LIST_DEPARTMENTS: &str = "5";
const EXIT: &str = "9";

const ELECTRICAL: [&str; 6] = [
    "Electrical Engineering",
    "EE",
    "Nikola Tesla",
    "Tesla Hall",
    "200",
    "Circuits and signals",
];

const MATHEMATICS: [&str; 6] = [
    "Mathematics",
    "MATH",
    "Emmy Noether",
    "Watson",
    "205",
    "Structures and symmetry",
];

#[test]
fn quit_on_first_prompt_runs_no_workflow() {
    let mut conn = open_db_in_memory().unwrap();
    let store = CountingStore::new(SqliteSession::begin(&mut conn).unwrap());
    let menu = Menu::new(
        "Main menu",
        "Please select one of the following options:",
        vec![
            MenuOption::new("Add department", MainAction::AddDepartment),
            MenuOption::new("List departments", MainAction::ListDepartments),
            MenuOption::new("Quit", MainAction::Exit),
        ],
    );
    let mut console = scripted(&["3"]);

    run_menu_loop(&store, &mut console, &menu).unwrap();

    assert_eq!(store.inserts(), 0);
    assert_eq!(store.counts(), 0);
    let output = transcript(&console);
    assert_eq!(output.matches("3: Quit").count(), 1);
    assert!(!output.contains("No departments on file."));
}

#[test]
fn exit_is_whatever_the_last_option_is() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    let menu = Menu::new(
        "Short menu",
        "Pick one:",
        vec![
            MenuOption::new("List departments", MainAction::ListDepartments),
            MenuOption::new("Done", MainAction::AddStudent),
        ],
    );
    let mut console = scripted(&["1", "2"]);

    run_menu_loop(&store, &mut console, &menu).unwrap();

    let output = transcript(&console);
    assert!(output.contains("No departments on file."));
    assert!(!output.contains("Student last name --> "));
}

#[test]
fn session_commits_on_exit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registrar.db");

    {
        let mut conn = open_db(&path).unwrap();
        let mut answers = vec![ADD_DEPARTMENT];
        answers.extend(ELECTRICAL);
        answers.extend([LIST_DEPARTMENTS, EXIT]);
        let mut console = scripted(&answers);

        run_session(SqliteSession::begin(&mut conn).unwrap(), &mut console).unwrap();

        let output = transcript(&console);
        assert!(output.contains("Added department EE."));
        assert!(output.contains("Department: Electrical Engineering (EE)"));
    }

    let mut conn = open_db(&path).unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    assert_eq!(store.count_matching::<Department>(&Filter::new()).unwrap(), 1);
}

#[test]
fn closed_input_aborts_session_without_committing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registrar.db");

    {
        let mut conn = open_db(&path).unwrap();
        let mut answers = vec![ADD_DEPARTMENT];
        answers.extend(ELECTRICAL);
        let mut console = scripted(&answers);

        let err = run_session(SqliteSession::begin(&mut conn).unwrap(), &mut console).unwrap_err();
        assert!(matches!(err, AppError::Console(ConsoleError::InputClosed)));
    }

    let mut conn = open_db(&path).unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    assert_eq!(store.count_matching::<Department>(&Filter::new()).unwrap(), 0);
}

#[test]
fn undecodable_line_is_reprompted_and_pending_work_survives() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registrar.db");

    {
        let mut conn = open_db(&path).unwrap();
        let mut input = Vec::new();
        for line in [ADD_DEPARTMENT].iter().chain(&ELECTRICAL) {
            input.extend_from_slice(line.as_bytes());
            input.push(b'\n');
        }
        input.extend_from_slice(b"1\nCaf\xe9\n");
        for line in MATHEMATICS.iter().chain(&[EXIT]) {
            input.extend_from_slice(line.as_bytes());
            input.push(b'\n');
        }
        let mut console = scripted_bytes(&input);

        run_session(SqliteSession::begin(&mut conn).unwrap(), &mut console).unwrap();

        let output = transcript(&console);
        assert_eq!(
            output
                .matches("That line is not valid text.  Try again.")
                .count(),
            1
        );
        assert!(output.contains("Added department EE."));
        assert!(output.contains("Added department MATH."));
    }

    let mut conn = open_db(&path).unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    assert_eq!(store.count_matching::<Department>(&Filter::new()).unwrap(), 2);
}

#[test]
fn run_asks_for_sql_echo_once_then_serves_main_menu() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let store = SqliteSession::begin(&mut conn).unwrap();
        store.insert_pending(&computer_science()).unwrap();
        store.commit().unwrap();
    }
    let mut console = scripted(&["2", LIST_DEPARTMENTS, EXIT]);

    run(&mut conn, &mut console).unwrap();

    let output = transcript(&console);
    assert_eq!(output.matches("Do you want to log every SQL statement?").count(), 1);
    assert_eq!(output.matches("9: Exit this application").count(), 2);
    assert!(output.contains("Department: Computer Science (CS)"));
}
