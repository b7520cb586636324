mod common;

use common::{
    alan_turing, computer_science, grace_hopper, mathematics, scripted, transcript, CountingStore,
};
use registrar_core::db::open_db_in_memory;
use registrar_core::model::department::column;
use registrar_core::workflow::department::{
    delete_department, find_department, select_department_from_list, BY_ABBREVIATION,
    BY_BUILDING_OFFICE,
};
use registrar_core::workflow::selection::{select_one, Lookup};
use registrar_core::workflow::student::{
    delete_student, find_student, list_students, select_student_from_list,
};
use registrar_core::workflow::FieldSpec;
use registrar_core::{Department, Filter, RecordStore, SqliteSession, Student};

static BY_BUILDING: Lookup<Department> = Lookup::new(
    "building",
    &[FieldSpec::text(column::BUILDING, "Building --> ")],
    "No single department in that building.  Try again.",
);

#[test]
fn composite_key_lookup_retries_until_match() {
    let mut conn = open_db_in_memory().unwrap();
    let store = CountingStore::new(SqliteSession::begin(&mut conn).unwrap());
    store.inner.insert_pending(&computer_science()).unwrap();
    store.inner.insert_pending(&mathematics()).unwrap();
    let mut console = scripted(&["Watson", "999", "Watson", "101"]);

    let found = select_one(&store, &mut console, &BY_BUILDING_OFFICE).unwrap();

    assert_eq!(found, computer_science());
    assert_eq!(
        transcript(&console)
            .matches("No department by that building/office.  Try again.")
            .count(),
        1
    );
    assert_eq!(store.counts(), 2);
    assert_eq!(store.finds(), 1);
}

#[test]
fn several_matches_are_treated_like_none() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&computer_science()).unwrap();
    store.insert_pending(&mathematics()).unwrap();
    let mut mechanical = computer_science();
    mechanical.name = "Mechanical Engineering".to_string();
    mechanical.abbreviation = "ME".to_string();
    mechanical.chair_name = "James Watt".to_string();
    mechanical.building = "Foundry".to_string();
    mechanical.description = "Engines".to_string();
    store.insert_pending(&mechanical).unwrap();

    let mut console = scripted(&["Watson", "Nowhere", "Foundry"]);
    let found = select_one(&store, &mut console, &BY_BUILDING).unwrap();

    assert_eq!(found, mechanical);
    assert_eq!(
        transcript(&console)
            .matches("No single department in that building.  Try again.")
            .count(),
        2
    );
}

#[test]
fn repeated_selection_with_same_input_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&computer_science()).unwrap();

    let mut console = scripted(&["CS", "CS"]);
    let first = select_one(&store, &mut console, &BY_ABBREVIATION).unwrap();
    let second = select_one(&store, &mut console, &BY_ABBREVIATION).unwrap();

    assert_eq!(first, second);
}

#[test]
fn find_department_uses_chosen_lookup() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&computer_science()).unwrap();
    store.insert_pending(&mathematics()).unwrap();

    let mut console = scripted(&["5", "2", "Emmy Noether"]);
    let found = find_department(&store, &mut console).unwrap();

    assert_eq!(found, mathematics());
    let output = transcript(&console);
    assert!(output.contains("Invalid selection `5`; enter a number from 1 to 4."));
    assert!(output.contains("Enter the department chair name --> "));
}

#[test]
fn find_student_by_id_reprompts_on_non_numeric_input() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&grace_hopper()).unwrap();
    let turing_id = store.insert_pending(&alan_turing()).unwrap();

    let id_text = turing_id.to_string();
    let mut console = scripted(&["1", "abc", "424242", id_text.as_str()]);
    let found = find_student(&store, &mut console).unwrap();

    assert_eq!(found.student_id, Some(turing_id));
    let output = transcript(&console);
    assert!(output.contains("Please enter a whole number."));
    assert!(output.contains("No student with that ID.  Try again."));
}

#[test]
fn find_department_by_description_retries_on_miss() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&computer_science()).unwrap();
    store.insert_pending(&mathematics()).unwrap();

    let mut console = scripted(&["4", "Programs", "Programs and proofs"]);
    let found = find_department(&store, &mut console).unwrap();

    assert_eq!(found, computer_science());
    let output = transcript(&console);
    assert_eq!(
        output
            .matches("Enter the department description --> ")
            .count(),
        2
    );
    assert!(output.contains("No department with that description.  Try again."));
}

#[test]
fn find_student_by_email() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&grace_hopper()).unwrap();
    let turing_id = store.insert_pending(&alan_turing()).unwrap();

    let mut console = scripted(&["3", "alan@bletchley.org", "alan@bletchley.uk"]);
    let found = find_student(&store, &mut console).unwrap();

    assert_eq!(found.student_id, Some(turing_id));
    assert_eq!(found.first_name, "Alan");
    let output = transcript(&console);
    assert!(output.contains("Enter the student e-mail address --> "));
    assert!(output.contains("No student with that e-mail address.  Try again."));
}

#[test]
fn list_students_prints_every_student_by_last_name() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    let turing_id = store.insert_pending(&alan_turing()).unwrap();
    let hopper_id = store.insert_pending(&grace_hopper()).unwrap();

    let mut console = scripted(&[]);
    list_students(&store, &mut console).unwrap();

    assert_eq!(
        transcript(&console),
        format!(
            "Student id: {hopper_id} name: Hopper, Grace e-mail: grace@navy.mil\n\
             Student id: {turing_id} name: Turing, Alan e-mail: alan@bletchley.uk\n"
        )
    );
}

#[test]
fn list_students_reports_empty_roster() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();

    let mut console = scripted(&[]);
    list_students(&store, &mut console).unwrap();

    assert_eq!(transcript(&console), "No students on file.\n");
}

#[test]
fn delete_department_removes_selected_record() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&computer_science()).unwrap();
    store.insert_pending(&mathematics()).unwrap();

    let mut console = scripted(&["1", "CS"]);
    delete_department(&store, &mut console).unwrap();

    assert_eq!(
        store.list_ordered::<Department>().unwrap(),
        vec![mathematics()]
    );
    assert!(transcript(&console).contains("Deleted department CS."));
}

#[test]
fn delete_student_by_name() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&grace_hopper()).unwrap();
    store.insert_pending(&alan_turing()).unwrap();

    let mut console = scripted(&["2", "Hopper", "Grace"]);
    delete_student(&store, &mut console).unwrap();

    let remaining = store.list_ordered::<Student>().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].last_name, "Turing");
}

#[test]
fn list_picker_returns_record_behind_chosen_line() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();
    store.insert_pending(&mathematics()).unwrap();
    store.insert_pending(&computer_science()).unwrap();

    let mut console = scripted(&["2"]);
    select_department_from_list(&store, &mut console).unwrap();

    let output = transcript(&console);
    assert!(output.contains("1: CS: Ada Lovelace, Watson, 101, Programs and proofs"));
    assert!(output.contains("2: MATH: Emmy Noether, Watson, 205, Structures and symmetry"));
    assert!(output.contains("Selected department:\nDepartment: Mathematics (MATH)"));
}

#[test]
fn empty_list_picker_reports_nothing_to_select() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSession::begin(&mut conn).unwrap();

    let mut console = scripted(&[]);
    select_student_from_list(&store, &mut console).unwrap();

    assert_eq!(transcript(&console), "No students to select from.\n");
    assert_eq!(
        store.count_matching::<Student>(&Filter::new()).unwrap(),
        0
    );
}
