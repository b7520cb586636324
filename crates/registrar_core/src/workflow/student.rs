//! Student workflows: add, find, delete, list and pick.

use crate::console::Console;
use crate::menu::{Menu, MenuOption};
use crate::model::student::{column, Student};
use crate::repo::record_store::RecordStore;
use crate::workflow::creation::{create_record, Form};
use crate::workflow::selection::{pick_from_list, select_one, Lookup};
use crate::workflow::{AppResult, FieldSpec};

pub static STUDENT_FORM: Form<Student> = Form::new(&[
    FieldSpec::text(column::LAST_NAME, "Student last name --> "),
    FieldSpec::text(column::FIRST_NAME, "Student first name --> "),
    FieldSpec::text(column::EMAIL, "Student e-mail address --> "),
]);

pub static BY_ID: Lookup<Student> = Lookup::new(
    "student_id",
    &[FieldSpec::integer(column::STUDENT_ID, "Enter the student ID --> ")],
    "No student with that ID.  Try again.",
);

pub static BY_NAME: Lookup<Student> = Lookup::new(
    "name",
    &[
        FieldSpec::text(column::LAST_NAME, "Student last name --> "),
        FieldSpec::text(column::FIRST_NAME, "Student first name --> "),
    ],
    "No student by that name.  Try again.",
);

pub static BY_EMAIL: Lookup<Student> = Lookup::new(
    "email",
    &[FieldSpec::text(
        column::EMAIL,
        "Enter the student e-mail address --> ",
    )],
    "No student with that e-mail address.  Try again.",
);

/// Ways to locate one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentLookup {
    Id,
    Name,
    Email,
}

impl StudentLookup {
    pub fn lookup(self) -> &'static Lookup<Student> {
        match self {
            Self::Id => &BY_ID,
            Self::Name => &BY_NAME,
            Self::Email => &BY_EMAIL,
        }
    }
}

pub fn student_lookup_menu() -> Menu<StudentLookup> {
    Menu::new(
        "Student lookup",
        "How do you want to find the student?",
        vec![
            MenuOption::new("By ID", StudentLookup::Id),
            MenuOption::new("By first and last name", StudentLookup::Name),
            MenuOption::new("By e-mail address", StudentLookup::Email),
        ],
    )
}

pub fn add_student<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    let student = create_record(store, console, &STUDENT_FORM)?;
    console.write_line(&format!("Added student {}.", student.display_name()))?;
    Ok(())
}

/// Asks for a lookup strategy and resolves exactly one student.
///
/// There is no way to give up short of closing the input.
pub fn find_student<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<Student> {
    let strategy = student_lookup_menu().prompt(console)?;
    select_one(store, console, strategy.lookup())
}

pub fn delete_student<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    console.write_line("Deleting a student")?;
    let student = find_student(store, console)?;
    store.delete(&student)?;
    console.write_line(&format!("Deleted student {}.", student.display_name()))?;
    Ok(())
}

/// Prints every student ordered by last name, then first name.
pub fn list_students<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    let students = store.list_ordered::<Student>()?;
    if students.is_empty() {
        console.write_line("No students on file.")?;
        return Ok(());
    }
    for student in &students {
        console.write_line(&student.to_string())?;
    }
    Ok(())
}

pub fn select_student_from_list<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    let picked = pick_from_list(
        store,
        console,
        "Student list",
        "Select a student from this list",
        Student::display_name,
    )?;
    match picked {
        Some(student) => console.write_line(&format!("Selected student: {student}"))?,
        None => console.write_line("No students to select from.")?,
    }
    Ok(())
}
