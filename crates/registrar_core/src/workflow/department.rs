//! Department workflows: add, find, delete, list and pick.

use crate::console::Console;
use crate::menu::{Menu, MenuOption};
use crate::model::department::{column, Department};
use crate::repo::record_store::RecordStore;
use crate::workflow::creation::{create_record, Form};
use crate::workflow::selection::{pick_from_list, select_one, Lookup};
use crate::workflow::{AppResult, FieldSpec};

pub static DEPARTMENT_FORM: Form<Department> = Form::new(&[
    FieldSpec::text(column::NAME, "Department name --> "),
    FieldSpec::text(column::ABBREVIATION, "Department abbreviation --> "),
    FieldSpec::text(column::CHAIR_NAME, "Department chair name --> "),
    FieldSpec::text(column::BUILDING, "Department building --> "),
    FieldSpec::integer(column::OFFICE, "Department office --> "),
    FieldSpec::text(column::DESCRIPTION, "Department description --> "),
]);

pub static BY_ABBREVIATION: Lookup<Department> = Lookup::new(
    "abbreviation",
    &[FieldSpec::text(
        column::ABBREVIATION,
        "Enter the department abbreviation --> ",
    )],
    "No department with that abbreviation.  Try again.",
);

pub static BY_CHAIR_NAME: Lookup<Department> = Lookup::new(
    "chair_name",
    &[FieldSpec::text(
        column::CHAIR_NAME,
        "Enter the department chair name --> ",
    )],
    "No department with that chair name.  Try again.",
);

pub static BY_BUILDING_OFFICE: Lookup<Department> = Lookup::new(
    "building_office",
    &[
        FieldSpec::text(column::BUILDING, "Enter the department building --> "),
        FieldSpec::integer(column::OFFICE, "Enter the department office --> "),
    ],
    "No department by that building/office.  Try again.",
);

pub static BY_DESCRIPTION: Lookup<Department> = Lookup::new(
    "description",
    &[FieldSpec::text(
        column::DESCRIPTION,
        "Enter the department description --> ",
    )],
    "No department with that description.  Try again.",
);

/// Ways to locate one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentLookup {
    Abbreviation,
    ChairName,
    BuildingOffice,
    Description,
}

impl DepartmentLookup {
    pub fn lookup(self) -> &'static Lookup<Department> {
        match self {
            Self::Abbreviation => &BY_ABBREVIATION,
            Self::ChairName => &BY_CHAIR_NAME,
            Self::BuildingOffice => &BY_BUILDING_OFFICE,
            Self::Description => &BY_DESCRIPTION,
        }
    }
}

/// Menu choosing how to locate a department.
pub fn department_lookup_menu() -> Menu<DepartmentLookup> {
    Menu::new(
        "Department lookup",
        "How do you want to find the department?",
        vec![
            MenuOption::new("By abbreviation", DepartmentLookup::Abbreviation),
            MenuOption::new("By chair name", DepartmentLookup::ChairName),
            MenuOption::new("By building and office", DepartmentLookup::BuildingOffice),
            MenuOption::new("By description", DepartmentLookup::Description),
        ],
    )
}

/// Prompts for a new department and stages it for insertion.
pub fn add_department<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    let department = create_record(store, console, &DEPARTMENT_FORM)?;
    console.write_line(&format!("Added department {}.", department.abbreviation))?;
    Ok(())
}

/// Asks for a lookup strategy and resolves exactly one department.
///
/// There is no way to give up short of closing the input.
pub fn find_department<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<Department> {
    let strategy = department_lookup_menu().prompt(console)?;
    select_one(store, console, strategy.lookup())
}

pub fn delete_department<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    console.write_line("Deleting a department")?;
    let department = find_department(store, console)?;
    store.delete(&department)?;
    console.write_line(&format!("Deleted department {}.", department.abbreviation))?;
    Ok(())
}

/// Prints every department ordered by abbreviation, chair, building, office
/// and description.
pub fn list_departments<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    let departments = store.list_ordered::<Department>()?;
    if departments.is_empty() {
        console.write_line("No departments on file.")?;
        return Ok(());
    }
    for department in &departments {
        console.write_line(&department.to_string())?;
        console.write_line("")?;
    }
    Ok(())
}

pub fn select_department_from_list<S: RecordStore, C: Console + ?Sized>(
    store: &S,
    console: &mut C,
) -> AppResult<()> {
    let picked = pick_from_list(
        store,
        console,
        "Department list",
        "Select a department from this list",
        |department: &Department| {
            format!(
                "{}: {}, {}, {}, {}",
                department.abbreviation,
                department.chair_name,
                department.building,
                department.office,
                department.description
            )
        },
    )?;
    match picked {
        Some(department) => console.write_line(&format!("Selected department:\n{department}"))?,
        None => console.write_line("No departments to select from.")?,
    }
    Ok(())
}
