//! Department record.
//!
//! # Invariants
//! - `name` is the primary key.
//! - `abbreviation`, `chair_name`, `(building, office)` and `description`
//!   are each unique across all departments.
//! - Text widths follow the column widths of the `departments` table.

use crate::model::{
    check_text, Entity, FieldValue, Fields, Filter, UniqueConstraint, ValidationError,
};
use std::fmt::{Display, Formatter};

/// Column names of the `departments` table.
pub mod column {
    pub const NAME: &str = "name";
    pub const ABBREVIATION: &str = "abbreviation";
    pub const CHAIR_NAME: &str = "chair_name";
    pub const BUILDING: &str = "building";
    pub const OFFICE: &str = "office";
    pub const DESCRIPTION: &str = "description";
}

pub const NAME_MAX_CHARS: usize = 50;
pub const ABBREVIATION_MAX_CHARS: usize = 6;
pub const CHAIR_NAME_MAX_CHARS: usize = 80;
pub const BUILDING_MAX_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 80;

/// Organizational unit that students and faculty belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub name: String,
    pub abbreviation: String,
    pub chair_name: String,
    pub building: String,
    pub office: i64,
    pub description: String,
}

impl Department {
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        chair_name: impl Into<String>,
        building: impl Into<String>,
        office: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            chair_name: chair_name.into(),
            building: building.into(),
            office,
            description: description.into(),
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Department: {} ({})", self.name, self.abbreviation)?;
        writeln!(f, "Chair: {}", self.chair_name)?;
        writeln!(f, "Building: {}", self.building)?;
        writeln!(f, "Office: {}", self.office)?;
        write!(f, "Description: {}", self.description)
    }
}

impl Entity for Department {
    const KIND: &'static str = "department";
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static [&'static str] = &[
        column::NAME,
        column::ABBREVIATION,
        column::CHAIR_NAME,
        column::BUILDING,
        column::OFFICE,
        column::DESCRIPTION,
    ];
    const ORDER_BY: &'static [&'static str] = &[
        column::ABBREVIATION,
        column::CHAIR_NAME,
        column::BUILDING,
        column::OFFICE,
        column::DESCRIPTION,
    ];
    const UNIQUE_CONSTRAINTS: &'static [UniqueConstraint] = &[
        UniqueConstraint {
            name: "departments_pk",
            columns: &[column::NAME],
            violation_message: "Invalid, pick a different name.",
        },
        UniqueConstraint {
            name: "departments_uk_01",
            columns: &[column::ABBREVIATION],
            violation_message: "Invalid, pick a different abbreviation.",
        },
        UniqueConstraint {
            name: "departments_uk_02",
            columns: &[column::CHAIR_NAME],
            violation_message: "Invalid, pick a different chair name.",
        },
        UniqueConstraint {
            name: "departments_uk_03",
            columns: &[column::BUILDING, column::OFFICE],
            violation_message: "Invalid, pick a different building and office.",
        },
        UniqueConstraint {
            name: "departments_uk_04",
            columns: &[column::DESCRIPTION],
            violation_message: "Invalid, pick a different description.",
        },
    ];

    fn column_value(&self, column: &str) -> Option<FieldValue> {
        match column {
            column::NAME => Some(FieldValue::from(self.name.as_str())),
            column::ABBREVIATION => Some(FieldValue::from(self.abbreviation.as_str())),
            column::CHAIR_NAME => Some(FieldValue::from(self.chair_name.as_str())),
            column::BUILDING => Some(FieldValue::from(self.building.as_str())),
            column::OFFICE => Some(FieldValue::Integer(self.office)),
            column::DESCRIPTION => Some(FieldValue::from(self.description.as_str())),
            _ => None,
        }
    }

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.text(column::NAME)?,
            abbreviation: fields.text(column::ABBREVIATION)?,
            chair_name: fields.text(column::CHAIR_NAME)?,
            building: fields.text(column::BUILDING)?,
            office: fields.integer(column::OFFICE)?,
            description: fields.text(column::DESCRIPTION)?,
        })
    }

    fn key_filter(&self) -> Filter {
        Filter::new().eq(column::NAME, self.name.as_str())
    }

    fn validate_field(column: &str, value: &FieldValue) -> Result<(), ValidationError> {
        let (field, max) = match column {
            column::NAME => (column::NAME, NAME_MAX_CHARS),
            column::ABBREVIATION => (column::ABBREVIATION, ABBREVIATION_MAX_CHARS),
            column::CHAIR_NAME => (column::CHAIR_NAME, CHAIR_NAME_MAX_CHARS),
            column::BUILDING => (column::BUILDING, BUILDING_MAX_CHARS),
            column::DESCRIPTION => (column::DESCRIPTION, DESCRIPTION_MAX_CHARS),
            _ => return Ok(()),
        };
        match value {
            FieldValue::Text(text) => check_text(field, text, max),
            FieldValue::Integer(_) => Err(ValidationError::WrongType {
                field,
                expected: "text",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{column, Department};
    use crate::model::{Entity, FieldValue, Filter, ValidationError};

    fn computer_science() -> Department {
        Department::new(
            "Computer Science",
            "CS",
            "Ada Lovelace",
            "Watson",
            101,
            "Programs and proofs",
        )
    }

    #[test]
    fn composite_constraint_filter_uses_both_columns() {
        let department = computer_science();
        let office_constraint = Department::UNIQUE_CONSTRAINTS
            .iter()
            .find(|constraint| constraint.name == "departments_uk_03")
            .expect("building/office constraint should be declared");

        assert_eq!(
            department.constraint_filter(office_constraint),
            Filter::new()
                .eq(column::BUILDING, "Watson")
                .eq(column::OFFICE, 101)
        );
    }

    #[test]
    fn validate_rejects_overlong_abbreviation() {
        let mut department = computer_science();
        department.abbreviation = "COMPSCI".to_string();

        assert_eq!(
            department.validate(),
            Err(ValidationError::TooLong {
                field: column::ABBREVIATION,
                max: 6
            })
        );
    }

    #[test]
    fn office_is_not_subject_to_text_rules() {
        assert!(Department::validate_field(column::OFFICE, &FieldValue::Integer(-3)).is_ok());
    }
}
