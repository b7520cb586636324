//! Student record.
//!
//! # Invariants
//! - `student_id` is assigned by the store and is `None` until inserted.
//! - `(last_name, first_name)` and `email` are each unique across students.

use crate::model::{
    check_text, Entity, FieldValue, Fields, Filter, UniqueConstraint, ValidationError,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Store-assigned student identity.
pub type StudentId = i64;

/// Column names of the `students` table.
pub mod column {
    pub const STUDENT_ID: &str = "student_id";
    pub const LAST_NAME: &str = "last_name";
    pub const FIRST_NAME: &str = "first_name";
    pub const EMAIL: &str = "e_mail";
}

pub const LAST_NAME_MAX_CHARS: usize = 50;
pub const FIRST_NAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 80;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("e-mail pattern must compile")
});

/// Person enrolled at the institution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub student_id: Option<StudentId>,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
}

impl Student {
    /// Creates a student that has not been persisted yet.
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            student_id: None,
            last_name: last_name.into(),
            first_name: first_name.into(),
            email: email.into(),
        }
    }

    /// `Last, First` label used by list pickers.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.student_id {
            Some(id) => write!(f, "Student id: {id} ")?,
            None => write!(f, "Student (unsaved) ")?,
        }
        write!(f, "name: {} e-mail: {}", self.display_name(), self.email)
    }
}

impl Entity for Student {
    const KIND: &'static str = "student";
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] = &[
        column::STUDENT_ID,
        column::LAST_NAME,
        column::FIRST_NAME,
        column::EMAIL,
    ];
    const GENERATED_COLUMN: Option<&'static str> = Some(column::STUDENT_ID);
    const ORDER_BY: &'static [&'static str] = &[column::LAST_NAME, column::FIRST_NAME];
    const UNIQUE_CONSTRAINTS: &'static [UniqueConstraint] = &[
        UniqueConstraint {
            name: "students_uk_01",
            columns: &[column::LAST_NAME, column::FIRST_NAME],
            violation_message: "We already have a student by that name.  Try again.",
        },
        UniqueConstraint {
            name: "students_uk_02",
            columns: &[column::EMAIL],
            violation_message: "We already have a student with that e-mail address.  Try again.",
        },
    ];

    fn column_value(&self, column: &str) -> Option<FieldValue> {
        match column {
            column::STUDENT_ID => self.student_id.map(FieldValue::Integer),
            column::LAST_NAME => Some(FieldValue::from(self.last_name.as_str())),
            column::FIRST_NAME => Some(FieldValue::from(self.first_name.as_str())),
            column::EMAIL => Some(FieldValue::from(self.email.as_str())),
            _ => None,
        }
    }

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            student_id: fields.optional_integer(column::STUDENT_ID)?,
            last_name: fields.text(column::LAST_NAME)?,
            first_name: fields.text(column::FIRST_NAME)?,
            email: fields.text(column::EMAIL)?,
        })
    }

    fn key_filter(&self) -> Filter {
        match self.student_id {
            Some(id) => Filter::new().eq(column::STUDENT_ID, id),
            None => Filter::new()
                .eq(column::LAST_NAME, self.last_name.as_str())
                .eq(column::FIRST_NAME, self.first_name.as_str()),
        }
    }

    fn validate_field(column: &str, value: &FieldValue) -> Result<(), ValidationError> {
        let (field, max) = match column {
            column::LAST_NAME => (column::LAST_NAME, LAST_NAME_MAX_CHARS),
            column::FIRST_NAME => (column::FIRST_NAME, FIRST_NAME_MAX_CHARS),
            column::EMAIL => (column::EMAIL, EMAIL_MAX_CHARS),
            _ => return Ok(()),
        };
        let FieldValue::Text(text) = value else {
            return Err(ValidationError::WrongType {
                field,
                expected: "text",
            });
        };
        check_text(field, text, max)?;
        if field == column::EMAIL && !EMAIL_PATTERN.is_match(text) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{column, Student};
    use crate::model::{Entity, FieldValue, Filter, ValidationError};

    #[test]
    fn unsaved_student_is_keyed_by_full_name() {
        let student = Student::new("Hopper", "Grace", "grace@navy.mil");
        assert_eq!(
            student.key_filter(),
            Filter::new()
                .eq(column::LAST_NAME, "Hopper")
                .eq(column::FIRST_NAME, "Grace")
        );
    }

    #[test]
    fn saved_student_is_keyed_by_id() {
        let mut student = Student::new("Hopper", "Grace", "grace@navy.mil");
        student.student_id = Some(7);
        assert_eq!(
            student.key_filter(),
            Filter::new().eq(column::STUDENT_ID, 7)
        );
    }

    #[test]
    fn email_must_have_local_part_and_domain() {
        assert_eq!(
            Student::validate_field(column::EMAIL, &FieldValue::from("grace.navy.mil")),
            Err(ValidationError::InvalidEmail)
        );
        assert!(
            Student::validate_field(column::EMAIL, &FieldValue::from("grace@navy.mil")).is_ok()
        );
    }
}
