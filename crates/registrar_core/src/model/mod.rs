//! Record model shared by the store and the console workflows.
//!
//! # Responsibility
//! - Define the scalar values, filters and uniqueness constraints that the
//!   record store understands.
//! - Define the `Entity` contract implemented by every persisted record type.
//!
//! # Invariants
//! - Column names are static identifiers owned by the record type; user input
//!   only ever flows into values, never into column names.
//! - A record's `UNIQUE_CONSTRAINTS` mirror the constraints declared in SQL.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub mod department;
pub mod student;

/// Scalar value stored in one record column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Conjunction of column equality terms.
///
/// An empty filter matches every record of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    terms: Vec<(&'static str, FieldValue)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column == value` to the conjunction.
    pub fn eq(mut self, column: &'static str, value: impl Into<FieldValue>) -> Self {
        self.terms.push((column, value.into()));
        self
    }

    pub fn terms(&self) -> &[(&'static str, FieldValue)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Declared uniqueness constraint over one column or a column group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueConstraint {
    /// Constraint name as declared in the schema.
    pub name: &'static str,
    /// Columns that must be unique in combination.
    pub columns: &'static [&'static str],
    /// Line shown to the user when a candidate collides on this constraint.
    pub violation_message: &'static str,
}

/// Column values collected for one record, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: BTreeMap<&'static str, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &'static str, value: FieldValue) {
        self.values.insert(column, value);
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.values.get(column)
    }

    /// Returns the text stored for `column`.
    pub fn text(&self, column: &'static str) -> Result<String, ValidationError> {
        match self.values.get(column) {
            Some(FieldValue::Text(value)) => Ok(value.clone()),
            Some(FieldValue::Integer(_)) => Err(ValidationError::WrongType {
                field: column,
                expected: "text",
            }),
            None => Err(ValidationError::Missing { field: column }),
        }
    }

    /// Returns the integer stored for `column`.
    pub fn integer(&self, column: &'static str) -> Result<i64, ValidationError> {
        match self.values.get(column) {
            Some(FieldValue::Integer(value)) => Ok(*value),
            Some(FieldValue::Text(_)) => Err(ValidationError::WrongType {
                field: column,
                expected: "integer",
            }),
            None => Err(ValidationError::Missing { field: column }),
        }
    }

    /// Returns the integer stored for `column`, or `None` when absent.
    pub fn optional_integer(&self, column: &'static str) -> Result<Option<i64>, ValidationError> {
        match self.values.get(column) {
            None => Ok(None),
            Some(_) => self.integer(column).map(Some),
        }
    }
}

/// Field-level validation failures for record values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text is empty after trim.
    Blank { field: &'static str },
    /// Text exceeds the declared column width.
    TooLong { field: &'static str, max: usize },
    /// E-mail address does not look like `local@domain`.
    InvalidEmail,
    /// Value for a required column was not supplied.
    Missing { field: &'static str },
    /// Value has the wrong scalar type for the column.
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "{field} must not be blank"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "e-mail address must look like name@domain"),
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::WrongType { field, expected } => write!(f, "{field} must be {expected}"),
        }
    }
}

impl Error for ValidationError {}

/// Checks a required text column against its declared width.
pub fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Contract for a record type the store can persist.
pub trait Entity: Clone + Debug + PartialEq {
    /// Human-readable kind used in messages and log events.
    const KIND: &'static str;
    /// Backing table name.
    const TABLE: &'static str;
    /// Every persisted column in select order.
    const COLUMNS: &'static [&'static str];
    /// Column assigned by the store on insert, if any.
    const GENERATED_COLUMN: Option<&'static str> = None;
    /// Sort keys used by ordered listings.
    const ORDER_BY: &'static [&'static str];
    /// Uniqueness constraints enforced by the store.
    const UNIQUE_CONSTRAINTS: &'static [UniqueConstraint];

    /// Returns the value of `column`, or `None` when unset or unknown.
    fn column_value(&self, column: &str) -> Option<FieldValue>;

    /// Rebuilds a record from column values.
    fn from_fields(fields: &Fields) -> Result<Self, ValidationError>;

    /// Filter that identifies exactly this persisted record.
    fn key_filter(&self) -> Filter;

    /// Validates one column value before it becomes part of a record.
    fn validate_field(column: &str, value: &FieldValue) -> Result<(), ValidationError> {
        let _ = (column, value);
        Ok(())
    }

    /// Validates every column of the record.
    fn validate(&self) -> Result<(), ValidationError> {
        for column in Self::COLUMNS {
            if let Some(value) = self.column_value(column) {
                Self::validate_field(column, &value)?;
            }
        }
        Ok(())
    }

    /// Filter matching records that collide with `self` on `constraint`.
    fn constraint_filter(&self, constraint: &UniqueConstraint) -> Filter {
        constraint
            .columns
            .iter()
            .fold(Filter::new(), |filter, &column| match self.column_value(column) {
                Some(value) => filter.eq(column, value),
                None => filter,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{check_text, FieldValue, Fields, Filter, ValidationError};

    #[test]
    fn filter_keeps_terms_in_insertion_order() {
        let filter = Filter::new().eq("building", "Watson").eq("office", 101);
        assert_eq!(
            filter.terms(),
            &[
                ("building", FieldValue::Text("Watson".to_string())),
                ("office", FieldValue::Integer(101)),
            ]
        );
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn check_text_rejects_blank_and_overlong_values() {
        assert_eq!(
            check_text("abbreviation", "   ", 6),
            Err(ValidationError::Blank {
                field: "abbreviation"
            })
        );
        assert_eq!(
            check_text("abbreviation", "COMPSCI", 6),
            Err(ValidationError::TooLong {
                field: "abbreviation",
                max: 6
            })
        );
        assert!(check_text("abbreviation", "CECS", 6).is_ok());
    }

    #[test]
    fn fields_report_missing_and_mistyped_columns() {
        let mut fields = Fields::new();
        fields.insert("office", FieldValue::Text("one".to_string()));

        assert_eq!(
            fields.integer("office"),
            Err(ValidationError::WrongType {
                field: "office",
                expected: "integer"
            })
        );
        assert_eq!(
            fields.text("building"),
            Err(ValidationError::Missing { field: "building" })
        );
        assert_eq!(fields.optional_integer("student_id"), Ok(None));
    }
}
