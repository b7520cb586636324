//! Console workflows over the record store.
//!
//! # Responsibility
//! - Implement the retry-until-unique selection and the all-or-nothing
//!   creation protocols once, generic over `Entity`.
//! - Bind department and student prompts to those protocols.
//!
//! # Invariants
//! - User-input failures (bad field, collision, no unique match) are reported
//!   and retried inside the workflow; they never surface as `AppError`.
//! - Workflows receive the store session explicitly and never commit it.

use crate::console::{read_parsed, Console, ConsoleError, ConsoleResult};
use crate::db::DbError;
use crate::model::{Entity, FieldValue};
use crate::repo::record_store::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod creation;
pub mod department;
pub mod selection;
pub mod student;

pub type AppResult<T> = Result<T, AppError>;

/// Failures that end a workflow: console transport or storage problems.
#[derive(Debug)]
pub enum AppError {
    Console(ConsoleError),
    Repo(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Console(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Console(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConsoleError> for AppError {
    fn from(value: ConsoleError) -> Self {
        Self::Console(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Scalar kind expected at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// One prompted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub column: &'static str,
    pub prompt: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(column: &'static str, prompt: &'static str) -> Self {
        Self {
            column,
            prompt,
            kind: FieldKind::Text,
        }
    }

    pub const fn integer(column: &'static str, prompt: &'static str) -> Self {
        Self {
            column,
            prompt,
            kind: FieldKind::Integer,
        }
    }
}

const NOT_A_NUMBER: &str = "Please enter a whole number.";

/// Reads one value for `spec`, re-prompting until an integer field parses.
pub fn read_value<C: Console + ?Sized>(
    console: &mut C,
    spec: &FieldSpec,
) -> ConsoleResult<FieldValue> {
    match spec.kind {
        FieldKind::Text => console.read_line(spec.prompt).map(FieldValue::Text),
        FieldKind::Integer => {
            read_parsed(console, spec.prompt, NOT_A_NUMBER).map(FieldValue::Integer)
        }
    }
}

/// Reads one value for `spec` and re-prompts until it passes
/// `E::validate_field`.
pub fn read_valid_value<E, C>(console: &mut C, spec: &FieldSpec) -> ConsoleResult<FieldValue>
where
    E: Entity,
    C: Console + ?Sized,
{
    loop {
        let value = read_value(console, spec)?;
        match E::validate_field(spec.column, &value) {
            Ok(()) => return Ok(value),
            Err(err) => console.write_line(&format!("Invalid, {err}."))?,
        }
    }
}
