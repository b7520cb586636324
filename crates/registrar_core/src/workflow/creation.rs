//! Uniqueness-gated record creation.
//!
//! # Invariants
//! - Every field is prompted, in form order, before any uniqueness check.
//! - Each declared constraint is checked independently; every violated
//!   constraint prints its own line.
//! - One violation discards the whole candidate and restarts the form.
//! - An admitted record is only staged; committing is the session owner's job.

use crate::console::Console;
use crate::model::{Entity, Fields, UniqueConstraint};
use crate::repo::record_store::RecordStore;
use crate::workflow::{read_valid_value, AppResult, FieldSpec};
use log::{debug, info};
use std::marker::PhantomData;

/// Ordered prompts that collect a full record of type `E`.
#[derive(Debug)]
pub struct Form<E> {
    fields: &'static [FieldSpec],
    _record: PhantomData<fn() -> E>,
}

impl<E> Form<E> {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            _record: PhantomData,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }
}

/// Returns the constraints of `E` that `candidate` collides with.
pub fn violated_constraints<E, S>(
    store: &S,
    candidate: &E,
) -> AppResult<Vec<&'static UniqueConstraint>>
where
    E: Entity,
    S: RecordStore,
{
    let mut violated = Vec::new();
    for constraint in E::UNIQUE_CONSTRAINTS {
        let count = store.count_matching::<E>(&candidate.constraint_filter(constraint))?;
        if count > 0 {
            violated.push(constraint);
        }
    }
    Ok(violated)
}

/// Prompts for a new record until it violates no uniqueness constraint, then
/// stages it for insertion and returns it.
///
/// Blocks until the user supplies an admissible record.
pub fn create_record<E, S, C>(store: &S, console: &mut C, form: &Form<E>) -> AppResult<E>
where
    E: Entity,
    S: RecordStore,
    C: Console + ?Sized,
{
    loop {
        let mut fields = Fields::new();
        for spec in form.fields {
            fields.insert(spec.column, read_valid_value::<E, C>(console, spec)?);
        }

        let candidate = match E::from_fields(&fields) {
            Ok(candidate) => candidate,
            Err(err) => {
                console.write_line(&format!("Invalid, {err}."))?;
                continue;
            }
        };

        let violated = violated_constraints(store, &candidate)?;
        if !violated.is_empty() {
            for constraint in &violated {
                debug!(
                    "event=record_create module=workflow status=rejected kind={} constraint={}",
                    E::KIND,
                    constraint.name
                );
                console.write_line(constraint.violation_message)?;
            }
            continue;
        }

        store.insert_pending(&candidate)?;
        info!(
            "event=record_create module=workflow status=pending kind={}",
            E::KIND
        );
        return Ok(candidate);
    }
}
