//! Retry-until-unique record selection.
//!
//! # Invariants
//! - `select_one` returns only after the criteria matched exactly one record.
//! - Zero and several matches are the same outcome: the lookup's not-found
//!   line, then a fresh prompt. The loop has no retry bound.
//! - The returned record comes from a second lookup, not from the count query.

use crate::console::Console;
use crate::menu::{Menu, MenuOption};
use crate::model::{Entity, Filter};
use crate::repo::record_store::RecordStore;
use crate::workflow::{read_value, AppResult, FieldSpec};
use log::{debug, info};
use std::marker::PhantomData;

/// Attribute (or attribute combination) used to locate one record.
#[derive(Debug)]
pub struct Lookup<E> {
    name: &'static str,
    fields: &'static [FieldSpec],
    not_found: &'static str,
    _record: PhantomData<fn() -> E>,
}

impl<E> Lookup<E> {
    pub const fn new(
        name: &'static str,
        fields: &'static [FieldSpec],
        not_found: &'static str,
    ) -> Self {
        Self {
            name,
            fields,
            not_found,
            _record: PhantomData,
        }
    }

    /// Short identifier used in log events.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Line printed when the criteria do not match exactly one record.
    pub fn not_found(&self) -> &'static str {
        self.not_found
    }
}

/// Prompts once for every field of `lookup` and builds the equality filter.
pub fn read_criteria<E, C>(console: &mut C, lookup: &Lookup<E>) -> AppResult<Filter>
where
    C: Console + ?Sized,
{
    let mut filter = Filter::new();
    for spec in lookup.fields {
        filter = filter.eq(spec.column, read_value(console, spec)?);
    }
    Ok(filter)
}

/// Resolves exactly one persisted record from user-entered criteria.
///
/// Blocks until the user enters criteria matching a single record.
pub fn select_one<E, S, C>(store: &S, console: &mut C, lookup: &Lookup<E>) -> AppResult<E>
where
    E: Entity,
    S: RecordStore,
    C: Console + ?Sized,
{
    loop {
        let filter = read_criteria(console, lookup)?;
        let count = store.count_matching::<E>(&filter)?;
        if count == 1 {
            if let Some(record) = store.find_one::<E>(&filter)? {
                info!(
                    "event=record_select module=workflow status=ok kind={} lookup={}",
                    E::KIND,
                    lookup.name
                );
                return Ok(record);
            }
        }

        debug!(
            "event=record_select module=workflow status=retry kind={} lookup={} count={}",
            E::KIND,
            lookup.name,
            count
        );
        console.write_line(lookup.not_found)?;
    }
}

/// Lets the user pick one record from an ordered list of all records.
///
/// Returns `Ok(None)` when there is nothing to pick from.
pub fn pick_from_list<E, S, C>(
    store: &S,
    console: &mut C,
    title: &str,
    prompt: &str,
    label: impl Fn(&E) -> String,
) -> AppResult<Option<E>>
where
    E: Entity,
    S: RecordStore,
    C: Console + ?Sized,
{
    let records = store.list_ordered::<E>()?;
    let menu = Menu::from_records(title, prompt, &records, |record| {
        MenuOption::new(label(record), record.key_filter())
    });
    if menu.is_empty() {
        return Ok(None);
    }

    let key = menu.prompt(console)?;
    Ok(store.find_one::<E>(&key)?)
}
