//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract the console workflows depend on.
//! - Isolate SQLite query details from workflow orchestration.
//!
//! # Invariants
//! - Store writes must enforce `Entity::validate()` before persistence.
//! - Writes stay pending inside one session until `commit()`.

pub mod record_store;
