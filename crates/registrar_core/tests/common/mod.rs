#![allow(dead_code)]

use registrar_core::{Department, Entity, Filter, RecordStore, RepoResult, Student, TextConsole};
use std::cell::Cell;
use std::io::Cursor;

pub type ScriptedConsole = TextConsole<Cursor<Vec<u8>>, Vec<u8>>;

/// Console that answers prompts with `lines`, one per prompt.
pub fn scripted(lines: &[&str]) -> ScriptedConsole {
    let mut input = lines.join("\n");
    if !lines.is_empty() {
        input.push('\n');
    }
    TextConsole::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// Console that answers prompts with raw `input`, which need not be UTF-8.
pub fn scripted_bytes(input: &[u8]) -> ScriptedConsole {
    TextConsole::new(Cursor::new(input.to_vec()), Vec::new())
}

pub fn transcript(console: &ScriptedConsole) -> String {
    String::from_utf8(console.output().clone()).unwrap()
}

/// Store wrapper that counts calls before delegating.
pub struct CountingStore<S> {
    pub inner: S,
    inserts: Cell<usize>,
    counts: Cell<usize>,
    finds: Cell<usize>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            inserts: Cell::new(0),
            counts: Cell::new(0),
            finds: Cell::new(0),
        }
    }

    pub fn inserts(&self) -> usize {
        self.inserts.get()
    }

    pub fn counts(&self) -> usize {
        self.counts.get()
    }

    pub fn finds(&self) -> usize {
        self.finds.get()
    }
}

impl<S: RecordStore> RecordStore for CountingStore<S> {
    fn insert_pending<E: Entity>(&self, record: &E) -> RepoResult<i64> {
        self.inserts.set(self.inserts.get() + 1);
        self.inner.insert_pending(record)
    }

    fn count_matching<E: Entity>(&self, filter: &Filter) -> RepoResult<u64> {
        self.counts.set(self.counts.get() + 1);
        self.inner.count_matching::<E>(filter)
    }

    fn find_one<E: Entity>(&self, filter: &Filter) -> RepoResult<Option<E>> {
        self.finds.set(self.finds.get() + 1);
        self.inner.find_one(filter)
    }

    fn delete<E: Entity>(&self, record: &E) -> RepoResult<()> {
        self.inner.delete(record)
    }

    fn list_ordered<E: Entity>(&self) -> RepoResult<Vec<E>> {
        self.inner.list_ordered()
    }

    fn commit(self) -> RepoResult<()> {
        self.inner.commit()
    }
}

pub fn computer_science() -> Department {
    Department::new(
        "Computer Science",
        "CS",
        "Ada Lovelace",
        "Watson",
        101,
        "Programs and proofs",
    )
}

pub fn mathematics() -> Department {
    Department::new(
        "Mathematics",
        "MATH",
        "Emmy Noether",
        "Watson",
        205,
        "Structures and symmetry",
    )
}

pub fn grace_hopper() -> Student {
    Student::new("Hopper", "Grace", "grace@navy.mil")
}

pub fn alan_turing() -> Student {
    Student::new("Turing", "Alan", "alan@bletchley.uk")
}
